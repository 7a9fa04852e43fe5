use unicode_normalization::char::{decompose_canonical, is_combining_mark};
use unicode_normalization::UnicodeNormalization;

/// Folds a commune name or query into its matching key: lowercase, and with
/// `fold_accents` every diacritic dropped and the French ligatures spelled out.
///
/// Accent folding decomposes char by char, so the key of a substring is always
/// a substring of the key of the whole string, and a decomposed query
/// ("E\u{301}vry") folds like the composed one. Without folding the text is
/// composed first so both spellings still meet.
pub fn fold(text: &str, fold_accents: bool) -> String {
    let mut key = String::with_capacity(text.len());
    if !fold_accents {
        key.extend(text.nfc().flat_map(char::to_lowercase));
        return key;
    }

    for c in text.chars() {
        decompose_canonical(c, |part| {
            if is_combining_mark(part) {
                return;
            }
            for lower in part.to_lowercase() {
                push_spelled_out(&mut key, lower);
            }
        });
    }
    key
}

fn push_spelled_out(key: &mut String, c: char) {
    match c {
        'œ' => key.push_str("oe"),
        'æ' => key.push_str("ae"),
        '\u{2019}' | '\u{2018}' => key.push('\''),
        other => key.push(other),
    }
}

/// True when `at` in `haystack` starts a word: beginning of the name, or right
/// after a space, hyphen or apostrophe ("Saint-Étienne", "L'Haÿ-les-Roses").
pub fn is_word_start(haystack: &str, at: usize) -> bool {
    at == 0
        || haystack[..at]
            .chars()
            .next_back()
            .is_some_and(|c| matches!(c, ' ' | '-' | '\''))
}
