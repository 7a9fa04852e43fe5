use crate::core::normalize::{fold, is_word_start};
use crate::domain::model::{CommuneRecord, TaxType};
use crate::domain::ports::{CommuneSource, EmptyQueryPolicy, SearchSettings};
use crate::utils::error::{Result, VacancyError};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub empty_query: EmptyQueryPolicy,
    pub fold_accents: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            empty_query: EmptyQueryPolicy::None,
            fold_accents: true,
        }
    }
}

impl SearchOptions {
    pub fn from_settings<S: SearchSettings + ?Sized>(settings: &S) -> Self {
        Self {
            empty_query: settings.empty_query(),
            fold_accents: settings.fold_accents(),
        }
    }
}

/// How well a commune name matches a query, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    Exact,
    Prefix,
    WordPrefix,
    Substring,
}

/// Immutable, queryable set of communes.
///
/// Records are kept sorted by folded name then code, which is the order every
/// query returns them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    records: Vec<CommuneRecord>,
    keys: Vec<String>,
    by_code: HashMap<String, usize>,
    options: SearchOptions,
}

impl Directory {
    pub fn load<S: CommuneSource + ?Sized>(source: &S, options: SearchOptions) -> Result<Self> {
        let records = source.load_records()?;
        let directory = Self::from_records(records, options)?;
        tracing::debug!("Loaded {} communes into the directory", directory.len());
        Ok(directory)
    }

    pub fn from_records(records: Vec<CommuneRecord>, options: SearchOptions) -> Result<Self> {
        check_unique_codes(&records)?;

        let mut keyed: Vec<(String, CommuneRecord)> = records
            .into_iter()
            .map(|record| (fold(&record.name, options.fold_accents), record))
            .collect();
        keyed.sort_by(|(a_key, a), (b_key, b)| a_key.cmp(b_key).then_with(|| a.code.cmp(&b.code)));

        let (keys, records): (Vec<String>, Vec<CommuneRecord>) = keyed.into_iter().unzip();
        let by_code = records
            .iter()
            .enumerate()
            .map(|(index, record)| (record.code.clone(), index))
            .collect();

        Ok(Self {
            records,
            keys,
            by_code,
            options,
        })
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn records(&self) -> &[CommuneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&CommuneRecord> {
        self.by_code
            .get(code.trim())
            .map(|&index| &self.records[index])
    }

    /// Communes whose folded name equals the folded `name`. Several communes
    /// may share a name.
    pub fn find_by_name(&self, name: &str) -> Vec<&CommuneRecord> {
        let key = fold(name.trim(), self.options.fold_accents);
        self.records
            .iter()
            .zip(&self.keys)
            .filter(|(_, candidate)| **candidate == key)
            .map(|(record, _)| record)
            .collect()
    }

    pub fn with_tax_type(&self, tax_type: TaxType) -> impl Iterator<Item = &CommuneRecord> + '_ {
        self.records
            .iter()
            .filter(move |record| record.tax_type == tax_type)
    }

    /// Lazily yields every commune whose name contains `query`, ignoring case
    /// (and accents when enabled), in alphabetical order. Surrounding whitespace
    /// is ignored unless the query is only whitespace, which is matched as typed.
    /// A query that folds to nothing follows the configured empty-query policy.
    pub fn search(&self, query: &str) -> Matches<'_> {
        tracing::debug!(query, "Searching directory");
        Matches {
            records: self.records.iter().zip(self.keys.iter()),
            needle: self.needle(query),
        }
    }

    /// Autocomplete candidates: at most `limit` matches, best match quality
    /// first, alphabetical within the same quality.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&CommuneRecord> {
        let mut matches = self.search(query);
        let mut ranked: Vec<(MatchRank, &CommuneRecord)> = Vec::new();
        while let Some((record, key)) = matches.next_keyed() {
            ranked.push((matches.needle.rank(key), record));
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect()
    }

    fn needle(&self, query: &str) -> Needle {
        let trimmed = match query.trim() {
            "" => query,
            trimmed => trimmed,
        };
        let key = fold(trimmed, self.options.fold_accents);
        if !key.is_empty() {
            return Needle::Text(key);
        }
        match self.options.empty_query {
            EmptyQueryPolicy::None => Needle::Nothing,
            EmptyQueryPolicy::All => Needle::Everything,
        }
    }
}

/// Ranks a folded name `key` against a folded, non-empty `needle` it contains.
pub fn match_rank(key: &str, needle: &str) -> MatchRank {
    if key == needle {
        return MatchRank::Exact;
    }
    if key.starts_with(needle) {
        return MatchRank::Prefix;
    }
    if key
        .match_indices(needle)
        .any(|(at, _)| is_word_start(key, at))
    {
        return MatchRank::WordPrefix;
    }
    MatchRank::Substring
}

fn check_unique_codes(records: &[CommuneRecord]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if let Some(first) = seen.insert(record.code.as_str(), index) {
            return Err(VacancyError::DuplicateCode {
                code: record.code.clone(),
                first: first + 1,
                second: index + 1,
            });
        }
    }
    Ok(())
}

enum Needle {
    Nothing,
    Everything,
    Text(String),
}

impl Needle {
    fn rank(&self, key: &str) -> MatchRank {
        match self {
            Needle::Text(needle) => match_rank(key, needle),
            Needle::Nothing | Needle::Everything => MatchRank::Exact,
        }
    }
}

/// Iterator returned by [`Directory::search`].
pub struct Matches<'a> {
    records: std::iter::Zip<std::slice::Iter<'a, CommuneRecord>, std::slice::Iter<'a, String>>,
    needle: Needle,
}

impl<'a> Matches<'a> {
    fn next_keyed(&mut self) -> Option<(&'a CommuneRecord, &'a String)> {
        match &self.needle {
            Needle::Nothing => None,
            Needle::Everything => self.records.next(),
            Needle::Text(needle) => self
                .records
                .by_ref()
                .find(|(_, key)| key.contains(needle.as_str())),
        }
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a CommuneRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_keyed().map(|(record, _)| record)
    }
}
