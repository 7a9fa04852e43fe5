use crate::app::render::{LookupView, TextRenderer};
use crate::core::session::{Session, SessionEvent, SessionState, Transition};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const HELP: &str = "Tapez le nom d'une commune. #N choisit la proposition N, =CODE choisit par code INSEE, une ligne vide efface, :q quitte.";

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(SessionEvent),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    match line {
        ":q" | ":quit" => return Command::Quit,
        ":h" | ":help" | "?" => return Command::Help,
        "" => return Command::Event(SessionEvent::Clear),
        _ => {}
    }

    if let Some(position) = line.strip_prefix('#').and_then(|n| n.trim().parse().ok()) {
        return Command::Event(SessionEvent::Choose(position));
    }
    if let Some(code) = line.strip_prefix('=') {
        return Command::Event(SessionEvent::ChooseCode(code.trim().to_string()));
    }
    Command::Event(SessionEvent::Input(line.to_string()))
}

/// Drives a session from line-oriented input until end of input or `:q`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    renderer: &TextRenderer,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", HELP)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let event = match parse_line(&line) {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                write!(output, "> ")?;
                output.flush()?;
                continue;
            }
            Command::Event(event) => event,
        };

        if session.handle(event) == Transition::Ignored {
            writeln!(output, "Choix invalide.")?;
        }
        render_state(session, renderer, &mut output)?;

        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

fn render_state<W: Write>(session: &Session<'_>, renderer: &TextRenderer, output: &mut W) -> Result<()> {
    match session.state() {
        SessionState::Idle => {}
        SessionState::Typing { .. } => {
            write!(output, "{}", renderer.candidates(session.candidates()))?;
        }
        SessionState::Selected { record, .. } => {
            write!(output, "{}", renderer.view(&LookupView::for_record(record)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::{Directory, SearchOptions};
    use crate::domain::model::{CommuneRecord, TaxType};

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line(":q"), Command::Quit);
        assert_eq!(parse_line("  "), Command::Event(SessionEvent::Clear));
        assert_eq!(parse_line("#2"), Command::Event(SessionEvent::Choose(2)));
        assert_eq!(
            parse_line("= 75056"),
            Command::Event(SessionEvent::ChooseCode("75056".to_string()))
        );
        assert_eq!(
            parse_line("#deux"),
            Command::Event(SessionEvent::Input("#deux".to_string()))
        );
        assert_eq!(
            parse_line(" Pari "),
            Command::Event(SessionEvent::Input("Pari".to_string()))
        );
    }

    #[test]
    fn runs_a_scripted_session() {
        let dir = Directory::from_records(
            vec![
                CommuneRecord::new("Paris", "75056", TaxType::Tlv),
                CommuneRecord::new("Parisot", "81202", TaxType::None),
            ],
            SearchOptions::default(),
        )
        .unwrap();
        let mut session = Session::new(&dir, 5);
        let mut output = Vec::new();

        run(
            &mut session,
            &TextRenderer::default(),
            "Pari\n#3\n#1\n:q\nignored\n".as_bytes(),
            &mut output,
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("  1. Paris (75056)"));
        assert!(text.contains("Choix invalide."));
        assert!(text.contains("zone tendue"));
        assert_eq!(session.selection().unwrap().code, "75056");
    }
}
