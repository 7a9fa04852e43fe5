use crate::core::classify;
use crate::core::directory::Directory;
use crate::domain::model::{CommuneRecord, TaxDetails, TaxNotice};

/// A discrete user action on the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The search text changed. Blank text clears the session.
    Input(String),
    /// Pick the candidate at this 1-based position.
    Choose(usize),
    ChooseCode(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState<'d> {
    Idle,
    Typing {
        query: String,
    },
    Selected {
        query: String,
        record: &'d CommuneRecord,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Idle,
    Typing,
    Selected,
}

impl SessionState<'_> {
    pub fn kind(&self) -> StateKind {
        match self {
            SessionState::Idle => StateKind::Idle,
            SessionState::Typing { .. } => StateKind::Typing,
            SessionState::Selected { .. } => StateKind::Selected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: StateKind, to: StateKind },
    /// The event does not apply in the current state; nothing changed.
    Ignored,
}

/// Search-and-select interaction over an injected directory.
///
/// All transitions are synchronous; the current state is replaced wholesale
/// on every accepted event.
pub struct Session<'d> {
    directory: &'d Directory,
    max_candidates: usize,
    state: SessionState<'d>,
    candidates: Vec<&'d CommuneRecord>,
}

impl<'d> Session<'d> {
    pub fn new(directory: &'d Directory, max_candidates: usize) -> Self {
        Self {
            directory,
            max_candidates,
            state: SessionState::Idle,
            candidates: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState<'d> {
        &self.state
    }

    pub fn candidates(&self) -> &[&'d CommuneRecord] {
        &self.candidates
    }

    pub fn selection(&self) -> Option<&'d CommuneRecord> {
        match self.state {
            SessionState::Selected { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<TaxNotice> {
        self.selection().map(classify::classify)
    }

    pub fn details(&self) -> Option<TaxDetails> {
        self.selection()
            .and_then(|record| classify::details(record.tax_type))
    }

    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        let from = self.state.kind();
        let next = match event {
            SessionEvent::Input(text) if text.trim().is_empty() => Some(self.idle()),
            SessionEvent::Input(text) => Some(self.typing(text)),
            SessionEvent::Clear => Some(self.idle()),
            SessionEvent::Choose(position) => {
                let picked = position
                    .checked_sub(1)
                    .and_then(|index| self.candidates.get(index).copied());
                self.select(picked)
            }
            SessionEvent::ChooseCode(code) => {
                let picked = self
                    .candidates
                    .iter()
                    .copied()
                    .find(|record| record.code == code.trim());
                self.select(picked)
            }
        };

        match next {
            Some(state) => {
                self.state = state;
                let to = self.state.kind();
                tracing::debug!(?from, ?to, "Session transition");
                Transition::Moved { from, to }
            }
            None => {
                tracing::warn!(?from, "Ignored selection event");
                Transition::Ignored
            }
        }
    }

    fn idle(&mut self) -> SessionState<'d> {
        self.candidates.clear();
        SessionState::Idle
    }

    fn typing(&mut self, text: String) -> SessionState<'d> {
        self.candidates = self.directory.suggest(&text, self.max_candidates);
        SessionState::Typing { query: text }
    }

    fn select(&mut self, picked: Option<&'d CommuneRecord>) -> Option<SessionState<'d>> {
        let query = match &self.state {
            SessionState::Typing { query } => query.clone(),
            // 只有輸入中才能選取候選
            _ => return None,
        };
        let record = picked?;
        self.candidates.clear();
        Some(SessionState::Selected { query, record })
    }
}
