use crate::domain::model::CommuneRecord;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Where the commune records come from. Implementations must be deterministic:
/// two calls return value-equal sequences.
pub trait CommuneSource {
    fn load_records(&self) -> Result<Vec<CommuneRecord>>;
}

/// What an empty query (one that folds to nothing) returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyQueryPolicy {
    #[default]
    None,
    All,
}

pub trait SearchSettings {
    fn empty_query(&self) -> EmptyQueryPolicy;
    fn max_candidates(&self) -> usize;
    fn fold_accents(&self) -> bool;
}
