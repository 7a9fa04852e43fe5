pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::Cli;
pub use crate::config::AppConfig;

pub use crate::adapters::CsvDataset;
pub use crate::core::directory::{Directory, SearchOptions};
pub use crate::core::session::{Session, SessionEvent, SessionState};
pub use crate::domain::model::{CommuneRecord, Severity, TaxNotice, TaxType};
pub use crate::utils::error::{Result, VacancyError};
