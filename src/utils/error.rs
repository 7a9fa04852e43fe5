use thiserror::Error;

#[derive(Error, Debug)]
pub enum VacancyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed dataset at line {line}: {reason}")]
    MalformedDataset { line: u64, reason: String },

    #[error("Duplicate commune code '{code}' (records #{first} and #{second})")]
    DuplicateCode {
        code: String,
        first: usize,
        second: usize,
    },

    #[error("Unknown tax classification: '{value}'")]
    DataIntegrityError { value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Dataset,
    Integrity,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VacancyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VacancyError::IoError(_) => ErrorCategory::System,
            VacancyError::CsvError(_)
            | VacancyError::MalformedDataset { .. }
            | VacancyError::DuplicateCode { .. } => ErrorCategory::Dataset,
            VacancyError::DataIntegrityError { .. } => ErrorCategory::Integrity,
            VacancyError::ConfigError { .. }
            | VacancyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 內建資料無法使用時，其他功能都無法執行
            ErrorCategory::Dataset => ErrorSeverity::Critical,
            ErrorCategory::System => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Integrity => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            VacancyError::IoError(_) => "Check that the file exists and is readable",
            VacancyError::CsvError(_) | VacancyError::MalformedDataset { .. } => {
                "The commune dataset is corrupt; rebuild the tool from a clean checkout"
            }
            VacancyError::DuplicateCode { .. } => {
                "Each commune code must appear once in data/communes.csv"
            }
            VacancyError::DataIntegrityError { .. } => "Use one of TLV, THLV or NONE",
            VacancyError::ConfigError { .. } => "Check the TOML configuration file syntax",
            VacancyError::InvalidConfigValueError { .. } => {
                "Fix the highlighted configuration value"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VacancyError::IoError(e) => format!("Impossible de lire le fichier : {}", e),
            VacancyError::CsvError(_)
            | VacancyError::MalformedDataset { .. }
            | VacancyError::DuplicateCode { .. } => {
                format!("Les données des communes sont invalides ({})", self)
            }
            VacancyError::DataIntegrityError { value } => {
                format!("Classification fiscale inconnue : {}", value)
            }
            VacancyError::ConfigError { .. } | VacancyError::InvalidConfigValueError { .. } => {
                format!("Configuration invalide : {}", self)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, VacancyError>;
