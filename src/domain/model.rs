use crate::utils::error::VacancyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vacant housing tax regime applied by a commune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// Taxe sur les Logements Vacants, national tax in "zone tendue".
    #[serde(rename = "TLV")]
    Tlv,
    /// Taxe d'Habitation sur les Logements Vacants, adopted by local deliberation.
    #[serde(rename = "THLV")]
    Thlv,
    #[serde(rename = "NONE")]
    None,
}

impl TaxType {
    pub const ALL: [TaxType; 3] = [TaxType::Tlv, TaxType::Thlv, TaxType::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Tlv => "TLV",
            TaxType::Thlv => "THLV",
            TaxType::None => "NONE",
        }
    }

    pub fn is_taxed(&self) -> bool {
        !matches!(self, TaxType::None)
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxType {
    type Err = VacancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TLV" => Ok(TaxType::Tlv),
            "THLV" => Ok(TaxType::Thlv),
            "NONE" => Ok(TaxType::None),
            _ => Err(VacancyError::DataIntegrityError {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuneRecord {
    pub name: String,
    /// INSEE code, unique across the directory.
    pub code: String,
    pub tax_type: TaxType,
}

impl CommuneRecord {
    pub fn new(name: impl Into<String>, code: impl Into<String>, tax_type: TaxType) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            tax_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    /// Only used for the fallback notice when a classification cannot be mapped.
    Error,
}

/// Payload shown for a selected commune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxNotice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

/// A piece of explanatory text, optionally pointing at an external reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub text: String,
    pub links: Vec<Link>,
}

/// Conditions and alternatives sections, only present for taxed communes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxDetails {
    pub conditions_heading: String,
    pub conditions: Vec<Paragraph>,
    pub alternatives_heading: String,
    pub alternatives: Vec<Paragraph>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_classifications() {
        assert_eq!("TLV".parse::<TaxType>().unwrap(), TaxType::Tlv);
        assert_eq!(" thlv ".parse::<TaxType>().unwrap(), TaxType::Thlv);
        assert_eq!("NONE".parse::<TaxType>().unwrap(), TaxType::None);
    }

    #[test]
    fn unknown_classification_is_integrity_error() {
        let err = "TLV+THLV".parse::<TaxType>().unwrap_err();
        assert!(matches!(err, VacancyError::DataIntegrityError { ref value } if value == "TLV+THLV"));
        assert!("".parse::<TaxType>().is_err());
    }

    #[test]
    fn display_matches_dataset_spelling() {
        for tax_type in TaxType::ALL {
            assert_eq!(tax_type.to_string().parse::<TaxType>().unwrap(), tax_type);
        }
        assert_eq!(serde_json::to_string(&TaxType::Thlv).unwrap(), "\"THLV\"");
    }
}
