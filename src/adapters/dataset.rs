use crate::domain::model::{CommuneRecord, TaxType};
use crate::domain::ports::CommuneSource;
use crate::utils::error::{Result, VacancyError};
use crate::utils::validation::validate_non_empty_string;
use serde::Deserialize;

const BUNDLED_COMMUNES: &str = include_str!("../../data/communes.csv");

#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    code: String,
    tax_type: String,
}

/// Commune table in CSV form with a `name,code,tax_type` header.
#[derive(Debug, Clone, Copy)]
pub struct CsvDataset<'a> {
    text: &'a str,
}

impl CsvDataset<'static> {
    /// The table compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            text: BUNDLED_COMMUNES,
        }
    }
}

impl<'a> CsvDataset<'a> {
    pub fn from_text(text: &'a str) -> Self {
        Self { text }
    }
}

impl CommuneSource for CsvDataset<'_> {
    fn load_records(&self) -> Result<Vec<CommuneRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(self.text.as_bytes());
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            // 錯誤訊息使用 CSV 行號 (含標題列)
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawRow = row
                .deserialize(Some(&headers))
                .map_err(|e| malformed(line, e.to_string()))?;

            // 驗證必填欄位
            validate_non_empty_string("name", &raw.name).map_err(|e| malformed(line, e.to_string()))?;
            validate_non_empty_string("code", &raw.code).map_err(|e| malformed(line, e.to_string()))?;
            let tax_type = raw
                .tax_type
                .parse::<TaxType>()
                .map_err(|e| malformed(line, e.to_string()))?;

            records.push(CommuneRecord {
                name: raw.name,
                code: raw.code,
                tax_type,
            });
        }

        if records.is_empty() {
            return Err(malformed(1, "dataset contains no communes".to_string()));
        }

        tracing::debug!("Parsed {} commune rows", records.len());
        Ok(records)
    }
}

fn malformed(line: u64, reason: String) -> VacancyError {
    VacancyError::MalformedDataset { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_parses() {
        let records = CsvDataset::bundled().load_records().unwrap();
        assert!(records.len() > 50);
        let paris = records.iter().find(|r| r.code == "75056").unwrap();
        assert_eq!(paris.name, "Paris");
        assert_eq!(paris.tax_type, TaxType::Tlv);
        assert!(records.iter().any(|r| r.code == "2A004"));
    }

    #[test]
    fn keeps_leading_zeros_in_codes() {
        let records = CsvDataset::bundled().load_records().unwrap();
        assert!(records.iter().any(|r| r.code == "06088" && r.name == "Nice"));
    }

    #[test]
    fn unknown_classification_is_fatal_with_line() {
        let text = "name,code,tax_type\nParis,75056,TLV\nBrest,29019,TLVX\n";
        let err = CsvDataset::from_text(text).load_records().unwrap_err();
        match err {
            VacancyError::MalformedDataset { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("TLVX"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_fields_are_rejected() {
        let text = "name,code,tax_type\n ,75056,TLV\n";
        assert!(matches!(
            CsvDataset::from_text(text).load_records(),
            Err(VacancyError::MalformedDataset { line: 2, .. })
        ));
    }

    #[test]
    fn missing_column_is_rejected() {
        let text = "name,code\nParis,75056\n";
        assert!(matches!(
            CsvDataset::from_text(text).load_records(),
            Err(VacancyError::MalformedDataset { .. })
        ));

        let ragged = "name,code,tax_type\nParis,75056\n";
        assert!(matches!(
            CsvDataset::from_text(ragged).load_records(),
            Err(VacancyError::CsvError(_))
        ));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(CsvDataset::from_text("name,code,tax_type\n").load_records().is_err());
    }
}
