use crate::domain::ports::{EmptyQueryPolicy, SearchSettings};
use crate::utils::error::{Result, VacancyError};
use crate::utils::validation::{validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_CANDIDATES: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub empty_query: Option<EmptyQueryPolicy>,
    pub max_candidates: Option<usize>,
    pub fold_accents: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: Option<bool>,
    pub show_links: Option<bool>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VacancyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VacancyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VacancyError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 是否啟用色彩輸出 (實際輸出仍需為終端機)
    pub fn color(&self) -> bool {
        self.display.color.unwrap_or(true)
    }

    /// 是否在段落後顯示參考連結
    pub fn show_links(&self) -> bool {
        self.display.show_links.unwrap_or(true)
    }
}

impl SearchSettings for AppConfig {
    fn empty_query(&self) -> EmptyQueryPolicy {
        self.search.empty_query.unwrap_or_default()
    }

    fn max_candidates(&self) -> usize {
        self.search.max_candidates.unwrap_or(DEFAULT_MAX_CANDIDATES)
    }

    fn fold_accents(&self) -> bool {
        self.search.fold_accents.unwrap_or(true)
    }
}

impl Validate for AppConfig {
    /// 驗證配置的合理性
    fn validate(&self) -> Result<()> {
        // 驗證候選清單長度
        if let Some(max) = self.search.max_candidates {
            validate_positive_number("search.max_candidates", max, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_config() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.empty_query(), EmptyQueryPolicy::None);
        assert_eq!(config.max_candidates(), DEFAULT_MAX_CANDIDATES);
        assert!(config.fold_accents());
        assert!(config.color());
        assert!(config.show_links());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[search]
empty_query = "all"
max_candidates = 3
fold_accents = false

[display]
color = false
show_links = false
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.empty_query(), EmptyQueryPolicy::All);
        assert_eq!(config.max_candidates(), 3);
        assert!(!config.fold_accents());
        assert!(!config.color());
        assert!(!config.show_links());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TAXE_VACANCE_TEST_MAX", "4");

        let config = AppConfig::from_toml_str("[search]\nmax_candidates = ${TAXE_VACANCE_TEST_MAX}\n")
            .unwrap();
        assert_eq!(config.max_candidates(), 4);

        std::env::remove_var("TAXE_VACANCE_TEST_MAX");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[search]\nmax_candidates = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(VacancyError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_keys_and_policies() {
        assert!(AppConfig::from_toml_str("[search]\nempty_query = \"some\"\n").is_err());
        assert!(AppConfig::from_toml_str("[search]\nlimit = 3\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\nshow_links = false\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert!(!config.show_links());
        assert!(AppConfig::from_file("/nonexistent/taxe-vacance.toml").is_err());
    }
}
