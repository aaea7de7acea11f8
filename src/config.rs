use crate::analyzer::trend::TrendVocabulary;
use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecondaryCurrency {
    /// Text searched for in the article, case-insensitively.
    pub needle: String,
    /// Name shown in the script.
    pub name: String,
}

impl SecondaryCurrency {
    fn new(needle: &str, name: &str) -> Self {
        Self {
            needle: needle.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_secondary_currencies() -> Vec<SecondaryCurrency> {
    vec![
        SecondaryCurrency::new("peso", "Peso"),
        SecondaryCurrency::new("yen", "Yen"),
        SecondaryCurrency::new("ringgit", "Ringgit"),
        SecondaryCurrency::new("yuan", "Yuan"),
        SecondaryCurrency::new("won", "Won"),
        SecondaryCurrency::new("baht", "Baht"),
        SecondaryCurrency::new("dolar singapura", "Dolar Singapura"),
        SecondaryCurrency::new("dolar hong kong", "Dolar Hong Kong"),
    ]
}

/// Vocabularies and currency list handed to the record builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub currency_vocabulary: TrendVocabulary,
    pub commodity_vocabulary: TrendVocabulary,
    /// Probed in this order; the record lists them in the same order.
    pub secondary_currencies: Vec<SecondaryCurrency>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            currency_vocabulary: TrendVocabulary::currency(),
            commodity_vocabulary: TrendVocabulary::commodity(),
            secondary_currencies: default_secondary_currencies(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub rupiah_keyword: String,
    pub gold_keyword: String,
    /// Search results tried per keyword.
    pub max_results: usize,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    /// Credited in the footer of every message.
    pub source_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.bloombergtechnoz.com".into(),
            rupiah_keyword: "rupiah".into(),
            gold_keyword: "emas".into(),
            max_results: 3,
            request_timeout_seconds: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .into(),
            source_name: "BloombergTechnoz.com".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub telegram_bot_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Skip the run on Saturdays and Sundays (WIB).
    #[serde(default = "default_skip_weekends")]
    pub skip_weekends: bool,
}

fn default_skip_weekends() -> bool {
    true
}

impl AppConfig {
    /// Replaces secrets with `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` when `lookup` has them.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN").filter(|v| !v.trim().is_empty()) {
            self.telegram_bot_token = token;
        }
        if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID").filter(|v| !v.trim().is_empty()) {
            self.telegram_chat_id = chat_id;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("site.base_url is empty".into()));
        }
        if self.site.max_results == 0 {
            return Err(ConfigError::Invalid("site.max_results must be at least 1".into()));
        }
        if let Some(c) = self
            .extraction
            .secondary_currencies
            .iter()
            .find(|c| c.needle.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "secondary currency '{}' has an empty needle",
                c.name
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_file_gets_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "telegram_bot_token": "abc", "telegram_chat_id": "42" }}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.site.max_results, 3);
        assert_eq!(config.site.source_name, "BloombergTechnoz.com");
        assert!(config.skip_weekends);
        assert_eq!(config.extraction.currency_vocabulary.negative, "melemah");
        assert_eq!(config.extraction.secondary_currencies.len(), 8);
        assert_eq!(config.extraction.secondary_currencies[0].name, "Peso");
    }

    #[test]
    fn vocabularies_can_be_overridden() {
        let raw = r#"{
            "extraction": {
                "commodity_vocabulary": { "positive": "rising", "negative": "falling", "flat": "flat" },
                "secondary_currencies": [ { "needle": "yen", "name": "JPY" } ]
            },
            "skip_weekends": false
        }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.extraction.commodity_vocabulary.positive, "rising");
        assert_eq!(config.extraction.currency_vocabulary, TrendVocabulary::currency());
        assert_eq!(config.extraction.secondary_currencies.len(), 1);
        assert!(!config.skip_weekends);
    }

    #[test]
    fn env_overrides_replace_secrets() {
        let mut config: AppConfig = serde_json::from_str(r#"{ "telegram_bot_token": "file" }"#).unwrap();
        config.apply_overrides(|key| match key {
            "TELEGRAM_BOT_TOKEN" => Some("env-token".into()),
            "TELEGRAM_CHAT_ID" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.telegram_bot_token, "env-token");
        assert_eq!(config.telegram_chat_id, "");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "site": {{ "max_results": 0 }} }}"#).unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config("/nonexistent/kurs-sniper.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
