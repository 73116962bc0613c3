//! Configuration management for the CLI.
//!
//! Values come from a TOML file, then environment variables override
//! individual fields, so secrets like the Gemini key can stay out of the
//! file entirely.

use crate::error::{CliError, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tramita_ai::Backend;
use tramita_sheets::ColumnNames;
use tracing::warn;

/// Default config file name looked up in the working directory.
const LOCAL_CONFIG: &str = "tramita.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model backend selection and settings
    pub ai: AiConfig,

    /// Gazette API settings
    pub comunica: ComunicaConfig,

    /// Spreadsheet access settings
    pub sheets: SheetsConfig,

    /// Spreadsheet column headers
    pub columns: ColumnsConfig,
}

/// Model backend configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Which backend to use
    pub backend: Backend,

    /// Hosted Gemini settings
    pub gemini: GeminiConfig,

    /// Local Ollama settings
    pub ollama: OllamaConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Gemini,
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// Hosted Gemini settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; prefer the GEMINI_API_KEY environment variable
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: tramita_ai::DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

/// Local Ollama settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Server URL
    pub url: String,

    /// Model name
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: tramita_ai::DEFAULT_OLLAMA_URL.to_string(),
            model: tramita_ai::DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

/// Gazette API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComunicaConfig {
    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Minimum delay between consecutive queries in seconds
    pub delay_secs: u64,

    /// Publications analyzed per case, newest first
    pub max_publications: usize,
}

impl Default for ComunicaConfig {
    fn default() -> Self {
        Self {
            base_url: tramita_comunica::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            delay_secs: 2,
            max_publications: 3,
        }
    }
}

/// Spreadsheet access settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Path to the service-account key JSON
    pub credentials_file: PathBuf,

    /// Spreadsheet ID, the long token in the sheet's URL
    pub spreadsheet_id: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from("credentials.json"),
            spreadsheet_id: String::new(),
        }
    }
}

/// Spreadsheet column headers, matching is tolerant to case,
/// underscores and spaces.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Column holding the case number
    pub case_number: String,
    /// Column receiving the status tag
    pub status: String,
    /// Column receiving the check timestamp
    pub last_checked: String,
    /// Column receiving the model summary
    pub ai_summary: String,
    /// Column receiving the newest publication date
    pub last_publication: String,
    /// Column receiving the newest publication type
    pub last_publication_type: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        let names = ColumnNames::default();
        Self {
            case_number: names.case_number,
            status: names.status,
            last_checked: names.last_checked,
            ai_summary: names.ai_summary,
            last_publication: names.last_publication,
            last_publication_type: names.last_publication_type,
        }
    }
}

impl ColumnsConfig {
    /// Convert to the sheets crate's column record.
    pub fn to_column_names(&self) -> ColumnNames {
        ColumnNames {
            case_number: self.case_number.clone(),
            status: self.status.clone(),
            last_checked: self.last_checked.clone(),
            ai_summary: self.ai_summary.clone(),
            last_publication: self.last_publication.clone(),
            last_publication_type: self.last_publication_type.clone(),
        }
    }
}

impl Config {
    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist; otherwise `tramita.toml` in the
    /// working directory is used when present, then
    /// `~/.tramita/config.toml`, then built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => match Self::default_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("could not read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }

        let home = dirs::home_dir()?.join(".tramita").join("config.toml");
        home.exists().then_some(home)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("TRAMITA_AI_PROVIDER") {
            match value.parse::<Backend>() {
                Ok(backend) => self.ai.backend = backend,
                Err(error) => warn!(%error, "ignoring TRAMITA_AI_PROVIDER"),
            }
        }
        if let Ok(value) = env::var("GEMINI_API_KEY") {
            self.ai.gemini.api_key = value;
        }
        if let Ok(value) = env::var("GEMINI_MODEL") {
            self.ai.gemini.model = value;
        }
        if let Ok(value) = env::var("OLLAMA_URL") {
            self.ai.ollama.url = value;
        }
        if let Ok(value) = env::var("OLLAMA_MODEL") {
            self.ai.ollama.model = value;
        }
        if let Ok(value) = env::var("GOOGLE_CREDENTIALS_FILE") {
            self.sheets.credentials_file = PathBuf::from(value);
        }
        if let Ok(value) = env::var("GOOGLE_SPREADSHEET_ID") {
            self.sheets.spreadsheet_id = value;
        }
        if let Ok(value) = env::var("COMUNICA_DELAY_SECS") {
            match value.parse() {
                Ok(secs) => self.comunica.delay_secs = secs,
                Err(_) => warn!(%value, "ignoring non-numeric COMUNICA_DELAY_SECS"),
            }
        }
        if let Ok(value) = env::var("COMUNICA_MAX_RESULTS") {
            match value.parse() {
                Ok(count) => self.comunica.max_publications = count,
                Err(_) => warn!(%value, "ignoring non-numeric COMUNICA_MAX_RESULTS"),
            }
        }
    }

    /// Problems that would prevent a sweep from starting; empty means
    /// the configuration is usable. Backend credentials are only
    /// required when analysis is enabled.
    pub fn validate(&self, require_ai: bool) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.sheets.credentials_file.exists() {
            problems.push(format!(
                "credentials file not found: {}",
                self.sheets.credentials_file.display()
            ));
        }
        if self.sheets.spreadsheet_id.is_empty() {
            problems.push(
                "spreadsheet_id is not set (it is the long token in the sheet's URL)".to_string(),
            );
        }
        if require_ai && self.ai.backend == Backend::Gemini && self.ai.gemini.api_key.is_empty() {
            problems.push("Gemini API key is not set".to_string());
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [ai]
            backend = "ollama"

            [sheets]
            spreadsheet_id = "abc123"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.ai.backend, Backend::Ollama);
        assert_eq!(config.sheets.spreadsheet_id, "abc123");
        assert_eq!(config.comunica.delay_secs, 2);
        assert_eq!(config.columns.case_number, "Processo");
        assert_eq!(config.ai.ollama.url, "http://localhost:11434");
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let err = Config::from_file(Path::new("/does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn validate_flags_missing_essentials() {
        let config = Config {
            sheets: SheetsConfig {
                credentials_file: PathBuf::from("/does/not/exist.json"),
                spreadsheet_id: String::new(),
            },
            ..Config::default()
        };

        let problems = config.validate(true);
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("credentials")));
        assert!(problems.iter().any(|p| p.contains("spreadsheet_id")));
        assert!(problems.iter().any(|p| p.contains("Gemini")));
    }

    #[test]
    fn ollama_backend_needs_no_api_key() {
        let mut config = Config::default();
        config.ai.backend = Backend::Ollama;
        config.sheets.spreadsheet_id = "abc".to_string();

        let problems = config.validate(true);
        assert!(!problems.iter().any(|p| p.contains("Gemini")));
    }

    #[test]
    fn disabled_ai_skips_backend_credentials() {
        let mut config = Config::default();
        config.sheets.spreadsheet_id = "abc".to_string();

        assert!(config.validate(true).iter().any(|p| p.contains("Gemini")));
        assert!(!config.validate(false).iter().any(|p| p.contains("Gemini")));
    }
}
