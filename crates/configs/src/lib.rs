//! artmap/crates/configs/src/lib.rs
//!
//! Layered settings (defaults, optional `artmap.toml`, `ARTMAP__*`
//! environment) and API key resolution.

pub mod secrets;

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub use secrets::{resolve_api_key, resolve_api_key_from, API_KEY_VAR, DEFAULT_SECRETS_DIR, SECRETS_DIR_VAR};

pub const ENV_PREFIX: &str = "ARTMAP";
pub const CONFIG_FILE: &str = "artmap";

pub const DEFAULT_BOARD_URL: &str = "https://padlet.com/CSS2025/css_-1_map-blwpq840o1u57awd";
pub const DEFAULT_API_BASE_URL: &str = "https://api.padlet.dev/v1";
pub const DEFAULT_DATA_DIR: &str = "css_art_map_data";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in any source
    #[error("no board API key: set PADLET_API_KEY or provide a secret file")]
    MissingApiKey,
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("failed to read secret file {path}: {source}")]
    SecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads `.env` from the working directory or its parents into the process
/// environment. Variables already set are kept.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardSettings {
    /// Share URL; the board id is derived from it when `id` is unset
    pub url: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModerationSettings {
    pub blocked_words: Vec<String>,
    pub max_links: usize,
    pub flag_antarctica: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AutoRespondSettings {
    pub post_comments: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleSettings {
    /// Local hour (0-23) of the daily report
    pub report_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub board: BoardSettings,
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub moderation: ModerationSettings,
    pub auto_respond: AutoRespondSettings,
    pub schedule: ScheduleSettings,
}

impl Settings {
    /// Reads `artmap.toml` from the working directory (if any) and the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(Some(CONFIG_FILE), config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Defaults, then the optional config file, then `env`.
    pub fn from_sources(file: Option<&str>, env: config::Environment) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("board.url", DEFAULT_BOARD_URL)?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("api.max_retries", 3_i64)?
            .set_default("storage.data_dir", DEFAULT_DATA_DIR)?
            .set_default("moderation.blocked_words", vec!["광고", "홍보", "판매", "할인"])?
            .set_default("moderation.max_links", 3_i64)?
            .set_default("moderation.flag_antarctica", true)?
            .set_default("auto_respond.post_comments", false)?
            .set_default("schedule.report_hour", 21_i64)?;

        if let Some(name) = file {
            builder = builder.add_source(config::File::with_name(name).required(false));
        }

        let settings: Settings = builder
            .add_source(
                env.separator("__")
                    .list_separator(",")
                    .with_list_parse_key("moderation.blocked_words")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if settings.schedule.report_hour > 23 {
            return Err(config::ConfigError::Message(format!(
                "schedule.report_hour must be 0-23, got {}",
                settings.schedule.report_hour
            ))
            .into());
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(None, env(&[])).unwrap();
        assert_eq!(settings.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.api.timeout_secs, 30);
        assert_eq!(settings.storage.data_dir, PathBuf::from("css_art_map_data"));
        assert_eq!(settings.moderation.blocked_words, vec!["광고", "홍보", "판매", "할인"]);
        assert_eq!(settings.moderation.max_links, 3);
        assert!(settings.moderation.flag_antarctica);
        assert!(!settings.auto_respond.post_comments);
        assert_eq!(settings.schedule.report_hour, 21);
        assert_eq!(settings.board.id, None);
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::from_sources(
            None,
            env(&[
                ("ARTMAP__API__TIMEOUT_SECS", "5"),
                ("ARTMAP__MODERATION__BLOCKED_WORDS", "spam,scam"),
                ("ARTMAP__AUTO_RESPOND__POST_COMMENTS", "true"),
                ("ARTMAP__BOARD__ID", "abcdefghijklmnop"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.api.timeout_secs, 5);
        assert_eq!(settings.moderation.blocked_words, vec!["spam", "scam"]);
        assert!(settings.auto_respond.post_comments);
        assert_eq!(settings.board.id.as_deref(), Some("abcdefghijklmnop"));
    }

    #[test]
    fn test_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artmap.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/tmp/art\"\n[schedule]\nreport_hour = 22\n").unwrap();
        let name = dir.path().join("artmap");
        let settings = Settings::from_sources(name.to_str(), env(&[("ARTMAP__SCHEDULE__REPORT_HOUR", "20")])).unwrap();
        assert_eq!(settings.storage.data_dir, PathBuf::from("/tmp/art"));
        assert_eq!(settings.schedule.report_hour, 20);
    }

    #[test]
    fn test_report_hour_validated() {
        let err = Settings::from_sources(None, env(&[("ARTMAP__SCHEDULE__REPORT_HOUR", "24")])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
