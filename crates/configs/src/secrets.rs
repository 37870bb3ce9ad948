//! Board API key lookup. The key lives only in a `SecretString` and is
//! never given a fallback value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::ConfigError;

pub const API_KEY_VAR: &str = "PADLET_API_KEY";
pub const SECRETS_DIR_VAR: &str = "ARTMAP_SECRETS_DIR";
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Resolves the key from the explicit value, the secret file or the
/// `PADLET_API_KEY` environment variable, in that order.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<SecretString, ConfigError> {
    let secrets_dir = std::env::var_os(SECRETS_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_DIR));
    resolve_api_key_from(explicit, &secrets_dir, std::env::var(API_KEY_VAR).ok())
}

pub fn resolve_api_key_from(
    explicit: Option<&str>,
    secrets_dir: &Path,
    env_value: Option<String>,
) -> Result<SecretString, ConfigError> {
    if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
        debug!(source = "explicit", "board API key resolved");
        return Ok(SecretString::from(key.to_string()));
    }

    if let Some(key) = read_secret(secrets_dir, API_KEY_VAR)? {
        debug!(source = "secret_file", "board API key resolved");
        return Ok(SecretString::from(key));
    }

    match env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(key) => {
            debug!(source = "environment", "board API key resolved");
            Ok(SecretString::from(key))
        }
        None => Err(ConfigError::MissingApiKey),
    }
}

/// Trimmed contents of `<dir>/<name>`. A missing or empty file is `None`;
/// any other read failure is an error.
fn read_secret(dir: &Path, name: &str) -> Result<Option<String>, ConfigError> {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(contents.trim().to_string()).filter(|s| !s.is_empty())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => {
            warn!(path = %path.display(), error = %source, "secret file unreadable");
            Err(ConfigError::SecretFile { path, source })
        }
    }
}
