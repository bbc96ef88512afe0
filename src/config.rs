//! Extractor configuration: endpoints, session cookie and bridge timing.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. `config.json` in the config directory (see [`crate::utils::get_config_dir`])
//! 3. `CHATGPT_*` environment variables
//! 4. Command-line flags (applied by the CLI)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ExtractorError, Result};
use crate::utils::get_config_dir;

pub const CONFIG_FILENAME: &str = "config.json";

pub const BASE_URL_ENV: &str = "CHATGPT_BASE_URL";
pub const SESSION_TOKEN_ENV: &str = "CHATGPT_SESSION_TOKEN";
pub const SETTLE_DELAY_ENV: &str = "CHATGPT_SETTLE_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_session_path")]
    pub session_path: String,
    #[serde(default = "default_conversation_path")]
    pub conversation_path: String,
    /// Path segment that precedes the conversation id in page URLs (`/c/<id>`)
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Page locations must be on this host for an extraction to start
    #[serde(default = "default_allowed_host")]
    pub allowed_host: String,
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    /// Wait after installing a responder before sending the extraction request
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Path to config file (not serialized)
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_base_url() -> String {
    "https://chatgpt.com".into()
}
fn default_session_path() -> String {
    "/api/auth/session".into()
}
fn default_conversation_path() -> String {
    "/backend-api/conversation/".into()
}
fn default_path_prefix() -> String {
    "c".into()
}
fn default_allowed_host() -> String {
    "chatgpt.com".into()
}
fn default_session_cookie_name() -> String {
    "__Secure-next-auth.session-token".into()
}
fn default_settle_delay_ms() -> u64 {
    500
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_path: default_session_path(),
            conversation_path: default_conversation_path(),
            path_prefix: default_path_prefix(),
            allowed_host: default_allowed_host(),
            session_cookie_name: default_session_cookie_name(),
            session_token: None,
            settle_delay_ms: default_settle_delay_ms(),
            config_path: PathBuf::new(),
        }
    }
}

impl ExtractorConfig {
    /// Load config from `config.json` in `config_dir`, or return defaults.
    ///
    /// A missing file is normal; an unreadable or invalid one is logged and ignored.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILENAME);
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str::<ExtractorConfig>(&contents) {
                Ok(config) => {
                    debug!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring invalid config {}: {}", config_path.display(), e);
                    ExtractorConfig::default()
                }
            },
            Err(_) => ExtractorConfig::default(),
        };
        config.config_path = config_path;
        config
    }

    /// Load from the default config directory and apply environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::load(&get_config_dir()?);
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `CHATGPT_*` overrides using the given variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(token) = lookup(SESSION_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.session_token = Some(token);
        }
        if let Some(delay) = lookup(SETTLE_DELAY_ENV) {
            self.settle_delay_ms = delay.trim().parse().map_err(|_| {
                ExtractorError::Config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    SETTLE_DELAY_ENV, delay
                ))
            })?;
        }
        Ok(())
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.config_path, json)?;
        Ok(())
    }

    pub fn session_url(&self) -> String {
        join_url(&self.base_url, &self.session_path)
    }

    pub fn conversation_url(&self, conversation_id: &str) -> String {
        let base = join_url(&self.base_url, &self.conversation_path);
        format!("{}/{}", base.trim_end_matches('/'), conversation_id)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ExtractorConfig::default();
        assert_eq!(config.session_url(), "https://chatgpt.com/api/auth/session");
        assert_eq!(
            config.conversation_url("abc-123"),
            "https://chatgpt.com/backend-api/conversation/abc-123"
        );
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_endpoints_with_trailing_slash_base() {
        let config =
            ExtractorConfig { base_url: "http://127.0.0.1:8080/".into(), ..Default::default() };
        assert_eq!(config.session_url(), "http://127.0.0.1:8080/api/auth/session");
        assert_eq!(
            config.conversation_url("x"),
            "http://127.0.0.1:8080/backend-api/conversation/x"
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ExtractorConfig::load(dir.path());

        assert_eq!(config.base_url, "https://chatgpt.com");
        assert_eq!(config.config_path, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"session_token":"tok","settle_delay_ms":50}"#,
        )
        .unwrap();

        let config = ExtractorConfig::load(dir.path());
        assert_eq!(config.session_token.as_deref(), Some("tok"));
        assert_eq!(config.settle_delay_ms, 50);
        assert_eq!(config.session_path, "/api/auth/session");
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "not json").unwrap();

        let config = ExtractorConfig::load(dir.path());
        assert_eq!(config.settle_delay_ms, 500);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = ExtractorConfig::load(&dir.path().join("nested"));
        config.allowed_host = "chat.example.com".into();
        config.save().unwrap();

        let reloaded = ExtractorConfig::load(&dir.path().join("nested"));
        assert_eq!(reloaded.allowed_host, "chat.example.com");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (BASE_URL_ENV, "http://localhost:9000"),
            (SESSION_TOKEN_ENV, "cookie-value"),
            (SETTLE_DELAY_ENV, "25"),
        ]);

        let mut config = ExtractorConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.session_token.as_deref(), Some("cookie-value"));
        assert_eq!(config.settle_delay_ms, 25);
    }

    #[test]
    fn test_env_override_rejects_bad_delay() {
        let mut config = ExtractorConfig::default();
        let err = config
            .apply_overrides(|key| (key == SETTLE_DELAY_ENV).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ExtractorError::Config(_)));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = ExtractorConfig::default();
        config.apply_overrides(|key| (key != SETTLE_DELAY_ENV).then(String::new)).unwrap();
        assert_eq!(config.base_url, "https://chatgpt.com");
        assert!(config.session_token.is_none());
    }
}
