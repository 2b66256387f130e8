use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const CONFIG_FILE: &str = "taskdeck.toml";

const DEFAULT_CONFIG_TOML: &str = include_str!("../../../taskdeck.toml");

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub command: String,
    pub args: Vec<String>,
    pub autostart: bool,
    pub startup_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            command: "python3".to_string(),
            args: vec!["-m".to_string(), "backend.main".to_string()],
            autostart: true,
            startup_timeout_secs: 15,
        }
    }
}

impl BackendConfig {
    /// Base URL with any trailing slash removed, so paths can be joined
    /// with a plain `format!`.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

pub fn parse(text: &str) -> anyhow::Result<AppConfig> {
    toml::from_str(text).context("failed to parse taskdeck configuration")
}

/// Configuration compiled into the binary; the renderer uses this copy
/// since it has no filesystem.
pub fn embedded() -> AppConfig {
    parse(DEFAULT_CONFIG_TOML).unwrap_or_else(|error| {
        warn!(%error, "embedded taskdeck.toml failed to parse; using built-in defaults");
        AppConfig::default()
    })
}

/// Loads configuration for the host shell: first readable, parseable
/// candidate wins, otherwise the embedded copy.
pub fn load() -> AppConfig {
    for candidate in candidate_paths() {
        let Ok(text) = fs::read_to_string(&candidate) else {
            continue;
        };
        match parse(&text) {
            Ok(config) => {
                info!(path = %candidate.display(), "loaded taskdeck configuration");
                return config;
            }
            Err(error) => {
                warn!(
                    path = %candidate.display(),
                    %error,
                    "skipping unparseable taskdeck configuration"
                );
            }
        }
    }

    debug!("no taskdeck.toml on disk; using embedded configuration");
    embedded()
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = std::env::var("TASKDECK_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            candidates.push(PathBuf::from(trimmed));
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut cursor = Some(cwd.as_path());
        while let Some(path) = cursor {
            candidates.push(path.join(CONFIG_FILE));
            cursor = path.parent();
        }
    }

    candidates.push(PathBuf::from(CONFIG_FILE));
    candidates.dedup();
    candidates
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, embedded, parse};

    #[test]
    fn empty_document_gets_full_defaults() {
        let config = parse("").expect("empty config parses");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.base_url(), "http://localhost:5000/api");
        assert!(config.backend.autostart);
    }

    #[test]
    fn partial_backend_table_keeps_remaining_defaults() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://127.0.0.1:9000/api/"
            autostart = false
            "#,
        )
        .expect("partial config parses");
        assert_eq!(config.backend.base_url(), "http://127.0.0.1:9000/api");
        assert!(!config.backend.autostart);
        assert_eq!(config.backend.command, "python3");
        assert_eq!(config.backend.startup_timeout_secs, 15);
    }

    #[test]
    fn embedded_config_always_parses() {
        let config = embedded();
        assert!(config.backend.base_url.starts_with("http://"));
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse("[backend").is_err());
    }
}
