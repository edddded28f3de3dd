//! Configuration management for the registry.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the snapshot files (`EXPOPASS_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Seed sample exhibitions and passes into an empty registry
    /// (`EXPOPASS_SEED_SAMPLE_DATA`)
    pub seed_sample_data: bool,
    /// Log filter used when `RUST_LOG` is unset (`EXPOPASS_LOG`)
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("storage/data"),
            seed_sample_data: true,
            log_filter: "info,expopass_registry=debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to [`Config::default`].
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("EXPOPASS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            seed_sample_data: env::var("EXPOPASS_SEED_SAMPLE_DATA")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.seed_sample_data),
            log_filter: env::var("EXPOPASS_LOG").unwrap_or(defaults.log_filter),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("storage/data"));
        assert!(config.seed_sample_data);
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
