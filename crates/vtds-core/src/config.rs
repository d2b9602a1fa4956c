use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime configuration for the dataset builder, read from `VTDS_*` env vars.
#[derive(Clone)]
pub struct AppConfig {
    /// YouTube Data API key. Optional so that load-only commands can run
    /// without one; collection requires it.
    pub youtube_api_key: Option<String>,
    pub save_dir: PathBuf,
    pub log_level: String,
    /// Maximum number of items in the emitted dataset.
    pub dataset_max: usize,
    /// Checkpoint the merged map every this many collected records.
    pub checkpoint_interval: usize,
    /// Pretty-print persisted JSON.
    pub pretty_output: bool,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("save_dir", &self.save_dir)
            .field("log_level", &self.log_level)
            .field("dataset_max", &self.dataset_max)
            .field("checkpoint_interval", &self.checkpoint_interval)
            .field("pretty_output", &self.pretty_output)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing logic is decoupled from the real environment so tests can feed
/// it a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let youtube_api_key = lookup("VTDS_YOUTUBE_API_KEY").ok();
    let save_dir = PathBuf::from(or_default("VTDS_SAVE_DIR", "dataset"));
    let log_level = or_default("VTDS_LOG_LEVEL", "info");
    let dataset_max = parse_usize("VTDS_DATASET_MAX", "100")?;
    let checkpoint_interval = parse_usize("VTDS_CHECKPOINT_INTERVAL", "20")?;
    let pretty_output = parse_bool("VTDS_PRETTY_OUTPUT", "true")?;
    let request_timeout_secs = parse_u64("VTDS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VTDS_USER_AGENT", "vtds/0.1 (dataset-builder)");

    Ok(AppConfig {
        youtube_api_key,
        save_dir,
        log_level,
        dataset_max,
        checkpoint_interval,
        pretty_output,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn defaults_apply_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.youtube_api_key.is_none());
        assert_eq!(cfg.save_dir, PathBuf::from("dataset"));
        assert_eq!(cfg.dataset_max, 100);
        assert_eq!(cfg.checkpoint_interval, 20);
        assert!(cfg.pretty_output);
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn overrides_are_read() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VTDS_YOUTUBE_API_KEY", "key123");
        map.insert("VTDS_DATASET_MAX", "50");
        map.insert("VTDS_CHECKPOINT_INTERVAL", "5");
        map.insert("VTDS_PRETTY_OUTPUT", "false");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.youtube_api_key.as_deref(), Some("key123"));
        assert_eq!(cfg.dataset_max, 50);
        assert_eq!(cfg.checkpoint_interval, 5);
        assert!(!cfg.pretty_output);
    }

    #[test]
    fn invalid_numeric_value_is_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VTDS_DATASET_MAX", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VTDS_DATASET_MAX"),
            "expected InvalidEnvVar(VTDS_DATASET_MAX), got: {result:?}"
        );
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VTDS_YOUTUBE_API_KEY", "secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[redacted]"));
    }
}
