// Launcher configuration
//
// Every value comes from the environment. A variable that is set but empty
// counts as unset, like `${VAR:-default}` in a shell.

use std::env::{self, VarError};
use std::path::PathBuf;
use tracing::warn;

pub const DRAIN_TIME_ENV: &str = "AMBASSADOR_DRAIN_TIME";
pub const SHUTDOWN_TIME_ENV: &str = "AMBASSADOR_SHUTDOWN_TIME";
pub const RESTART_EPOCH_ENV: &str = "RESTART_EPOCH";
pub const CONFIG_DIR_ENV: &str = "AMBASSADOR_CONFIG_DIR";
pub const ENVOY_BINARY_ENV: &str = "AMBASSADOR_ENVOY_BINARY";
pub const REQUIRE_CONFIG_ENV: &str = "AMBASSADOR_REQUIRE_CONFIG";

pub const DEFAULT_DRAIN_TIME: &str = "5";
pub const DEFAULT_SHUTDOWN_TIME: &str = "10";
pub const DEFAULT_CONFIG_DIR: &str = "/ambassador";
pub const DEFAULT_ENVOY_BINARY: &str = "/usr/local/bin/envoy";

/// Everything needed to build the Envoy command line.
///
/// Timing values and the restart epoch are kept verbatim; Envoy is the one
/// that validates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherConfig {
    pub config_dir: PathBuf,
    pub envoy_binary: String,
    pub drain_time: String,
    pub shutdown_time: String,
    pub restart_epoch: String,
    pub require_config: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            envoy_binary: DEFAULT_ENVOY_BINARY.to_string(),
            drain_time: DEFAULT_DRAIN_TIME.to_string(),
            shutdown_time: DEFAULT_SHUTDOWN_TIME.to_string(),
            restart_epoch: String::new(),
            require_config: false,
        }
    }
}

impl LauncherConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env_value(key, env::var(key)))
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let config = Self {
            config_dir: get(CONFIG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            envoy_binary: get(ENVOY_BINARY_ENV)
                .unwrap_or_else(|| DEFAULT_ENVOY_BINARY.to_string()),
            drain_time: get(DRAIN_TIME_ENV).unwrap_or_else(|| DEFAULT_DRAIN_TIME.to_string()),
            shutdown_time: get(SHUTDOWN_TIME_ENV)
                .unwrap_or_else(|| DEFAULT_SHUTDOWN_TIME.to_string()),
            // No default: an unset epoch goes through empty
            restart_epoch: lookup(RESTART_EPOCH_ENV).unwrap_or_default(),
            require_config: get(REQUIRE_CONFIG_ENV)
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };

        config.warn_on_suspicious_values();
        config
    }

    fn warn_on_suspicious_values(&self) {
        for (name, value) in [
            (DRAIN_TIME_ENV, &self.drain_time),
            (SHUTDOWN_TIME_ENV, &self.shutdown_time),
        ] {
            if !is_seconds(value) {
                warn!("{} is not a whole number of seconds: '{}'", name, value);
            }
        }
    }
}

// Non UTF-8 values cannot go into the argv; warn and treat them as unset
fn env_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            warn!("{} is not valid UTF-8 ({:?}); treating it as unset", key, raw);
            None
        }
    }
}

fn is_seconds(value: &str) -> bool {
    value.parse::<u64>().is_ok()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
