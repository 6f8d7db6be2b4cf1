// Envoy command line construction

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::LauncherConfig;

pub const ALLOW_DEPRECATED_V1_API: &str = "--allow-deprecated-v1-api";
pub const CONFIG_FLAG: &str = "-c";
pub const RESTART_EPOCH_FLAG: &str = "--restart-epoch";
pub const DRAIN_TIME_FLAG: &str = "--drain-time-s";
pub const PARENT_SHUTDOWN_TIME_FLAG: &str = "--parent-shutdown-time-s";

/// Program and argument vector handed to the proxy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchPlan {
    /// Build the Envoy invocation.
    ///
    /// A missing bootstrap config becomes an empty `-c` value; Envoy then
    /// refuses to start.
    pub fn new(bootstrap: Option<&Path>, config: &LauncherConfig) -> Self {
        let bootstrap = bootstrap
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let args = vec![
            ALLOW_DEPRECATED_V1_API.to_string(),
            CONFIG_FLAG.to_string(),
            bootstrap,
            RESTART_EPOCH_FLAG.to_string(),
            config.restart_epoch.clone(),
            DRAIN_TIME_FLAG.to_string(),
            config.drain_time.clone(),
            PARENT_SHUTDOWN_TIME_FLAG.to_string(),
            config.shutdown_time.clone(),
        ];

        Self {
            program: config.envoy_binary.clone(),
            args,
        }
    }

    /// Append arguments after the fixed flags.
    pub fn with_extra_args<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Value following `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
