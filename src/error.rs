// Launcher errors
//
// Exit codes follow what a POSIX shell reports when `exec` fails, so a
// supervisor sees the same status it would have seen from the shell entrypoint.

use std::io;
use std::path::PathBuf;

/// Exit status used when no bootstrap config could be selected.
pub const EXIT_NO_CONFIG: i32 = 1;
/// Exit status when the proxy binary exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Exit status when the proxy binary cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// No `envoy*.json` in the config directory (only raised when required)
    #[error("no bootstrap config matching {pattern} in {}", dir.display())]
    NoConfig { dir: PathBuf, pattern: String },

    /// Replacing the process image failed
    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::NoConfig { .. } => EXIT_NO_CONFIG,
            LaunchError::Exec { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                _ => EXIT_NOT_EXECUTABLE,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_exit_codes_match_shell() {
        let missing = LaunchError::Exec {
            program: "envoy".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(missing.exit_code(), 127);

        let denied = LaunchError::Exec {
            program: "envoy".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(denied.exit_code(), 126);
    }

    #[test]
    fn test_no_config_message() {
        let err = LaunchError::NoConfig {
            dir: PathBuf::from("/ambassador"),
            pattern: "envoy*.json".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "no bootstrap config matching envoy*.json in /ambassador"
        );
    }
}
