// Ambassador Launcher Library
//
// Picks the newest generated Envoy bootstrap config and execs Envoy with the
// hot-restart parameters. The binary in main.rs is a thin wrapper.

// Module declarations
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod selection;
pub mod version;

// Re-export public types and functions
pub use command::LaunchPlan;
pub use config::LauncherConfig;
pub use error::{LaunchError, Result};
pub use exec::replace_process;
pub use selection::{find_latest_config, ConfigPattern};

use tracing::{debug, warn};

/// Select the bootstrap config and build the Envoy invocation.
///
/// An empty selection is an error only when `config.require_config` is set;
/// otherwise Envoy receives an empty `-c` and reports the failure itself.
pub fn prepare_launch(config: &LauncherConfig, pattern: &ConfigPattern) -> Result<LaunchPlan> {
    let bootstrap = find_latest_config(&config.config_dir, pattern);

    match &bootstrap {
        Some(path) => debug!("Selected bootstrap config {}", path.display()),
        None if config.require_config => {
            return Err(LaunchError::NoConfig {
                dir: config.config_dir.clone(),
                pattern: pattern.to_string(),
            });
        }
        None => warn!(
            "No {} in {}; starting Envoy without a bootstrap config",
            pattern,
            config.config_dir.display()
        ),
    }

    Ok(LaunchPlan::new(bootstrap.as_deref(), config))
}
