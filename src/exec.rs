// Process replacement
//
// The launcher must become Envoy rather than parent it: the container runtime
// signals PID 1 directly and Envoy's hot restart expects to own that process.

use std::process::Command;
use tracing::debug;

use crate::command::LaunchPlan;
use crate::error::LaunchError;

/// Replace the current process with `plan`.
///
/// Only returns if the replacement failed.
#[cfg(unix)]
pub fn replace_process(plan: &LaunchPlan) -> LaunchError {
    use std::os::unix::process::CommandExt;

    debug!("Exec {}", plan);
    let source = Command::new(&plan.program).args(&plan.args).exec();

    LaunchError::Exec {
        program: plan.program.clone(),
        source,
    }
}

/// Run `plan` to completion and exit with its status.
///
/// There is no exec on this platform, so the closest match is to mirror the
/// child's exit code.
#[cfg(not(unix))]
pub fn replace_process(plan: &LaunchPlan) -> LaunchError {
    debug!("Spawn {}", plan);
    match Command::new(&plan.program).args(&plan.args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => LaunchError::Exec {
            program: plan.program.clone(),
            source,
        },
    }
}
