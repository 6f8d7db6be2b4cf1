// Ambassador Launcher - Envoy container entrypoint

use ambassador_launcher::{
    prepare_launch, replace_process, ConfigPattern, LaunchError, LauncherConfig,
};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Start Envoy with the newest generated bootstrap config
///
/// With no arguments every setting comes from the environment
/// (AMBASSADOR_DRAIN_TIME, AMBASSADOR_SHUTDOWN_TIME, RESTART_EPOCH, ...).
#[derive(Parser, Debug)]
#[command(name = "ambassador-launcher")]
#[command(version)]
#[command(about = "Exec Envoy with the newest envoy*.json bootstrap config", long_about = None)]
struct Cli {
    /// Directory holding envoy*.json bootstrap configs
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Envoy binary to exec
    #[arg(long)]
    envoy_binary: Option<String>,

    /// Seconds passed to --drain-time-s
    #[arg(long)]
    drain_time: Option<String>,

    /// Seconds passed to --parent-shutdown-time-s
    #[arg(long)]
    shutdown_time: Option<String>,

    /// Value passed to --restart-epoch
    #[arg(long)]
    restart_epoch: Option<String>,

    /// Fail instead of starting Envoy when no bootstrap config exists
    #[arg(long)]
    require_config: bool,

    /// Print the Envoy command line instead of executing it
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, print the command as JSON
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Extra arguments appended to the Envoy command line (`--` optional)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    envoy_args: Vec<String>,
}

impl Cli {
    /// Command line flags win over the environment.
    fn apply(&self, mut config: LauncherConfig) -> LauncherConfig {
        if let Some(dir) = &self.config_dir {
            config.config_dir = dir.clone();
        }
        if let Some(binary) = &self.envoy_binary {
            config.envoy_binary = binary.clone();
        }
        if let Some(drain_time) = &self.drain_time {
            config.drain_time = drain_time.clone();
        }
        if let Some(shutdown_time) = &self.shutdown_time {
            config.shutdown_time = shutdown_time.clone();
        }
        if let Some(epoch) = &self.restart_epoch {
            config.restart_epoch = epoch.clone();
        }
        config.require_config |= self.require_config;
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        let code = e
            .downcast_ref::<LaunchError>()
            .map(LaunchError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.apply(LauncherConfig::from_env());
    tracing::debug!("Resolved launcher config: {:?}", config);

    let plan = prepare_launch(&config, &ConfigPattern::default())?
        .with_extra_args(cli.envoy_args);

    if cli.dry_run {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            println!("{}", plan);
        }
        return Ok(());
    }

    // Only reached when exec failed
    Err(replace_process(&plan).into())
}
