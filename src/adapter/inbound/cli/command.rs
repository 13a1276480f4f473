//! Command-line interface definitions.
//!
//! Defines the CLI structure for the crawler using `clap`: the `run`
//! subcommand that boots every module and holds the process until Ctrl-C,
//! plus configuration and startup diagnostics.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Bootstrap orchestrator and IP whitelist gate for the crawling platform
#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the crawler CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Boot every module and run until interrupted
    Run(Box<RunArgs>),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `crawler check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
    /// Initialize every module, report readiness, and shut down again.
    Startup(ConfigPathArg),
}

/// Subcommands for `crawler config`.
///
/// Generates a documented configuration file or prints the effective one.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` subcommand.
///
/// Optional fields override the corresponding configuration file values.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of text logs.
    #[arg(long)]
    pub json_logs: bool,

    /// Skip the startup banner.
    #[arg(long)]
    pub no_banner: bool,

    /// Seed the whitelist with this IP (repeatable).
    #[arg(long = "whitelist", value_name = "IP")]
    pub whitelist: Vec<String>,

    /// Start even when the whitelist is empty.
    #[arg(long)]
    pub allow_empty_whitelist: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_collects_repeated_whitelist_flags() {
        let cli = Cli::parse_from([
            "crawler",
            "run",
            "--whitelist",
            "192.0.2.1",
            "--whitelist",
            "192.0.2.2",
            "--log-level",
            "debug",
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.whitelist, vec!["192.0.2.1", "192.0.2.2"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, paths::default_config());
        assert!(!args.allow_empty_whitelist);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::parse_from(["crawler", "check", "startup", "--json", "-c", "x.toml"]);
        assert!(cli.json);
        let Commands::Check(CheckCommand::Startup(arg)) = cli.command else {
            panic!("expected check startup");
        };
        assert_eq!(arg.config, PathBuf::from("x.toml"));
    }
}
