//! Handler for the `run` command.

use serde_json::json;
use uuid::Uuid;

use crate::adapter::inbound::cli::check::startup;
use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{banner, diagnostic, operator, output};
use crate::domain::record::InitRecord;
use crate::domain::shutdown::ShutdownReport;
use crate::error::Result;
use crate::port::inbound::operator::configuration::ConfigInput;
use crate::port::inbound::operator::runtime::{RunRequest, RunStart, RunStartupSnapshot};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let service = operator::operator()?;
    let request = run_request(args, operator::read_config_toml(&args.config)?, output::is_json());

    let snapshot = service.prepare_run(&request).map_err(|error| {
        if !output::is_json() {
            diagnostic::report_config_error(&request.config, &error);
        }
        error
    })?;

    if !args.no_banner && !output::is_json() && !output::is_quiet() {
        banner::print_banner();
    }
    print_startup_config(&snapshot);

    let running = match service.start_run(&request).await? {
        RunStart::Running(running) => running,
        RunStart::Aborted(aborted) => {
            print_boot(aborted.boot_id, &aborted.records);
            if aborted.refused() {
                output::error("Refusing to start: no whitelisted IPs and empty start is not allowed");
                output::hint("pass --whitelist <IP> or --allow-empty-whitelist");
            }
            print_shutdown(&aborted.shutdown);
            return Err(aborted.error);
        }
    };

    print_boot(running.boot_id, &running.records);
    if running.whitelist_count == 0 {
        output::warning("Whitelist is empty; starting in lenient mode");
    } else {
        output::field("Whitelisted", running.whitelist_count);
    }
    if let Some(ip) = running.source_ipv4 {
        output::field("Source IP", ip);
    }
    if output::verbosity() > 0 && !output::is_json() {
        startup::print_readiness(&running.readiness);
    }

    output::success("Crawler system running");
    output::hint("press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    output::action("Stopping", "modules");
    let stopped = running.session.stop().await;
    if output::verbosity() > 0 {
        output::field("Whitelist checks", stopped.whitelist_checks);
    }
    print_shutdown(&stopped.shutdown);
    stopped.shutdown.into_result()
}

/// Build the run request from command-line arguments.
///
/// Machine-readable output forces JSON logs so stdout stays parseable line
/// by line.
fn run_request(args: &RunArgs, config: ConfigInput, machine_output: bool) -> RunRequest {
    RunRequest {
        config,
        log_level: args.log_level.clone(),
        json_logs: args.json_logs || machine_output,
        allow_empty_whitelist: args.allow_empty_whitelist,
        whitelist: args.whitelist.clone(),
    }
}

/// Print the effective startup configuration.
fn print_startup_config(snapshot: &RunStartupSnapshot) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", &snapshot.source);
    output::field("Log level", &snapshot.log_level);
    if output::verbosity() > 0 {
        output::field("Log format", &snapshot.log_format);
        output::field("Server", &snapshot.server_address);
    }
    output::field(
        "Whitelist",
        if snapshot.strict_whitelist {
            "strict"
        } else {
            "lenient"
        },
    );
    if snapshot.uses_defaults {
        output::warning("No configuration file found; using built-in defaults");
    }
}

fn print_boot(boot_id: Uuid, records: &[InitRecord]) {
    if output::is_json() {
        output::emit(
            "boot",
            json!({
                "boot_id": boot_id.to_string(),
                "records": records,
            }),
        );
        return;
    }
    output::block(&banner::render_boot_summary(records, output::styled()));
}

fn print_shutdown(report: &ShutdownReport) {
    if output::is_json() {
        output::emit("shutdown", json!({ "steps": report.steps }));
        return;
    }
    output::block(&banner::render_shutdown_report(report, output::styled()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::{Cli, Commands};
    use clap::Parser;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["crawler", "run"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Run(args) => *args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn flags_carry_into_the_request() {
        let args = run_args(&[
            "--log-level",
            "DEBUG",
            "--allow-empty-whitelist",
            "--whitelist",
            "192.0.2.1",
        ]);

        let request = run_request(&args, ConfigInput::missing("config.toml"), false);

        assert_eq!(request.log_level.as_deref(), Some("DEBUG"));
        assert!(request.allow_empty_whitelist);
        assert!(!request.json_logs);
        assert_eq!(request.whitelist, vec!["192.0.2.1"]);
    }

    #[test]
    fn machine_output_forces_json_logs() {
        let request = run_request(&run_args(&[]), ConfigInput::default(), true);
        assert!(request.json_logs);
    }

    #[test]
    fn untouched_flags_override_nothing() {
        let request = run_request(&run_args(&[]), ConfigInput::default(), false);
        assert_eq!(
            request,
            RunRequest {
                config: ConfigInput::default(),
                ..RunRequest::default()
            }
        );
    }
}
