use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{banner, config, operator, output};
use crate::domain::health::{HealthReport, HealthStatus};
use crate::error::Result;
use crate::port::inbound::operator::diagnostic::StartupCheck;

/// Boot every module, report readiness, and shut down again.
///
/// The first error wins: initialization, then the whitelist predicate, then
/// shutdown failures.
pub fn execute_startup<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let operator = operator::operator()?;
    if !output::is_json() {
        output::action("Initializing", "modules");
    }
    let check = config::with_config(config_path.as_ref(), |input| operator.check_startup(input))?;

    print_check(&check)?;
    check.outcome?;

    output::success("Startup check complete");
    Ok(())
}

fn print_check(check: &StartupCheck) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "check.startup",
            "boot_id": check.boot_id.to_string(),
            "initialized": check.initialized,
            "records": serde_json::to_value(&check.records)?,
            "readiness": serde_json::to_value(&check.readiness)?,
            "shutdown": serde_json::to_value(&check.shutdown)?,
        }));
        return Ok(());
    }

    output::section("Boot");
    output::block(&banner::render_boot_summary(&check.records, output::styled()));
    print_readiness(&check.readiness);
    output::section("Shutdown");
    output::block(&banner::render_shutdown_report(&check.shutdown, output::styled()));
    Ok(())
}

/// Print one line per readiness check.
pub(crate) fn print_readiness(report: &HealthReport) {
    output::section("Readiness");
    for check in report.checks() {
        match check.status() {
            HealthStatus::Healthy => output::success(check.name()),
            HealthStatus::Unhealthy(reason) if check.critical() => {
                output::warning(&format!("{}: {}", check.name(), output::negative(reason)));
            }
            HealthStatus::Unhealthy(reason) => {
                output::note(&format!("{}: {reason}", check.name()));
            }
        }
    }
}
