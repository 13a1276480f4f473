//! Startup banner and boot/shutdown summaries.
//!
//! The summary renderers are pure: they take records and a `styled` flag and
//! return the text, so tests can inspect exactly what an operator sees.

use std::time::Duration;

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::record::{InitOutcome, InitRecord};
use crate::domain::shutdown::ShutdownReport;

const TITLE: &str = r"
   ___ _ __ __ ___      _| | ___ _ __
  / __| '__/ _` \ \ /\ / / |/ _ \ '__|
 | (__| | | (_| |\ V  V /| |  __/ |
  \___|_|  \__,_| \_/\_/ |_|\___|_|
";

/// Prints the crawler banner to stdout.
pub fn print_banner() {
    if output::styled() {
        println!("{}", TITLE.bold().cyan());
    } else {
        println!("{TITLE}");
    }
}

#[derive(Tabled)]
struct BootRow {
    #[tabled(rename = "Module")]
    module: &'static str,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Summary")]
    summary: String,
}

#[derive(Tabled)]
struct ShutdownRow {
    #[tabled(rename = "Module")]
    module: &'static str,
    #[tabled(rename = "Result")]
    outcome: &'static str,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn millis(elapsed: Duration) -> String {
    format!("{} ms", elapsed.as_millis())
}

fn outcome_mark(outcome: InitOutcome) -> &'static str {
    match outcome {
        InitOutcome::Ready => "✓ ready",
        InitOutcome::Deferred => "◌ deferred",
        InitOutcome::Skipped => "- skipped",
        InitOutcome::Failed => "× failed",
    }
}

/// Render one table row per record, then the warnings, then a totals line.
///
/// Colors are applied outside the table only, so column widths stay exact.
#[must_use]
pub fn render_boot_summary(records: &[InitRecord], styled: bool) -> String {
    let rows = records.iter().map(|record| BootRow {
        module: record.module.label(),
        status: outcome_mark(record.outcome),
        time: millis(record.elapsed),
        summary: record.summary.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let mut out = table.to_string();

    for record in records {
        for warning in &record.warnings {
            let line = format!("⚠ {}: {warning}", record.module.as_str());
            out.push('\n');
            if styled {
                out.push_str(&line.yellow().to_string());
            } else {
                out.push_str(&line);
            }
        }
    }

    let total: Duration = records.iter().map(|record| record.elapsed).sum();
    let failed = records.iter().any(|record| !record.outcome.is_success());
    let footer = if failed {
        format!("boot aborted after {} module(s) in {}", records.len(), millis(total))
    } else {
        format!("{} module(s) up in {}", records.len(), millis(total))
    };
    out.push('\n');
    match (styled, failed) {
        (true, true) => out.push_str(&footer.red().bold().to_string()),
        (true, false) => out.push_str(&footer.green().bold().to_string()),
        (false, _) => out.push_str(&footer),
    }
    out
}

/// Render the per-module release steps of a shutdown.
#[must_use]
pub fn render_shutdown_report(report: &ShutdownReport, styled: bool) -> String {
    let rows = report.steps.iter().map(|step| ShutdownRow {
        module: step.module.label(),
        outcome: step.outcome.as_str(),
        time: millis(step.elapsed),
        error: step.error.clone().unwrap_or_default(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let released = report.released_count();
    let failed = report.failed();
    let footer = if failed.is_empty() {
        format!("shutdown complete, {released} resource(s) released")
    } else {
        let names: Vec<&str> = failed.iter().map(|module| module.as_str()).collect();
        format!("shutdown finished with failures in: {}", names.join(", "))
    };

    let footer = match (styled, failed.is_empty()) {
        (true, true) => footer.green().to_string(),
        (true, false) => footer.red().bold().to_string(),
        (false, _) => footer,
    };
    format!("{table}\n{footer}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::domain::record::RecordBuilder;
    use crate::domain::shutdown::{ReleaseOutcome, ShutdownStep};

    fn record(module: ModuleKind, outcome: InitOutcome, summary: &str) -> InitRecord {
        let mut builder = RecordBuilder::start(module);
        builder.outcome(outcome).summary(summary);
        builder.finish()
    }

    #[test]
    fn boot_summary_lists_every_module_and_warning() {
        let mut dns = RecordBuilder::start(ModuleKind::DomainDns);
        dns.outcome(InitOutcome::Skipped)
            .summary("no target domains")
            .warn("DNS monitor not started");
        let records = vec![
            record(ModuleKind::Logging, InitOutcome::Ready, "info, text"),
            dns.finish(),
            record(ModuleKind::TcpPool, InitOutcome::Deferred, "max 100"),
        ];

        let text = render_boot_summary(&records, false);

        assert!(text.contains("Logging"));
        assert!(text.contains("DNS monitor"));
        assert!(text.contains("- skipped"));
        assert!(text.contains("◌ deferred"));
        assert!(text.contains("⚠ domain_dns: DNS monitor not started"));
        assert!(text.contains("3 module(s) up"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn failed_boot_changes_footer() {
        let records = vec![
            record(ModuleKind::Logging, InitOutcome::Ready, "info"),
            record(ModuleKind::Fingerprint, InitOutcome::Failed, "bad strategy"),
        ];

        let text = render_boot_summary(&records, false);
        assert!(text.contains("× failed"));
        assert!(text.contains("boot aborted after 2 module(s)"));
    }

    #[test]
    fn styled_summary_carries_ansi_codes() {
        let records = vec![record(ModuleKind::Logging, InitOutcome::Ready, "info")];
        assert!(render_boot_summary(&records, true).contains('\u{1b}'));
    }

    #[test]
    fn shutdown_report_names_failures() {
        let report = ShutdownReport {
            steps: vec![
                ShutdownStep {
                    module: ModuleKind::QuicPool,
                    outcome: ReleaseOutcome::Released,
                    error: None,
                    elapsed: Duration::from_millis(1),
                },
                ShutdownStep {
                    module: ModuleKind::TcpPool,
                    outcome: ReleaseOutcome::Failed,
                    error: Some("refused".into()),
                    elapsed: Duration::ZERO,
                },
            ],
        };

        let text = render_shutdown_report(&report, false);
        assert!(text.contains("QUIC pool"));
        assert!(text.contains("refused"));
        assert!(text.contains("failures in: tcp_pool"));
    }

    #[test]
    fn clean_shutdown_counts_released_resources() {
        let report = ShutdownReport {
            steps: vec![ShutdownStep {
                module: ModuleKind::DomainDns,
                outcome: ReleaseOutcome::Stopped,
                error: None,
                elapsed: Duration::ZERO,
            }],
        };

        let text = render_shutdown_report(&report, false);
        assert!(text.contains("1 resource(s) released"));
    }
}
