use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{config, operator, output};
use crate::error::Result;

/// Validate the configuration file without booting anything.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let operator = operator::operator()?;
    let report = config::with_config(config_path.as_ref(), |input| operator.check_config(input))?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "valid": true,
            "source": report.source,
            "log_level": report.log_level,
            "target_domains": report.target_domains,
            "certificate_provider": report.certificate_provider.to_string(),
            "strict_whitelist": report.strict_whitelist,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", &report.source);
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Log level", &report.log_level);
    output::field("Log format", &report.log_format);
    output::field(
        "Domains",
        if report.target_domains.is_empty() {
            "none".to_string()
        } else {
            report.target_domains.join(", ")
        },
    );
    output::field("Certificates", report.certificate_provider);
    output::field("Server domain", &report.server_domain);
    output::field(
        "Whitelist",
        if report.strict_whitelist {
            "strict"
        } else {
            "lenient"
        },
    );

    if report.uses_defaults {
        output::warning("No configuration file found; using built-in defaults");
    }
    if report.target_domains.is_empty() {
        output::warning("No target domains configured; the DNS monitor will not start");
    }
    if !report.ipinfo_configured {
        output::warning("IPInfo token not configured (set IPINFO_TOKEN for geolocation)");
    }

    output::success("Configuration check complete");
    Ok(())
}
