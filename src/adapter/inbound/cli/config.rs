//! Handler for the `config` command group, plus the config loader shared by
//! every command.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{diagnostic, operator, output, paths};
use crate::error::{ConfigError, Result};
use crate::port::inbound::operator::configuration::ConfigInput;

/// Read the configuration at `path` and run `use_case` on it, rendering
/// parse errors with context.
pub fn with_config<T>(path: &Path, use_case: impl FnOnce(&ConfigInput) -> Result<T>) -> Result<T> {
    let input = operator::read_config_toml(path)?;
    use_case(&input).map_err(|error| {
        if !output::is_json() {
            diagnostic::report_config_error(&input, &error);
        }
        error
    })
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    write_template(path, force, operator::operator()?.config_template())?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set IPINFO_TOKEN to enable DNS geolocation");
    output::note(&format!("3. Run: crawler check config -c {}", path.display()));
    output::note(&format!("4. Run: crawler run -c {}", path.display()));
    Ok(())
}

fn write_template(path: &Path, force: bool, template: &str) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    paths::ensure_parent_dir(path)?;
    fs::write(path, template)?;
    Ok(())
}

/// Execute `config show`: print the effective configuration as TOML.
///
/// Secrets are masked.
pub fn execute_show(path: &Path) -> Result<()> {
    let operator = operator::operator()?;
    let shown = with_config(path, |input| operator.show_config(input))?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "source": shown.source,
            "config": shown.json,
        }));
        return Ok(());
    }

    println!("# source: {}", shown.source);
    print!("{}", shown.toml);
    Ok(())
}
