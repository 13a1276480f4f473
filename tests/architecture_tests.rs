//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_lines_outside_tests, find_non_export_lines_in_mod_files,
    path_exists, read_relative,
};

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "tokio::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_and_application_do_not_reach_into_adapters() {
    let mut hits = find_lines_containing("src/port", &["crate::adapter", "crate::application"]);
    hits.extend(find_lines_containing("src/application", &["crate::adapter"]));

    assert!(
        hits.is_empty(),
        "found adapter imports behind a port: {hits:#?}"
    );
}

#[test]
fn ports_and_application_do_not_import_infrastructure() {
    let mut hits = find_lines_containing("src/port", &["crate::infrastructure"]);
    hits.extend(find_lines_containing("src/application", &["crate::infrastructure"]));

    assert!(
        hits.is_empty(),
        "ports and application must not depend on infrastructure: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn operator_ports_are_transport_agnostic() {
    let hits = find_lines_containing("src/port/inbound/operator", &["std::path::Path", "PathBuf"]);
    assert!(
        hits.is_empty(),
        "operator inbound ports should not expose filesystem path types: {hits:#?}"
    );
}

#[test]
fn cli_operator_bridge_uses_operator_name() {
    let source = read_relative("src/adapter/inbound/cli/operator.rs");
    assert!(
        source.contains("pub fn operator() -> Result<&'static dyn OperatorPort>"),
        "operator bridge should expose `operator()` capability accessor"
    );

    let main = read_relative("src/main.rs");
    assert!(
        main.contains("operator::install("),
        "the binary should install the operator before dispatching"
    );
}

#[test]
fn production_code_propagates_errors_instead_of_panicking() {
    let mut hits = Vec::new();
    for dir in [
        "src/adapter",
        "src/application",
        "src/domain",
        "src/infrastructure",
        "src/port",
    ] {
        hits.extend(find_lines_outside_tests(dir, &[".unwrap()", ".expect("]));
    }

    assert!(
        hits.is_empty(),
        "found unwrap/expect outside tests: {hits:#?}"
    );
}

#[test]
fn config_template_ships_with_the_crate() {
    assert!(path_exists("config.toml.example"));
}
