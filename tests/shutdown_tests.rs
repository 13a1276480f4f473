//! Teardown tests: ordering, best-effort release, idempotence.

use crawler_system::domain::module::ModuleKind;
use crawler_system::domain::shutdown::ReleaseOutcome;
use crawler_system::error::Error;
use crawler_system::infrastructure::orchestration::orchestrator::Orchestrator;
use crawler_system::infrastructure::orchestration::shutdown::SHUTDOWN_ORDER;
use crawler_system::testkit;
use crawler_system::testkit::fakes::Faults;
use crawler_system::testkit::journal::Journal;

fn booted(journal: &Journal, faults: &Faults, dir: &std::path::Path) -> Orchestrator {
    let mut orchestrator = Orchestrator::new(testkit::fakes::collaborators(journal, faults));
    orchestrator.initialize(&testkit::config::test_config(dir)).unwrap();
    orchestrator
}

#[test]
fn close_walks_the_shutdown_order() {
    let journal = Journal::default();
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = booted(&journal, &Faults::default(), dir.path());
    orchestrator.tcp_pool_for("example.com:443").unwrap();

    let report = orchestrator.close();

    let modules: Vec<_> = report.steps.iter().map(|step| step.module).collect();
    assert_eq!(modules, SHUTDOWN_ORDER.to_vec());
    assert!(report.is_clean());

    let quic = journal.position("close quic_pool").unwrap();
    let tcp = journal.position("close tcp_pool example.com:443").unwrap();
    let dns = journal.position("stop domain_dns").unwrap();
    let ip_pool = journal.position("close local_ip_pool").unwrap();
    assert!(quic < tcp && tcp < dns && dns < ip_pool);
}

#[test]
fn release_failures_do_not_stop_later_steps() {
    let journal = Journal::default();
    let dir = tempfile::tempdir().unwrap();
    let faults = Faults::default()
        .fail_release(ModuleKind::TcpPool)
        .fail_release(ModuleKind::LocalIpPool);
    let mut orchestrator = booted(&journal, &faults, dir.path());
    orchestrator.tcp_pool_for("example.com:443").unwrap();

    let report = orchestrator.close();

    assert_eq!(
        report.failed(),
        vec![ModuleKind::TcpPool, ModuleKind::LocalIpPool]
    );
    assert_eq!(
        report.step(ModuleKind::DomainDns).unwrap().outcome,
        ReleaseOutcome::Stopped
    );
    assert_eq!(
        report.step(ModuleKind::Logging).unwrap().outcome,
        ReleaseOutcome::Dropped
    );
    assert!(report
        .step(ModuleKind::TcpPool)
        .unwrap()
        .error
        .as_deref()
        .unwrap()
        .contains("example.com:443"));

    match report.into_result() {
        Err(Error::Shutdown { failed }) => {
            assert_eq!(failed, vec![ModuleKind::TcpPool, ModuleKind::LocalIpPool]);
        }
        other => panic!("expected shutdown error, got {other:?}"),
    }
}

#[test]
fn second_close_releases_nothing() {
    let journal = Journal::default();
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = booted(&journal, &Faults::default(), dir.path());

    orchestrator.close();
    let again = orchestrator.close();

    assert_eq!(journal.count("close quic_pool"), 1);
    assert_eq!(journal.count("close local_ip_pool"), 1);
    assert!(again
        .steps
        .iter()
        .all(|step| step.outcome == ReleaseOutcome::Absent));
    assert!(orchestrator.handles().is_empty());
}

#[test]
fn close_after_partial_boot_releases_what_exists() {
    let journal = Journal::default();
    let dir = tempfile::tempdir().unwrap();
    let faults = Faults::default().fail_create(ModuleKind::Certificates);
    let mut orchestrator = Orchestrator::new(testkit::fakes::collaborators(&journal, &faults));
    assert!(orchestrator.initialize(&testkit::config::test_config(dir.path())).is_err());

    let report = orchestrator.close();

    assert!(report.is_clean());
    assert_eq!(
        report.step(ModuleKind::LocalIpPool).unwrap().outcome,
        ReleaseOutcome::Released
    );
    assert_eq!(
        report.step(ModuleKind::QuicPool).unwrap().outcome,
        ReleaseOutcome::Absent
    );
    assert!(!journal.contains("close quic_pool"));
}
