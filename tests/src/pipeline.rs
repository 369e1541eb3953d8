use rexec_common::error::Error;
use rexec_core::binder::ParsedOptions;
use rexec_core::pipeline;
use rexec_core::registry::Registry;

use crate::support::{self, host_file, recording};

fn registry() -> Registry {
    Registry::new(vec![
        recording("smb-recorder", &["SMB", "Shares"]),
        recording("dns-recorder", &["DNS"]),
    ])
    .unwrap()
}

#[test]
fn host_file_targets_run_in_order() {
    support::reset();
    let file = host_file(&["fs01", "", "  fs02  ", "fs03"]);
    let path = file.path().display().to_string();

    let registry = registry();
    let candidates = registry.filter(&["smb".to_string()]);
    let parsed: ParsedOptions = [
        ("host", "ignored"),
        ("host-file", path.as_str()),
        ("username", "svc"),
    ]
    .into_iter()
    .collect();

    let execution = pipeline::execute(&candidates, "smb-recorder", &parsed).unwrap();

    assert_eq!(support::visited(), ["fs01", "fs02", "fs03"]);
    assert_eq!(execution.summary(), "3 targets processed");
    assert!(execution.findings.iter().all(|f| f.detail("user") == Some("svc")));
}

#[test]
fn first_failing_target_stops_the_run() {
    support::reset();
    let file = host_file(&["fs01", "fs02", "fs03"]);
    let path = file.path().display().to_string();

    let registry = registry();
    let candidates = registry.filter(&["SMB".to_string()]);
    let parsed: ParsedOptions = [("host-file", path.as_str()), ("fail-on", "fs02")]
        .into_iter()
        .collect();

    let err = pipeline::execute(&candidates, "smb-recorder", &parsed).unwrap_err();

    assert!(err.to_string().contains("fs02 refused the connection"));
    assert_eq!(support::visited(), ["fs01", "fs02"]);
}

#[test]
fn unset_options_keep_their_defaults() {
    support::reset();
    let registry = registry();
    let candidates = registry.filter(&["dns".to_string()]);
    let parsed: ParsedOptions = [("host", "dc01"), ("kerberos", "yes")].into_iter().collect();

    pipeline::execute(&candidates, "DNS-Recorder", &parsed).unwrap();

    let input = support::configured().pop().unwrap();
    assert_eq!(input.targets.host, "dc01");
    assert!(input.credentials.kerberos);
    assert_eq!(input.credentials.username, "");
    assert_eq!(input.fail_on, "");
}

#[test]
fn module_outside_the_tag_filter_is_not_found() {
    support::reset();
    let registry = registry();
    let candidates = registry.filter(&["dns".to_string()]);

    let err = pipeline::execute(&candidates, "smb-recorder", &ParsedOptions::new()).unwrap_err();

    assert!(matches!(err, Error::ModuleNotFound(ref name) if name == "smb-recorder"));
    assert!(support::configured().is_empty());
}

#[test]
fn missing_targets_fail_before_any_run() {
    support::reset();
    let registry = registry();
    let candidates = registry.filter(&["dns".to_string()]);

    let err = pipeline::execute(&candidates, "dns-recorder", &ParsedOptions::new()).unwrap_err();

    assert!(matches!(err, Error::EmptyTarget));
    assert!(support::visited().is_empty());
}

#[test]
fn unreadable_host_file_is_an_io_error() {
    support::reset();
    let registry = registry();
    let candidates = registry.filter(&["dns".to_string()]);
    let parsed: ParsedOptions = [("host-file", "/nonexistent/rexec/hosts.txt")]
        .into_iter()
        .collect();

    let err = pipeline::execute(&candidates, "dns-recorder", &parsed).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}
