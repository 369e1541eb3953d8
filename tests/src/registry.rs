use rexec_common::error::Error;
use rexec_core::registry::Registry;
use rexec_core::tags;

use crate::support::recording;

#[test]
fn shipped_catalogue_is_valid() {
    let registry = rexec_plugins::registry().unwrap();

    assert!(registry.find("list-shares").is_some());
    assert!(registry.find("RESOLVE-HOST").is_some());

    let smb = registry.filter(&["smb".to_string()]);
    assert_eq!(smb.len(), 1);
    assert_eq!(smb[0].metadata.unique_name, "list-shares");
}

#[test]
fn shipped_modules_expose_their_options() {
    let registry = rexec_plugins::registry().unwrap();
    let entry = registry.find("list-shares").unwrap();

    let names: Vec<&str> = entry
        .instantiate()
        .options(entry.metadata.unique_name)
        .unwrap()
        .iter()
        .map(|o| o.name)
        .collect();

    assert_eq!(
        names,
        ["host", "host-file", "domain", "username", "password", "kerberos", "port"]
    );
}

#[test]
fn duplicate_names_across_plugins_are_rejected() {
    let mut entries = rexec_plugins::catalogue();
    entries.push(recording("List-Shares", &["SMB"]));

    let err = Registry::new(entries).unwrap_err();
    assert!(matches!(err, Error::DuplicateModuleName { ref name, .. } if name == "list-shares"));
}

#[test]
fn tags_are_collected_without_case_duplicates() {
    let entries = [
        recording("a", &["SMB", "smb"]),
        recording("b", &["Shares"]),
    ];

    let mut all = tags::collect_all_tags(&entries);
    all.sort();
    assert_eq!(all, ["shares", "smb"]);
}

#[test]
fn tag_filter_is_an_or_match() {
    let registry = Registry::new(vec![
        recording("a", &["SMB"]),
        recording("b", &["DNS"]),
        recording("c", &["LDAP"]),
    ])
    .unwrap();

    let names: Vec<&str> = registry
        .filter(&["dns".to_string(), "Smb".to_string()])
        .iter()
        .map(|e| e.metadata.unique_name)
        .collect();

    assert_eq!(names, ["a", "b"]);
    assert!(registry.filter(&["ftp".to_string()]).is_empty());
}
