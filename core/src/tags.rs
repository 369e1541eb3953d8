//! Tag based selection of registry entries.

use std::collections::HashSet;

use crate::registry::ModuleEntry;

/// Returns the entries with at least one label matching one of `tags`,
/// ignoring case, in registry order.
///
/// No tags means no filtering.
pub fn filter<'a>(entries: &'a [ModuleEntry], tags: &[String]) -> Vec<&'a ModuleEntry> {
    if tags.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| {
            entry
                .metadata
                .labels
                .iter()
                .any(|label| tags.iter().any(|tag| label.eq_ignore_ascii_case(tag)))
        })
        .collect()
}

/// Every label known to the registry, lower-cased and de-duplicated.
///
/// The order is unspecified.
pub fn collect_all_tags(entries: &[ModuleEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.metadata.labels.iter())
        .map(|label| label.to_ascii_lowercase())
        .collect::<HashSet<String>>()
        .into_iter()
        .collect()
}

/// Finds an entry by name, ignoring case.
pub fn find_by_name<'a>(entries: &[&'a ModuleEntry], name: &str) -> Option<&'a ModuleEntry> {
    entries
        .iter()
        .find(|entry| entry.metadata.unique_name.eq_ignore_ascii_case(name))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::entry;

    fn names(entries: &[&ModuleEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.metadata.unique_name).collect()
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn catalogue() -> Vec<ModuleEntry> {
        vec![
            entry("list-shares", &["SMB", "Shares", "Low-Privilege"]),
            entry("resolve-host", &["DNS", "Recon"]),
            entry("smb-signing", &["smb", "Recon"]),
        ]
    }

    #[test]
    fn no_tags_returns_everything() {
        let all = catalogue();
        assert_eq!(
            names(&filter(&all, &[])),
            ["list-shares", "resolve-host", "smb-signing"]
        );
    }

    #[test]
    fn tags_match_any_label_ignoring_case() {
        let all = catalogue();
        assert_eq!(names(&filter(&all, &tags(&["SmB"]))), ["list-shares", "smb-signing"]);
        assert_eq!(names(&filter(&all, &tags(&["dns", "shares"]))), ["list-shares", "resolve-host"]);
        assert!(filter(&all, &tags(&["ldap"])).is_empty());
    }

    #[test]
    fn entry_matched_by_several_labels_appears_once() {
        let all = catalogue();
        let matching = filter(&all, &tags(&["smb", "shares", "low-privilege", "recon"]));
        assert_eq!(names(&matching), ["list-shares", "resolve-host", "smb-signing"]);
    }

    #[test]
    fn all_tags_are_case_folded_and_unique() {
        let all = vec![entry("one", &["SMB", "smb", "Shares"])];
        let mut collected = collect_all_tags(&all);
        collected.sort();
        assert_eq!(collected, ["shares", "smb"]);
    }

    #[test]
    fn lookup_ignores_case() {
        let all = catalogue();
        let candidates = filter(&all, &[]);
        let found = find_by_name(&candidates, "LIST-Shares").unwrap();
        assert_eq!(found.metadata.unique_name, "list-shares");
        assert!(find_by_name(&candidates, "list").is_none());
    }
}
