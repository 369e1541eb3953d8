use colored::*;
use rexec_common::config::Config;
use rexec_core::registry::{ModuleEntry, Registry};

use crate::terminal::{colors, print};

pub fn tags(registry: &Registry, cfg: &Config) {
    let mut tags = registry.all_tags();
    tags.sort();

    print::header("available tags", cfg.quiet);
    for tag in tags {
        print::status(tag.color(colors::TAG).to_string());
    }
}

pub fn modules(matching: &[&ModuleEntry], tags: &[String], cfg: &Config) {
    if matching.is_empty() {
        print::header("zero modules found", cfg.quiet);
        print::status(format!(
            "No modules found matching tags: {}",
            tags.join(", ")
        ));
        return;
    }

    print::header("matching modules", cfg.quiet);
    for (idx, entry) in matching.iter().enumerate() {
        print::tree_head(idx, entry.metadata.unique_name);
        print::tree(module_tree(entry));
    }
}

fn module_tree(entry: &ModuleEntry) -> Vec<(String, ColoredString)> {
    vec![
        (
            "Tags".to_string(),
            entry.metadata.labels.join(", ").color(colors::TAG),
        ),
        (
            "About".to_string(),
            entry.metadata.description.color(colors::TEXT_DEFAULT),
        ),
    ]
}
