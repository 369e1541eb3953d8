use colored::*;
use rexec_common::config::Config;
use rexec_core::binder::CliOption;
use rexec_core::registry::ModuleEntry;

use crate::terminal::{colors, print};

/// Prints the help page of one module.
pub fn show(entry: &ModuleEntry, cfg: &Config) -> anyhow::Result<()> {
    let meta = &entry.metadata;
    let options = entry.instantiate().options(meta.unique_name)?;

    print::header("module options", cfg.quiet);

    print::aligned_lines(&[
        ("Module", meta.unique_name.color(colors::TEXT_DEFAULT)),
        ("Description", meta.description.color(colors::TEXT_DEFAULT)),
        ("Tags", meta.labels.join(", ").color(colors::TAG)),
    ]);
    print::blank();

    print::status("Arguments:");
    if options.is_empty() {
        print::status("  (no input fields found)");
    }
    for option in &options {
        print::status(argument_line(option));
    }

    Ok(())
}

fn argument_line(option: &CliOption) -> String {
    format!(
        "  --{} {} ({})",
        option.name.color(colors::PRIMARY),
        option.help,
        option.kind.to_string().color(colors::ACCENT)
    )
}
