use colored::*;
use rexec_common::config::Config;
use rexec_common::success;
use rexec_core::binder::ParsedOptions;
use rexec_core::module::Finding;
use rexec_core::pipeline::{self, Execution};
use rexec_core::registry::ModuleEntry;

use crate::terminal::{colors, print, spinner};

pub fn run(
    matching: &[&ModuleEntry],
    name: &str,
    options: &ParsedOptions,
    cfg: &Config,
) -> anyhow::Result<()> {
    print::header("running module", cfg.quiet);

    if cfg.quiet == 0 {
        spinner::start(format!("Running {name}..."));
    }
    let outcome = pipeline::execute(matching, name, options);
    spinner::stop();

    let execution = outcome?;
    print_findings(&execution.findings, cfg);
    print_summary(&execution, cfg);

    Ok(())
}

fn print_findings(findings: &[Finding], cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    if findings.is_empty() {
        if cfg.quiet == 0 {
            print::no_findings();
        }
        return;
    }

    print::header("findings", cfg.quiet);
    for (idx, finding) in findings.iter().enumerate() {
        print::tree_head(idx, &finding.target);
        print::tree(finding_tree(finding));
    }
}

fn finding_tree(finding: &Finding) -> Vec<(String, ColoredString)> {
    finding
        .details
        .iter()
        .map(|(key, value)| (key.clone(), value.color(colors::TEXT_DEFAULT)))
        .collect()
}

fn print_summary(execution: &Execution, cfg: &Config) {
    let elapsed = format!("{:.2}s", execution.elapsed.as_secs_f64());

    if cfg.quiet > 0 {
        success!("{}: {} in {}", execution.module, execution.summary(), elapsed);
        return;
    }

    print::fat_separator();
    print::centerln(&format!(
        "{} finished: {} in {}",
        execution.module.color(colors::PRIMARY),
        execution.summary().color(colors::ACCENT),
        elapsed.color(colors::ACCENT)
    ));
}
