//! # Execution Pipeline
//!
//! Runs one module for one invocation:
//! 1. **Resolve** the module by name among the tag-filtered entries.
//! 2. **Bind** the parsed options into a fresh input value.
//! 3. **Configure** the module with that input.
//! 4. **Run** it; the module walks its own targets and stops at the first
//!    failing one.
//! 5. **Report** the elapsed time together with the result or the error.
//!
//! There are no retries. A failure is reported once and returned.

use std::time::{Duration, Instant};

use rexec_common::error::{Error, Result};
use tracing::{debug, error, info};

use crate::binder::ParsedOptions;
use crate::module::Finding;
use crate::registry::ModuleEntry;
use crate::tags;

/// The outcome of a successful run.
#[derive(Debug)]
pub struct Execution {
    pub module: &'static str,
    pub elapsed: Duration,
    pub findings: Vec<Finding>,
}

impl Execution {
    /// Short result message.
    pub fn summary(&self) -> String {
        let count = self.findings.len();
        let unit = if count == 1 { "target" } else { "targets" };
        format!("{count} {unit} processed")
    }
}

/// Resolves `name` among `candidates` and runs it.
pub fn execute(
    candidates: &[&ModuleEntry],
    name: &str,
    parsed: &ParsedOptions,
) -> Result<Execution> {
    let entry = tags::find_by_name(candidates, name)
        .ok_or_else(|| Error::ModuleNotFound(name.to_string()))?;

    run_entry(entry, parsed)
}

/// Runs an already resolved module, logging the outcome.
pub fn run_entry(entry: &ModuleEntry, parsed: &ParsedOptions) -> Result<Execution> {
    let module = entry.metadata.unique_name;
    let start = Instant::now();

    info!(module, "Starting module");

    let outcome = drive(entry, parsed);
    let elapsed = start.elapsed();

    match outcome {
        Ok(findings) => {
            let execution = Execution {
                module,
                elapsed,
                findings,
            };
            info!(
                module,
                duration = ?elapsed,
                result = %execution.summary(),
                "Module executed successfully"
            );
            Ok(execution)
        }
        Err(err) => {
            error!(
                module,
                duration = ?elapsed,
                error = %err,
                "Module execution failed"
            );
            Err(err)
        }
    }
}

fn drive(entry: &ModuleEntry, parsed: &ParsedOptions) -> Result<Vec<Finding>> {
    let mut instance = entry.instantiate();

    let input = instance.bind(parsed);
    instance.configure(input)?;
    debug!(module = entry.metadata.unique_name, "Module configured");

    instance.run()
}
