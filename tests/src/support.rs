use std::cell::RefCell;
use std::io::Write;

use anyhow::bail;
use rexec_common::auth::Credentials;
use rexec_common::network::target::{self, ModuleTarget, Targets};
use rexec_core::binder::{InputShape, ModuleInput};
use rexec_core::module::{Finding, ModuleMetadata, ScanModule};
use rexec_core::registry::ModuleEntry;
use tempfile::NamedTempFile;

thread_local! {
    static VISITED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static CONFIGURED: RefCell<Vec<RecordingInput>> = const { RefCell::new(Vec::new()) };
}

/// Hosts passed to `run_once` on this thread, in order.
pub fn visited() -> Vec<String> {
    VISITED.with(|v| v.borrow().clone())
}

/// Inputs received by `configure` on this thread, in order.
pub fn configured() -> Vec<RecordingInput> {
    CONFIGURED.with(|c| c.borrow().clone())
}

pub fn reset() {
    VISITED.with(|v| v.borrow_mut().clear());
    CONFIGURED.with(|c| c.borrow_mut().clear());
}

pub fn host_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingInput {
    pub targets: Targets,
    pub credentials: Credentials,
    pub fail_on: String,
}

impl ModuleInput for RecordingInput {
    fn describe(shape: &mut InputShape<Self>) {
        shape
            .nest(|i| &mut i.targets)
            .nest(|i| &mut i.credentials)
            .text("fail-on", "Host that makes the module fail", |i| &mut i.fail_on);
    }
}

/// Records every call and fails on the host named by `--fail-on`.
#[derive(Debug, Default)]
pub struct Recording {
    input: RecordingInput,
}

impl ScanModule for Recording {
    type Input = RecordingInput;

    fn configure(&mut self, input: RecordingInput) -> anyhow::Result<()> {
        CONFIGURED.with(|c| c.borrow_mut().push(input.clone()));
        self.input = input;
        Ok(())
    }

    fn run(&mut self) -> anyhow::Result<Vec<Finding>> {
        let targets = target::expand(&self.input.targets)?;
        targets.iter().map(|t| self.run_once(t)).collect()
    }

    fn run_once(&mut self, target: &ModuleTarget) -> anyhow::Result<Finding> {
        VISITED.with(|v| v.borrow_mut().push(target.host.clone()));

        if target.host == self.input.fail_on {
            bail!("target {} refused the connection", target.host);
        }
        Ok(Finding::new(&target.host).with("user", &self.input.credentials.username))
    }
}

pub fn recording(name: &'static str, labels: &'static [&'static str]) -> ModuleEntry {
    ModuleEntry::new::<Recording>(ModuleMetadata {
        unique_name: name,
        description: "Records the calls it receives",
        labels,
    })
}
