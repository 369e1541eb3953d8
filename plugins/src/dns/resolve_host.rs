//! `resolve-host`: forward and reverse resolution of each target.

use rexec_common::network::target::{self, ModuleTarget, Targets};
use rexec_core::binder::{InputShape, ModuleInput};
use rexec_core::module::{Finding, ModuleMetadata, ScanModule};
use tracing::debug;

pub const METADATA: ModuleMetadata = ModuleMetadata {
    unique_name: "resolve-host",
    description: "Resolves every target to an IP address and, unless disabled, back to a domain name.",
    labels: &["DNS", "Recon"],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveHostInput {
    pub targets: Targets,
    pub reverse: bool,
}

impl Default for ResolveHostInput {
    fn default() -> Self {
        Self {
            targets: Targets::default(),
            reverse: true,
        }
    }
}

impl ModuleInput for ResolveHostInput {
    fn describe(shape: &mut InputShape<Self>) {
        shape.nest(|i| &mut i.targets).flag(
            "reverse",
            "Also look up the domain name of literal addresses (default true)",
            |i| &mut i.reverse,
        );
    }
}

#[derive(Debug, Default)]
pub struct ResolveHostModule {
    input: ResolveHostInput,
}

impl ScanModule for ResolveHostModule {
    type Input = ResolveHostInput;

    fn configure(&mut self, input: ResolveHostInput) -> anyhow::Result<()> {
        self.input = input;
        Ok(())
    }

    fn run(&mut self) -> anyhow::Result<Vec<Finding>> {
        let targets = target::expand(&self.input.targets)?;
        targets.iter().map(|t| self.run_once(t)).collect()
    }

    fn run_once(&mut self, target: &ModuleTarget) -> anyhow::Result<Finding> {
        let address = target.resolve_to_ip()?;
        let finding = Finding::new(&target.host).with("address", &address);

        if !self.input.reverse {
            return Ok(finding);
        }

        // Missing PTR records are recorded, not fatal.
        let domain = target.resolve_to_domain().unwrap_or_else(|err| {
            debug!(host = %target.host, error = %err, "Reverse lookup failed");
            "unresolved".to_string()
        });

        Ok(finding.with("domain", domain))
    }
}
