//! The contract every scan module implements.
//!
//! Module authors implement the typed [`ScanModule`] trait. The registry only
//! stores type-erased [`Module`] objects, which every [`ScanModule`] gets for
//! free; the erased side carries the input as `Box<dyn Any>` and reports a
//! mismatch as [`Error::InvalidInput`].

use std::any::{self, Any};

use rexec_common::error::{Error, Result};
use rexec_common::network::target::ModuleTarget;

use crate::binder::{CliOption, InputShape, ModuleInput, ParsedOptions};

/// Declarative description of a module, shown while listing modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleMetadata {
    /// Must be unique across the registry, ignoring case.
    pub unique_name: &'static str,
    pub description: &'static str,
    /// Tags used to filter modules (e.g. "SMB").
    pub labels: &'static [&'static str],
}

/// One result produced by a module for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub target: String,
    pub details: Vec<(String, String)>,
}

impl Finding {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            details: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.details.push((key.into(), value.to_string()));
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A scan capability with its own input record.
///
/// `run` is expected to expand the configured targets with
/// [`rexec_common::network::target::expand`] and call `run_once` for each of
/// them in order, stopping at the first failure.
pub trait ScanModule: Default + 'static {
    type Input: ModuleInput;

    fn configure(&mut self, input: Self::Input) -> anyhow::Result<()>;

    fn run(&mut self) -> anyhow::Result<Vec<Finding>>;

    fn run_once(&mut self, target: &ModuleTarget) -> anyhow::Result<Finding>;
}

/// Type-erased view of a [`ScanModule`].
pub trait Module {
    /// Options derived from the module's input shape.
    fn options(&self, module: &str) -> Result<Vec<CliOption>>;

    /// Builds a fresh input value from parsed options.
    fn bind(&self, parsed: &ParsedOptions) -> Box<dyn Any>;

    fn configure(&mut self, input: Box<dyn Any>) -> Result<()>;

    fn run(&mut self) -> Result<Vec<Finding>>;

    fn run_once(&mut self, target: &ModuleTarget) -> Result<Finding>;
}

impl<T: ScanModule> Module for T {
    fn options(&self, module: &str) -> Result<Vec<CliOption>> {
        InputShape::<T::Input>::of().options(module)
    }

    fn bind(&self, parsed: &ParsedOptions) -> Box<dyn Any> {
        Box::new(InputShape::<T::Input>::of().bind(parsed))
    }

    fn configure(&mut self, input: Box<dyn Any>) -> Result<()> {
        let input = input
            .downcast::<T::Input>()
            .map_err(|_| Error::InvalidInput {
                expected: any::type_name::<T::Input>(),
            })?;
        ScanModule::configure(self, *input).map_err(Error::from_module)
    }

    fn run(&mut self) -> Result<Vec<Finding>> {
        ScanModule::run(self).map_err(Error::from_module)
    }

    fn run_once(&mut self, target: &ModuleTarget) -> Result<Finding> {
        ScanModule::run_once(self, target).map_err(Error::from_module)
    }
}
