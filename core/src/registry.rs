//! # Module Registry
//!
//! The catalogue of modules compiled into the binary. It is built and
//! validated once at startup and only read afterwards.

use std::collections::HashMap;

use rexec_common::error::{Error, Result};
use tracing::debug;

use crate::module::{Module, ModuleMetadata, ScanModule};
use crate::tags;

/// A module's metadata paired with its constructor.
#[derive(Clone, Copy)]
pub struct ModuleEntry {
    pub metadata: ModuleMetadata,
    pub factory: fn() -> Box<dyn Module>,
}

impl ModuleEntry {
    pub fn new<T: ScanModule>(metadata: ModuleMetadata) -> Self {
        Self {
            metadata,
            factory: construct::<T>,
        }
    }

    /// A fresh, unconfigured instance of the module.
    pub fn instantiate(&self) -> Box<dyn Module> {
        (self.factory)()
    }
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

fn construct<T: ScanModule>() -> Box<dyn Module> {
    Box::new(T::default())
}

#[derive(Debug)]
pub struct Registry {
    entries: Vec<ModuleEntry>,
}

impl Registry {
    /// Validates `entries` and freezes them into a registry.
    pub fn new(entries: Vec<ModuleEntry>) -> Result<Self> {
        validate(&entries)?;
        debug!(modules = entries.len(), "Module registry ready");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn filter(&self, tags: &[String]) -> Vec<&ModuleEntry> {
        tags::filter(&self.entries, tags)
    }

    pub fn all_tags(&self) -> Vec<String> {
        tags::collect_all_tags(&self.entries)
    }

    /// Finds a module by name anywhere in the registry, ignoring case.
    pub fn find(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries
            .iter()
            .find(|entry| entry.metadata.unique_name.eq_ignore_ascii_case(name))
    }
}

/// Checks the catalogue for ambiguous names and option collisions.
pub fn validate(entries: &[ModuleEntry]) -> Result<()> {
    let mut seen: HashMap<String, &'static str> = HashMap::new();

    for entry in entries {
        let name = entry.metadata.unique_name;
        if let Some(previous) = seen.insert(name.to_ascii_lowercase(), name) {
            return Err(Error::DuplicateModuleName {
                name: name.to_ascii_lowercase(),
                variants: vec![previous.to_string(), name.to_string()],
            });
        }
    }

    for entry in entries {
        entry.instantiate().options(entry.metadata.unique_name)?;
    }

    Ok(())
}
