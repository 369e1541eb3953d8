//! Modules compiled into `rexec`.
//!
//! Adding a module means implementing [`ScanModule`](rexec_core::module::ScanModule)
//! and listing it in [`catalogue`].

pub mod dns;
pub mod smb;

use rexec_common::error::Result;
use rexec_core::registry::{ModuleEntry, Registry};

/// Every module known to the binary, in listing order.
pub fn catalogue() -> Vec<ModuleEntry> {
    vec![
        ModuleEntry::new::<smb::ListSharesModule>(smb::list_shares::METADATA),
        ModuleEntry::new::<dns::ResolveHostModule>(dns::resolve_host::METADATA),
    ]
}

/// Builds and validates the registry from [`catalogue`].
pub fn registry() -> Result<Registry> {
    Registry::new(catalogue())
}
