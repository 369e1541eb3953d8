//! # rexec core
//!
//! The module dispatch framework:
//!
//! * **[`module`]**: the contract modules implement and their metadata.
//! * **[`binder`]**: command-line options derived from a module's input shape.
//! * **[`registry`]**: the validated, compile-time catalogue of modules.
//! * **[`tags`]**: tag based selection of registry entries.
//! * **[`pipeline`]**: resolve, bind, configure, run and report.

pub mod binder;
pub mod inputs;
pub mod module;
pub mod pipeline;
pub mod registry;
pub mod tags;
