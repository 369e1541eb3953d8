//! Shared models for `rexec`: targets, credentials, configuration and the
//! framework error type.

pub mod auth;
pub mod config;
pub mod error;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;

/// Logs a success line, rendered with a check mark by the CLI formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "rexec::success", $($arg)*)
    };
}
