//! Shared model and configuration for the `lanaudit` workspace.
//!
//! Everything that both the scanning engine and its front-ends need to agree on lives
//! here: the range parser, the host and scan records, scan profiles and the error
//! taxonomy. No network I/O happens in this crate.

pub mod config;
pub mod error;
pub mod network;
pub mod scan;

#[doc(hidden)]
pub use tracing as __tracing;
pub use tracing::{debug, error, info, warn};

/// Logs a completed step. Rendered with its own symbol by the CLI formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "lanaudit::success", $($arg)*)
    };
}
