//! Error types for `gwc_core`.
//!
//! All failures are funnelled through [`GwcError`], which uses `thiserror`
//! for `Display` and `Error` derives.  Every OS-call failure carries the
//! name of the failing primitive so a caller can see which step of an
//! operation went wrong; nothing below this layer is silently swallowed.

use thiserror::Error;

/// Top-level error type for the `gwc_core` library.
#[derive(Debug, Error)]
pub enum GwcError {
    /// A window or process lookup yielded nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// An operation was attempted on a window identifier that no longer
    /// resolves to a live window.
    #[error("invalid window handle {0:#x}")]
    InvalidHandle(isize),

    /// The OS refused a privileged operation (thread suspension, usually).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The requested key is not in the press allow-list.
    #[error("unsupported key '{0}'")]
    UnsupportedKey(String),

    /// Neither the direct pid query nor the executable-name scan found
    /// the owning process.
    #[error("process not found: {0}")]
    ProcessNotFound(String),

    /// The operation was cancelled via a [`crate::cancel::CancelToken`].
    #[error("operation cancelled during {0}")]
    Cancelled(&'static str),

    /// An underlying platform call failed; `op` names the primitive.
    #[error("{op} failed: {detail}")]
    OsCall { op: &'static str, detail: String },
}

impl GwcError {
    /// Wrap a platform failure with the name of the failing call.
    pub fn os_call(op: &'static str, detail: impl std::fmt::Display) -> Self {
        GwcError::OsCall {
            op,
            detail: detail.to_string(),
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GwcError>;
