//! Error types for `deskbind_core`.
//!
//! One flat taxonomy shared by every facade, via `thiserror`.  Fallible
//! operations return [`Result`] immediately to their caller; there are no
//! retries anywhere.  Enumeration-style operations treat per-item failures
//! as silent skips instead of propagating.

use thiserror::Error;
use windows::core::Error as WindowsError;

/// Top-level error type for the `deskbind_core` library.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// No window matched the lookup (title search, active/foreground query).
    #[error("window not found: {0}")]
    WindowNotFound(String),

    /// The handle does not name a live window.  Every handle-taking
    /// operation checks this before touching any other platform API.
    #[error("invalid window handle")]
    InvalidHandle,

    /// A platform call failed for a reason outside the other variants.
    #[error("operation failed: {0}")]
    OperationFailed(String),

    /// The OS denied the request.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Caller-supplied parameter out of contract (bad dimensions, region
    /// outside the window bounds).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pixel-buffer allocation or sizing failure.
    #[error("memory allocation failed: {0}")]
    MemoryAllocationFailed(String),

    /// Device-context or bitmap failure during capture.
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// Keyboard/mouse message injection failure.
    #[error("input simulation failed: {0}")]
    InputSimulationFailed(String),
}

/// Convert a `windows::core::Error` (Win32 failure surfaced by the bindings)
/// into the catch-all [`AutomationError::OperationFailed`].
impl From<WindowsError> for AutomationError {
    fn from(err: WindowsError) -> Self {
        AutomationError::OperationFailed(format!("Windows API error: {err}"))
    }
}

/// Library-wide result alias.
pub type Result<T> = std::result::Result<T, AutomationError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
