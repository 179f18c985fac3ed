//! Platform capability interface.
//!
//! [`Backend`] is the seam between the platform-neutral session/window
//! model and the OS primitives it rides on.  One implementation exists
//! per target OS ([`crate::platform::windows::Win32Backend`] today); the
//! tests supply a recording mock.  Window identifiers cross this boundary
//! as opaque integer tokens and are never dereferenced above it.

use std::fmt;

use serde::Serialize;

use crate::errors::Result;
use crate::frame::Frame;
use crate::geometry::Rect;
use crate::keys::Key;

/// Opaque identifier for one on-screen window.
///
/// On Win32 this is the HWND bit pattern.  A zero token never refers to
/// a live window; construction sites reject it up front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WindowId(isize);

impl WindowId {
    pub fn new(raw: isize) -> Self {
        WindowId(raw)
    }

    pub fn as_raw(self) -> isize {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// OS primitives behind the session/window contract.
///
/// Every method is a single blocking platform call (or a tight sequence
/// of them) and maps its failure to [`crate::errors::GwcError`] with the
/// failing primitive's name.  Implementations must be usable from any
/// thread; the model layer shares one instance behind an `Arc`.
pub trait Backend: Send + Sync {
    /// Verify the connection to the windowing subsystem is still usable.
    fn check(&self) -> Result<()>;

    /// Resolve a top-level window by exact title.
    fn find_window(&self, title: &str) -> Result<WindowId>;

    /// The window currently holding input focus.
    fn foreground_window(&self) -> Result<WindowId>;

    /// Exhaustive snapshot of all top-level windows at call time.
    ///
    /// No liveness filtering happens here; the session skips tokens that
    /// fail handle validation.
    fn enum_windows(&self) -> Result<Vec<WindowId>>;

    /// Post a graceful close request (never a forced terminate).
    fn post_close(&self, id: WindowId) -> Result<()>;

    /// Ask the OS to give `id` foreground focus.  Best effort: the OS may
    /// refuse under focus-stealing restrictions.
    fn set_foreground(&self, id: WindowId) -> Result<()>;

    /// Process id owning the window, or `Ok(0)` when the OS reports none.
    fn window_pid(&self, id: WindowId) -> Result<u32>;

    /// Window class name, capped at 256 UTF-16 units.
    fn window_class(&self, id: WindowId) -> Result<String>;

    /// Window title text, capped at 255 UTF-16 units.
    fn window_title(&self, id: WindowId) -> Result<String>;

    /// Current on-screen bounding box.
    fn window_rect(&self, id: WindowId) -> Result<Rect>;

    /// Resize without moving the origin or changing z-order.
    fn resize_window(&self, id: WindowId, width: i32, height: i32) -> Result<()>;

    /// Capture the window's visible contents as a top-down RGBA frame.
    fn capture_window(&self, id: WindowId) -> Result<Frame>;

    /// Synthesize a key-down event for whichever window holds focus.
    fn key_down(&self, key: Key) -> Result<()>;

    /// Synthesize a key-up event for whichever window holds focus.
    fn key_up(&self, key: Key) -> Result<()>;

    /// Suspend every execution thread of `pid`.
    fn suspend_process(&self, pid: u32) -> Result<()>;

    /// Resume every execution thread of `pid`.
    fn resume_process(&self, pid: u32) -> Result<()>;

    /// Scan running processes for an executable name containing any of
    /// `hints`, skipping `exclude` (the automation tool itself).
    fn find_process(&self, hints: &[String], exclude: &str) -> Result<u32>;
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_id_display_is_hex() {
        assert_eq!(WindowId::new(0x2a).to_string(), "0x2a");
    }

    #[test]
    fn test_null_token_detected() {
        assert!(WindowId::new(0).is_null());
        assert!(!WindowId::new(1).is_null());
    }
}
