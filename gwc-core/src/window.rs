//! Window handle: geometry, capture, input, and process control for one
//! on-screen window.
//!
//! A [`Window`] is valid only while its identifier still refers to a live
//! window.  Nothing here assumes liveness: every operation re-queries the
//! OS and surfaces failure instead of crashing when the window has closed.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{Backend, WindowId};
use crate::cancel::CancelToken;
use crate::errors::{GwcError, Result};
use crate::frame::Frame;
use crate::geometry::{Point, Rect};
use crate::keys::Key;
use crate::process::ProcessController;
use crate::session::SessionOptions;

/// Handle to one on-screen window, produced by a
/// [`Session`](crate::session::Session).
///
/// Clones share the same press lock, so at most one press is ever in
/// flight per window no matter how many clones exist.
#[derive(Clone)]
pub struct Window {
    backend: Arc<dyn Backend>,
    controller: Arc<ProcessController>,
    options: Arc<SessionOptions>,
    id: WindowId,
    press_lock: Arc<Mutex<()>>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Window {
    pub(crate) fn new(
        backend: Arc<dyn Backend>,
        controller: Arc<ProcessController>,
        options: Arc<SessionOptions>,
        id: WindowId,
        press_lock: Arc<Mutex<()>>,
    ) -> Self {
        Window {
            backend,
            controller,
            options,
            id,
            press_lock,
        }
    }

    /// The opaque identifier, for cross-handle comparison.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Current on-screen bounding box.
    pub fn rect(&self) -> Result<Rect> {
        self.backend.window_rect(self.id)
    }

    /// Midpoint of the current bounding box.
    pub fn center(&self) -> Result<Point> {
        Ok(self.rect()?.center())
    }

    /// Current `(width, height)`.
    pub fn size(&self) -> Result<(i32, i32)> {
        let rect = self.rect()?;
        Ok((rect.width(), rect.height()))
    }

    /// Window title text, capped at 255 UTF-16 units.
    pub fn name(&self) -> Result<String> {
        self.backend.window_title(self.id)
    }

    /// Resize in place: origin and z-order are preserved.
    pub fn resize(&self, height: i32, width: i32) -> Result<()> {
        self.backend.resize_window(self.id, width, height)
    }

    /// Request foreground focus for this window.  Best effort; the OS may
    /// refuse under focus-stealing restrictions.
    pub fn set_active(&self) -> Result<()> {
        self.backend.set_foreground(self.id)
    }

    /// Capture the window's visible contents.
    ///
    /// The returned frame is exactly `width * height * 4` bytes of RGBA,
    /// row-major, visual top row first.
    pub fn capture(&self) -> Result<Frame> {
        self.backend.capture_window(self.id)
    }

    /// Press `key` in this window, blocking until key-up has been sent.
    ///
    /// Focus is re-verified immediately before injection: synthetic input
    /// lands on whichever window holds focus, and the target may have
    /// lost it since the caller last checked.  If another window is
    /// focused, this one is activated first and the configured settle
    /// delay elapses before the down/dwell/up sequence runs.
    pub fn press(&self, key: Key) -> Result<()> {
        self.press_with(key, &CancelToken::new())
    }

    /// [`press`](Self::press) with cooperative cancellation.
    ///
    /// Cancellation is observed before each step and inside the settle
    /// and dwell sleeps.  A press cancelled after key-down still sends
    /// key-up so no key is left held.
    pub fn press_with(&self, key: Key, token: &CancelToken) -> Result<()> {
        // One in-flight press per window: two interleaved refocus
        // sequences would each refocus over the other.
        let _guard = self.press_lock.lock();

        if token.is_cancelled() {
            return Err(GwcError::Cancelled("focus check"));
        }
        let active = self.backend.foreground_window()?;
        if active != self.id {
            log::debug!("window {} not focused (active {active}); refocusing", self.id);
            self.backend.set_foreground(self.id)?;
            if !token.sleep(self.options.focus_settle) {
                return Err(GwcError::Cancelled("focus settle"));
            }
        }

        self.backend.key_down(key)?;
        let dwell_elapsed = token.sleep(self.options.key_dwell);
        self.backend.key_up(key)?;
        if !dwell_elapsed {
            return Err(GwcError::Cancelled("key dwell"));
        }
        Ok(())
    }

    /// Parse `name` against the allow-list, then press it.
    ///
    /// An unrecognized name fails with `UnsupportedKey` before any OS
    /// call is made.
    pub fn press_name(&self, name: &str) -> Result<()> {
        self.press(name.parse()?)
    }

    /// Resolve the process id owning this window.
    ///
    /// Primary path is the direct pid query on the identifier.  When that
    /// yields nothing (stale identifier, unsupported window class), the
    /// running process list is scanned for the configured name fragments,
    /// excluding this tool's own executable.
    pub fn process(&self) -> Result<u32> {
        match self.backend.window_pid(self.id) {
            Ok(pid) if pid != 0 => Ok(pid),
            _ => {
                log::warn!(
                    "direct pid query for window {} yielded nothing; scanning process list",
                    self.id
                );
                self.backend
                    .find_process(&self.options.process_hints, &self.options.exclude_process)
            }
        }
    }

    /// Suspend the owning process (all of its threads).  No-op if the
    /// process is already believed suspended.
    pub fn pause(&self) -> Result<()> {
        let pid = self.process()?;
        self.controller.pause(pid)
    }

    /// Resume the owning process.  No-op if not currently suspended.
    pub fn resume(&self) -> Result<()> {
        let pid = self.process()?;
        self.controller.resume(pid)
    }

    /// Whether the owning process is currently believed suspended.
    pub fn is_paused(&self) -> bool {
        self.controller.is_suspended()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::backend::mock::{MockBackend, MockWindow};
    use crate::session::Session;

    fn fast_options() -> SessionOptions {
        SessionOptions {
            key_dwell: Duration::ZERO,
            focus_settle: Duration::ZERO,
            ..SessionOptions::default()
        }
    }

    fn setup() -> (Arc<MockBackend>, Session, Window) {
        let backend = Arc::new(MockBackend::with_windows(vec![
            MockWindow::new(0x10, "UNDERTALE"),
            MockWindow::new(0x20, "Notepad"),
        ]));
        let session = Session::with_backend(backend.clone(), fast_options()).unwrap();
        let win = session.find_window("UNDERTALE").unwrap();
        (backend, session, win)
    }

    #[test]
    fn test_size_matches_rect_edges() {
        let (_, _, win) = setup();
        let rect = win.rect().unwrap();
        let (w, h) = win.size().unwrap();
        assert_eq!(w, rect.right - rect.left);
        assert_eq!(h, rect.bottom - rect.top);
    }

    #[test]
    fn test_center_is_rect_midpoint() {
        let (_, _, win) = setup();
        assert_eq!(win.center().unwrap(), Point { x: 320, y: 240 });
    }

    #[test]
    fn test_capture_buffer_is_exactly_wh4() {
        let (_, _, win) = setup();
        let frame = win.capture().unwrap();
        let (w, h) = win.size().unwrap();
        assert_eq!(frame.width(), w as u32);
        assert_eq!(frame.height(), h as u32);
        assert_eq!(frame.data().len(), (w * h * 4) as usize);
    }

    #[test]
    fn test_resize_keeps_origin() {
        let (_, _, win) = setup();
        win.resize(600, 800).unwrap();
        let rect = win.rect().unwrap();
        assert_eq!((rect.left, rect.top), (0, 0));
        assert_eq!((rect.width(), rect.height()), (800, 600));
    }

    #[test]
    fn test_press_skips_activation_when_focused() {
        let (backend, _, win) = setup();
        backend.set_foreground_id(win.id());
        win.press(Key::Enter).unwrap();
        assert_eq!(backend.calls(), vec!["key_down(enter)", "key_up(enter)"]);
    }

    #[test]
    fn test_press_refocuses_when_not_focused() {
        let (backend, _, win) = setup();
        backend.set_foreground_id(WindowId::new(0x20));
        win.press(Key::Enter).unwrap();
        assert_eq!(
            backend.calls(),
            vec!["set_foreground(0x10)", "key_down(enter)", "key_up(enter)"]
        );
    }

    #[test]
    fn test_press_surfaces_refused_activation() {
        let (backend, _, win) = setup();
        backend.set_foreground_id(WindowId::new(0x20));
        backend.refuse_foreground.store(true, Ordering::SeqCst);
        let err = win.press(Key::Enter).unwrap_err();
        assert!(matches!(err, GwcError::OsCall { op: "SetForegroundWindow", .. }));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_press_name_rejects_unlisted_key_without_input() {
        let (backend, _, win) = setup();
        backend.set_foreground_id(win.id());
        let err = win.press_name("space").unwrap_err();
        assert!(matches!(err, GwcError::UnsupportedKey(_)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_press_cancelled_before_start() {
        let (backend, _, win) = setup();
        backend.set_foreground_id(win.id());
        let token = CancelToken::new();
        token.cancel();
        let err = win.press_with(Key::Z, &token).unwrap_err();
        assert!(matches!(err, GwcError::Cancelled(_)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_process_prefers_direct_pid() {
        let (backend, _, win) = setup();
        assert_eq!(win.process().unwrap(), 4242);
        // No fallback scan was attempted.
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_process_falls_back_to_name_scan() {
        let (backend, _, win) = setup();
        backend.windows.lock()[0].pid = 0;
        *backend.scan_pid.lock() = Some(777);

        assert_eq!(win.process().unwrap(), 777);
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("find_process(runner|under|tale"));
    }

    #[test]
    fn test_process_not_found_when_both_paths_fail() {
        let (backend, _, win) = setup();
        backend.windows.lock()[0].pid = 0;
        let err = win.process().unwrap_err();
        assert!(matches!(err, GwcError::ProcessNotFound(_)));
    }

    #[test]
    fn test_pause_resolves_pid_and_suspends_once() {
        let (backend, _, win) = setup();
        win.pause().unwrap();
        win.pause().unwrap();
        assert_eq!(backend.calls(), vec!["suspend(4242)"]);
        assert!(win.is_paused());

        win.resume().unwrap();
        assert_eq!(backend.calls(), vec!["suspend(4242)", "resume(4242)"]);
        assert!(!win.is_paused());
    }

    #[test]
    fn test_controller_shared_across_handles() {
        let (_, session, win) = setup();
        let other = session.find_window("Notepad").unwrap();
        win.pause().unwrap();
        // The suspend flag is session-wide, not per-handle.
        assert!(other.is_paused());
    }
}
