//! Session: the entry point to the windowing subsystem.
//!
//! A [`Session`] is created once at startup and lives for the process's
//! lifetime.  It owns no windows; it is a factory that resolves
//! [`Window`](crate::window::Window) handles by title, by focus, or by
//! enumeration, and carries the shared [`ProcessController`] every handle
//! delegates pause/resume to.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::backend::{Backend, WindowId};
use crate::errors::{GwcError, Result};
use crate::geometry::Rect;
use crate::process::ProcessController;
use crate::window::Window;

/// Tunables for the press path and the process fallback scan.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How long a synthesized key is held between down and up.  The
    /// default 40ms satisfies the target game's input polling.
    pub key_dwell: Duration,
    /// How long to wait after requesting focus before trusting input to
    /// land on the right window.  Default 250ms, chosen empirically.
    pub focus_settle: Duration,
    /// Executable-name fragments tried (in order) when a window's pid
    /// cannot be read directly.
    pub process_hints: Vec<String>,
    /// Executable name never returned by the fallback scan.  Defaults to
    /// this process's own executable so the bot cannot select itself.
    pub exclude_process: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        let own_exe = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        SessionOptions {
            key_dwell: Duration::from_millis(40),
            focus_settle: Duration::from_millis(250),
            process_hints: vec!["runner".into(), "under".into(), "tale".into()],
            exclude_process: own_exe,
        }
    }
}

/// Owned snapshot of one window's metadata, for listing and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct WindowInfo {
    pub id: WindowId,
    pub title: String,
    pub class_name: String,
    pub pid: u32,
    pub rect: Rect,
}

/// Connection context to the windowing subsystem.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn Backend>,
    controller: Arc<ProcessController>,
    options: Arc<SessionOptions>,
}

impl Session {
    /// Open a session against the native OS backend with default options.
    #[cfg(windows)]
    pub fn connect() -> Result<Self> {
        Self::connect_with(SessionOptions::default())
    }

    /// Open a session against the native OS backend.
    #[cfg(windows)]
    pub fn connect_with(options: SessionOptions) -> Result<Self> {
        Self::with_backend(Arc::new(crate::platform::windows::Win32Backend), options)
    }

    /// Open a session over an explicit backend implementation.
    pub fn with_backend(backend: Arc<dyn Backend>, options: SessionOptions) -> Result<Self> {
        backend.check()?;
        let controller = Arc::new(ProcessController::new(backend.clone()));
        Ok(Session {
            backend,
            controller,
            options: Arc::new(options),
        })
    }

    /// Re-verify the subsystem connection is still usable.  Cheap; safe
    /// to call before every batch of operations.
    pub fn check(&self) -> Result<()> {
        self.backend.check()
    }

    /// The shared process controller (suspend-state owner).
    pub fn controller(&self) -> &Arc<ProcessController> {
        &self.controller
    }

    /// Find a top-level window by exact title.
    pub fn find_window(&self, title: &str) -> Result<Window> {
        let id = self.backend.find_window(title)?;
        self.window_from_id(id)
    }

    /// The window currently holding input focus.
    ///
    /// Fails with `NotFound` when nothing is focused (desktop focused).
    pub fn active_window(&self) -> Result<Window> {
        let id = self.backend.foreground_window()?;
        self.window_from_id(id)
    }

    /// Exhaustive snapshot of every top-level window at call time.
    ///
    /// Windows that fail handle validation are skipped, never surfaced:
    /// if the subsystem reports N windows and M fail construction, exactly
    /// N-M handles come back.
    pub fn enum_windows(&self) -> Result<Vec<Window>> {
        let ids = self.backend.enum_windows()?;
        Ok(ids
            .into_iter()
            .filter_map(|id| self.window_from_id(id).ok())
            .collect())
    }

    /// Metadata snapshot for every enumerable window.
    ///
    /// Per-window metadata failures (window closed mid-query) skip that
    /// window rather than aborting the listing.
    pub fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let windows = self.enum_windows()?;
        let mut infos = Vec::with_capacity(windows.len());
        for win in windows {
            let id = win.id();
            let title = match win.name() {
                Ok(t) => t,
                Err(_) => continue,
            };
            let class_name = self.class_name(&win).unwrap_or_default();
            let pid = self.window_pid(&win).unwrap_or(0);
            let rect = match win.rect() {
                Ok(r) => r,
                Err(_) => continue,
            };
            infos.push(WindowInfo {
                id,
                title,
                class_name,
                pid,
                rect,
            });
        }
        Ok(infos)
    }

    /// Request a graceful close (a close request is posted; the window
    /// decides whether to honor it).
    pub fn kill_window(&self, window: &Window) -> Result<()> {
        self.backend.post_close(window.id())
    }

    /// Ask the OS to bring `window` to the foreground.  Best effort: the
    /// OS may refuse under focus-stealing restrictions.
    pub fn bring_to_front(&self, window: &Window) -> Result<()> {
        self.backend.set_foreground(window.id())
    }

    /// Process id owning `window`.
    pub fn window_pid(&self, window: &Window) -> Result<u32> {
        match self.backend.window_pid(window.id())? {
            0 => Err(GwcError::InvalidHandle(window.id().as_raw())),
            pid => Ok(pid),
        }
    }

    /// Window class name.
    pub fn class_name(&self, window: &Window) -> Result<String> {
        self.backend.window_class(window.id())
    }

    /// Build a handle from a raw identifier, validating it refers to a
    /// plausible window.  Every construction site goes through here, so
    /// null tokens never reach a caller.
    pub fn window_from_id(&self, id: WindowId) -> Result<Window> {
        if id.is_null() {
            return Err(GwcError::InvalidHandle(id.as_raw()));
        }
        Ok(Window::new(
            self.backend.clone(),
            self.controller.clone(),
            self.options.clone(),
            id,
            Arc::new(Mutex::new(())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{MockBackend, MockWindow};

    fn fast_options() -> SessionOptions {
        SessionOptions {
            key_dwell: Duration::ZERO,
            focus_settle: Duration::ZERO,
            ..SessionOptions::default()
        }
    }

    fn session_with(windows: Vec<MockWindow>) -> (Arc<MockBackend>, Session) {
        let backend = Arc::new(MockBackend::with_windows(windows));
        let session = Session::with_backend(backend.clone(), fast_options()).unwrap();
        (backend, session)
    }

    #[test]
    fn test_find_window_by_title() {
        let (_, session) = session_with(vec![MockWindow::new(0x10, "UNDERTALE")]);
        let win = session.find_window("UNDERTALE").unwrap();
        assert_eq!(win.id(), WindowId::new(0x10));
    }

    #[test]
    fn test_find_window_not_found() {
        let (_, session) = session_with(vec![]);
        let err = session.find_window("UNDERTALE").unwrap_err();
        assert!(matches!(err, GwcError::NotFound(_)));
    }

    #[test]
    fn test_active_window_matches_find_window() {
        let (backend, session) = session_with(vec![MockWindow::new(0x10, "UNDERTALE")]);
        backend.set_foreground_id(WindowId::new(0x10));

        let found = session.find_window("UNDERTALE").unwrap();
        let active = session.active_window().unwrap();
        assert_eq!(found.id(), active.id());
    }

    #[test]
    fn test_active_window_none_focused() {
        let (_, session) = session_with(vec![MockWindow::new(0x10, "UNDERTALE")]);
        let err = session.active_window().unwrap_err();
        assert!(matches!(err, GwcError::NotFound(_)));
    }

    #[test]
    fn test_enum_skips_invalid_handles() {
        // Three reported windows, one with a null token: exactly two back.
        let (_, session) = session_with(vec![
            MockWindow::new(0x10, "UNDERTALE"),
            MockWindow::new(0, "ghost"),
            MockWindow::new(0x30, "Notepad"),
        ]);
        let windows = session.enum_windows().unwrap();
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| !w.id().is_null()));
    }

    #[test]
    fn test_kill_and_bring_to_front_delegate() {
        let (backend, session) = session_with(vec![MockWindow::new(0x10, "UNDERTALE")]);
        let win = session.find_window("UNDERTALE").unwrap();
        session.kill_window(&win).unwrap();
        session.bring_to_front(&win).unwrap();
        assert_eq!(
            backend.calls(),
            vec!["post_close(0x10)", "set_foreground(0x10)"]
        );
    }

    #[test]
    fn test_metadata_queries() {
        let (_, session) = session_with(vec![MockWindow::new(0x10, "UNDERTALE")]);
        let win = session.find_window("UNDERTALE").unwrap();
        assert_eq!(session.window_pid(&win).unwrap(), 4242);
        assert_eq!(session.class_name(&win).unwrap(), "YYGameMakerYY");
    }

    #[test]
    fn test_list_windows_snapshot() {
        let (_, session) = session_with(vec![
            MockWindow::new(0x10, "UNDERTALE"),
            MockWindow::new(0x20, "Notepad"),
        ]);
        let infos = session.list_windows().unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].title, "UNDERTALE");
        assert_eq!(infos[0].rect.width(), 640);

        let json = serde_json::to_string(&infos[0]).unwrap();
        assert!(json.contains("UNDERTALE"));
        assert!(json.contains("4242"));
    }

    #[test]
    fn test_default_options_carry_target_hints() {
        let opts = SessionOptions::default();
        assert_eq!(opts.process_hints, vec!["runner", "under", "tale"]);
        assert_eq!(opts.key_dwell, Duration::from_millis(40));
        assert_eq!(opts.focus_settle, Duration::from_millis(250));
    }
}
