//! Win32 backend: window queries via `user32`, pixel capture via GDI,
//! key injection via `SendInput`, process suspension via Toolhelp.
//!
//! All handle plumbing stays inside this module; identifiers cross the
//! [`Backend`] boundary as opaque integer tokens.

mod capture;
mod input;
mod suspend;

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, GetForegroundWindow, GetWindowRect, GetWindowTextW,
    GetWindowThreadProcessId, IsWindow, PostMessageW, SetForegroundWindow, SetWindowPos,
    SWP_NOMOVE, SWP_NOZORDER, WM_CLOSE,
};

use crate::backend::{Backend, WindowId};
use crate::errors::{GwcError, Result};
use crate::frame::Frame;
use crate::geometry::Rect;
use crate::keys::Key;
use crate::process;

/// Native Win32 implementation of [`Backend`].
///
/// Stateless: every call re-resolves the window, so a handle obtained
/// minutes ago fails cleanly instead of operating on a reused HWND.
pub struct Win32Backend;

fn hwnd(id: WindowId) -> HWND {
    HWND(id.as_raw() as *mut core::ffi::c_void)
}

fn token(handle: HWND) -> WindowId {
    WindowId::new(handle.0 as isize)
}

/// Callback for `EnumWindows` that collects every top-level handle.
unsafe extern "system" fn enum_callback(handle: HWND, lparam: LPARAM) -> BOOL {
    let ids = unsafe { &mut *(lparam.0 as *mut Vec<WindowId>) };
    ids.push(token(handle));
    TRUE // continue enumeration
}

/// Read the window title (hard cap of 255 UTF-16 units).
fn read_window_title(handle: HWND) -> Result<String> {
    let mut buf = [0u16; 255];
    let copied = unsafe { GetWindowTextW(handle, &mut buf) };
    if copied <= 0 {
        // Zero means either an empty title or a dead window; only the
        // latter is an error.
        if !unsafe { IsWindow(handle) }.as_bool() {
            return Err(GwcError::InvalidHandle(handle.0 as isize));
        }
        return Ok(String::new());
    }
    Ok(OsString::from_wide(&buf[..copied as usize])
        .to_string_lossy()
        .into_owned())
}

impl Backend for Win32Backend {
    /// Win32 has no connection handshake to go stale; the desktop is
    /// reachable whenever the process has a window station.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    fn find_window(&self, title: &str) -> Result<WindowId> {
        for id in self.enum_windows()? {
            if let Ok(t) = read_window_title(hwnd(id)) {
                if t == title {
                    return Ok(id);
                }
            }
        }
        Err(GwcError::NotFound(format!("window titled '{title}'")))
    }

    fn foreground_window(&self) -> Result<WindowId> {
        let handle = unsafe { GetForegroundWindow() };
        if handle.0.is_null() {
            return Err(GwcError::NotFound("no window has focus".into()));
        }
        Ok(token(handle))
    }

    fn enum_windows(&self) -> Result<Vec<WindowId>> {
        let mut ids: Vec<WindowId> = Vec::with_capacity(64);
        unsafe {
            EnumWindows(
                Some(enum_callback),
                LPARAM(&mut ids as *mut Vec<WindowId> as isize),
            )
        }
        .map_err(|e| GwcError::os_call("EnumWindows", e))?;
        Ok(ids)
    }

    fn post_close(&self, id: WindowId) -> Result<()> {
        unsafe { PostMessageW(hwnd(id), WM_CLOSE, WPARAM(0), LPARAM(0)) }
            .map_err(|e| GwcError::os_call("PostMessageW(WM_CLOSE)", e))
    }

    fn set_foreground(&self, id: WindowId) -> Result<()> {
        if !unsafe { SetForegroundWindow(hwnd(id)) }.as_bool() {
            return Err(GwcError::os_call(
                "SetForegroundWindow",
                "the OS refused to change focus",
            ));
        }
        Ok(())
    }

    fn window_pid(&self, id: WindowId) -> Result<u32> {
        let mut pid: u32 = 0;
        unsafe { GetWindowThreadProcessId(hwnd(id), Some(&mut pid)) };
        Ok(pid)
    }

    fn window_class(&self, id: WindowId) -> Result<String> {
        let mut buf = [0u16; 256];
        let len = unsafe { GetClassNameW(hwnd(id), &mut buf) };
        if len <= 0 {
            return Err(GwcError::os_call("GetClassNameW", "no class name returned"));
        }
        Ok(OsString::from_wide(&buf[..len as usize])
            .to_string_lossy()
            .into_owned())
    }

    fn window_title(&self, id: WindowId) -> Result<String> {
        read_window_title(hwnd(id))
    }

    fn window_rect(&self, id: WindowId) -> Result<Rect> {
        let mut raw = RECT::default();
        unsafe { GetWindowRect(hwnd(id), &mut raw) }
            .map_err(|e| GwcError::os_call("GetWindowRect", e))?;
        Ok(Rect::new(raw.left, raw.top, raw.right, raw.bottom))
    }

    fn resize_window(&self, id: WindowId, width: i32, height: i32) -> Result<()> {
        unsafe {
            SetWindowPos(
                hwnd(id),
                HWND::default(), // ignored due to SWP_NOZORDER
                0,
                0,
                width,
                height,
                SWP_NOMOVE | SWP_NOZORDER,
            )
        }
        .map_err(|e| GwcError::os_call("SetWindowPos", e))
    }

    fn capture_window(&self, id: WindowId) -> Result<Frame> {
        let rect = self.window_rect(id)?;
        capture::capture_window(hwnd(id), rect)
    }

    fn key_down(&self, key: Key) -> Result<()> {
        input::send_key(key, false)
    }

    fn key_up(&self, key: Key) -> Result<()> {
        input::send_key(key, true)
    }

    fn suspend_process(&self, pid: u32) -> Result<()> {
        suspend::suspend_process(pid)
    }

    fn resume_process(&self, pid: u32) -> Result<()> {
        suspend::resume_process(pid)
    }

    fn find_process(&self, hints: &[String], exclude: &str) -> Result<u32> {
        process::match_process(&process::running_processes(), hints, exclude).ok_or_else(|| {
            GwcError::ProcessNotFound(format!(
                "no running executable matches any of {hints:?} (excluding {exclude})"
            ))
        })
    }
}
