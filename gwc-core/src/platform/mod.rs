//! Platform backends.
//!
//! Each child module implements [`crate::backend::Backend`] for one
//! target OS.  Only Win32 exists today; the session/window model above
//! this line is platform-neutral.

#[cfg(windows)]
pub mod windows;
