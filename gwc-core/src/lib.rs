//! `gwc_core` -- game window control layer.
//!
//! Abstracts OS window and process manipulation behind a small
//! platform-neutral interface for an automation agent: locate a target
//! application window, capture its pixels, inject key presses into it,
//! and pause/resume its owning process.  The agent opens one [`Session`],
//! resolves a [`Window`] by title or focus, then drives capture/press/
//! pause directly on the handle.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `GwcError` enum via `thiserror` |
//! | [`keys`] | Press allow-list (`Key`) |
//! | [`geometry`] | `Rect` / `Point` |
//! | [`frame`] | Captured RGBA pixels (`Frame`) |
//! | [`backend`] | `Backend` capability trait, one impl per OS |
//! | [`session`] | `Session`: window lookup, enumeration, focus |
//! | [`window`] | `Window`: geometry, capture, press, pause/resume |
//! | [`process`] | `ProcessController`: idempotent suspend state |
//! | [`cancel`] | `CancelToken` for the press path |
//! | [`platform`] | Win32 backend (GDI capture, SendInput, Toolhelp) |

pub mod backend;
pub mod cancel;
pub mod errors;
pub mod frame;
pub mod geometry;
pub mod keys;
pub mod platform;
pub mod process;
pub mod session;
pub mod window;

pub use backend::{Backend, WindowId};
pub use cancel::CancelToken;
pub use errors::{GwcError, Result};
pub use frame::Frame;
pub use geometry::{Point, Rect};
pub use keys::Key;
pub use process::ProcessController;
pub use session::{Session, SessionOptions, WindowInfo};
pub use window::Window;
