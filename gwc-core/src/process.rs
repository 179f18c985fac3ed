//! Process suspension state and fuzzy process lookup.
//!
//! [`ProcessController`] owns the single piece of mutable state in the
//! system: whether the target process is currently believed suspended.
//! Pause when already paused and resume when already running are no-ops
//! that issue no OS call, so suspend counts never nest.

use parking_lot::Mutex;
use std::sync::Arc;

use sysinfo::{ProcessesToUpdate, System};

use crate::backend::Backend;
use crate::errors::{GwcError, Result};

/// Tracks and toggles the suspended/running state of the target process.
///
/// One instance is shared by every window a session hands out; the flag
/// is mutex-guarded so concurrent pause/resume calls cannot race into a
/// nested suspension.
pub struct ProcessController {
    backend: Arc<dyn Backend>,
    suspended: Mutex<bool>,
}

impl ProcessController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        ProcessController {
            backend,
            suspended: Mutex::new(false),
        }
    }

    /// Whether the target process is currently believed suspended.
    pub fn is_suspended(&self) -> bool {
        *self.suspended.lock()
    }

    /// Suspend every thread of `pid`.  No-op if already suspended.
    ///
    /// The flag lock is held across the OS call so a concurrent caller
    /// observes either "not started" or "done", never "half suspended".
    pub fn pause(&self, pid: u32) -> Result<()> {
        let mut suspended = self.suspended.lock();
        if *suspended {
            return Ok(());
        }
        self.backend.suspend_process(pid)?;
        *suspended = true;
        Ok(())
    }

    /// Resume every thread of `pid`.  No-op if not currently suspended.
    pub fn resume(&self, pid: u32) -> Result<()> {
        let mut suspended = self.suspended.lock();
        if !*suspended {
            return Ok(());
        }
        self.backend.resume_process(pid)?;
        *suspended = false;
        Ok(())
    }

    /// Fuzzy process lookup: first running process whose executable name
    /// contains `fragment` (case-insensitive).
    pub fn find_by_name(&self, fragment: &str) -> Result<u32> {
        let hints = [fragment.to_string()];
        match_process(&running_processes(), &hints, "")
            .ok_or_else(|| GwcError::ProcessNotFound(format!("no executable matching '{fragment}'")))
    }
}

/// Snapshot of running processes as `(pid, executable name)` pairs.
pub(crate) fn running_processes() -> Vec<(u32, String)> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    system
        .processes()
        .iter()
        .map(|(pid, process)| (pid.as_u32(), process.name().to_string_lossy().into_owned()))
        .collect()
}

/// First process whose name contains one of `hints`, hint-major order,
/// skipping any process named `exclude`.
///
/// Hint order is significant: every process is checked against the first
/// hint before the second hint is considered.
pub(crate) fn match_process(
    processes: &[(u32, String)],
    hints: &[String],
    exclude: &str,
) -> Option<u32> {
    for hint in hints {
        let hint = hint.to_lowercase();
        if hint.is_empty() {
            continue;
        }
        for (pid, name) in processes {
            if name.to_lowercase().contains(&hint) && !name.eq_ignore_ascii_case(exclude) {
                return Some(*pid);
            }
        }
    }
    None
}
