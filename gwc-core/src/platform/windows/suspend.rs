//! Whole-process suspension via per-thread `SuspendThread`.
//!
//! Win32 has no public suspend-process primitive, so the process's
//! threads are enumerated through a Toolhelp snapshot and each one is
//! suspended (or resumed) individually.  Suspending a single thread
//! would leave the rest of the process running.  Thread handles and the
//! snapshot handle are RAII-guarded so a failure partway through never
//! leaks a handle.

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Thread32First, Thread32Next, TH32CS_SNAPTHREAD, THREADENTRY32,
};
use windows::Win32::System::Threading::{
    OpenThread, ResumeThread, SuspendThread, THREAD_SUSPEND_RESUME,
};

use crate::errors::{GwcError, Result};

/// Closes the wrapped handle on drop, on every path.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

#[derive(Clone, Copy)]
enum ThreadOp {
    Suspend,
    Resume,
}

impl ThreadOp {
    fn name(self) -> &'static str {
        match self {
            ThreadOp::Suspend => "suspend",
            ThreadOp::Resume => "resume",
        }
    }
}

/// Thread ids owned by `pid` at snapshot time.
fn threads_of(pid: u32) -> Result<Vec<u32>> {
    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPTHREAD, 0) }
        .map_err(|e| GwcError::os_call("CreateToolhelp32Snapshot", e))?;
    let snapshot = HandleGuard(snapshot);

    let mut entry = THREADENTRY32 {
        dwSize: std::mem::size_of::<THREADENTRY32>() as u32,
        ..Default::default()
    };

    let mut tids = Vec::new();
    if unsafe { Thread32First(snapshot.0, &mut entry) }.is_ok() {
        loop {
            if entry.th32OwnerProcessID == pid {
                tids.push(entry.th32ThreadID);
            }
            if unsafe { Thread32Next(snapshot.0, &mut entry) }.is_err() {
                break;
            }
        }
    }
    Ok(tids)
}

/// Apply `op` to every thread of `pid`.
///
/// A thread that exited between the snapshot and `OpenThread` is skipped.
/// Zero threads found means the process is gone; zero threads touched
/// means the OS refused access to all of them.
fn apply_to_threads(pid: u32, op: ThreadOp) -> Result<()> {
    let tids = threads_of(pid)?;
    if tids.is_empty() {
        return Err(GwcError::ProcessNotFound(format!(
            "no threads owned by pid {pid}"
        )));
    }

    let total = tids.len();
    let mut applied = 0usize;
    for tid in tids {
        let handle = match unsafe { OpenThread(THREAD_SUSPEND_RESUME, false, tid) } {
            Ok(h) => HandleGuard(h),
            Err(_) => continue,
        };
        let previous_count = unsafe {
            match op {
                ThreadOp::Suspend => SuspendThread(handle.0),
                ThreadOp::Resume => ResumeThread(handle.0),
            }
        };
        if previous_count != u32::MAX {
            applied += 1;
        }
    }

    log::debug!("{} applied to {applied}/{total} threads of pid {pid}", op.name());
    if applied == 0 {
        return Err(GwcError::PermissionDenied(format!(
            "could not {} any of the {total} threads of pid {pid}",
            op.name()
        )));
    }
    Ok(())
}

/// Suspend every thread of `pid`.
pub(super) fn suspend_process(pid: u32) -> Result<()> {
    apply_to_threads(pid, ThreadOp::Suspend)
}

/// Resume every thread of `pid`.
pub(super) fn resume_process(pid: u32) -> Result<()> {
    apply_to_threads(pid, ThreadOp::Resume)
}
