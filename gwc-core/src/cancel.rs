//! Cooperative cancellation for the press path.
//!
//! A press spends most of its time asleep (focus settle, key dwell), so
//! cancellation is observed between OS calls and inside those sleeps.
//! Cloned tokens share state; cancelling any clone cancels them all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the token; every clone observes the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Sleep for `dur`, waking early if the token is cancelled.
    ///
    /// Returns `true` if the full duration elapsed, `false` on cancellation.
    /// The sleep is sliced so cancellation latency stays around 10ms.
    pub(crate) fn sleep(&self, dur: Duration) -> bool {
        const SLICE: Duration = Duration::from_millis(10);
        let deadline = Instant::now() + dur;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep(SLICE.min(deadline - now));
        }
    }
}
