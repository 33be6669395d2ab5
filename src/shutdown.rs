use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Broadcast channel size for fast-fail notifications (single signal fan-out).
const FAST_FAIL_CHANNEL_CAPACITY: usize = 1;

/// One-shot cancellation flag shared by every task of a concurrent batch.
///
/// The flag can only be tripped once; all clones observe it, and tasks that
/// subscribed before the trip are woken through the broadcast channel.
#[derive(Debug, Clone)]
pub struct FastFailSignal {
    inner: Arc<FastFailState>,
}

#[derive(Debug)]
struct FastFailState {
    tripped: AtomicBool,
    notify: ShutdownSender,
}

impl FastFailSignal {
    #[must_use]
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel::<()>(FAST_FAIL_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(FastFailState {
                tripped: AtomicBool::new(false),
                notify,
            }),
        }
    }

    /// Trips the signal. Returns `true` only for the call that tripped it.
    pub fn trip(&self) -> bool {
        let first = self
            .inner
            .tripped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if first {
            drop(self.inner.notify.send(()));
        }
        first
    }

    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.inner.tripped.load(Ordering::Acquire)
    }

    /// Subscribe before checking [`Self::is_tripped`] so a trip in between is not missed.
    #[must_use]
    pub fn subscribe(&self) -> ShutdownReceiver {
        self.inner.notify.subscribe()
    }
}

impl Default for FastFailSignal {
    fn default() -> Self {
        Self::new()
    }
}
