//! Monotonic stop signal shared by a session's loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// One-way `false -> true` flag.
///
/// Reads are a single atomic load. Tasks that need to park until the flag is
/// raised await [`raised`](TerminationFlag::raised), which is woken by the
/// paired cancellation token. Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct TerminationFlag {
    set: Arc<AtomicBool>,
    wake: CancellationToken,
}

impl TerminationFlag {
    /// Create a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Returns `true` only for the call that raised it.
    pub fn raise(&self) -> bool {
        let first = !self.set.swap(true, Ordering::AcqRel);
        if first {
            self.wake.cancel();
        }
        first
    }

    /// Whether the flag has been raised.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    /// Resolve once the flag is raised; resolves immediately if it already is.
    pub async fn raised(&self) {
        self.wake.cancelled().await;
    }
}
