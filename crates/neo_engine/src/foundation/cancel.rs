//! Cancellation tokens bound to a scene or component lifetime
//!
//! Asynchronous work (texture loads) carries a clone of the owner's token.
//! Once the owner is torn down the token is cancelled and any late result is
//! discarded instead of being applied to a disposed scene.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a live token
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token and every clone of it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the owning lifetime has ended
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
