//! # Cancellation tokens
//!
//! A conjunction search over a full catalog can take long enough that the caller may
//! issue a new request before the previous one finishes. "Newest request wins" is
//! enforced explicitly: the caller hands a [`CancelToken`] to
//! [`find_neighbors`](crate::neighbors::find_neighbors) and
//! [`search_conjunction`](crate::conjunction::search_conjunction), keeps a clone, and
//! trips it when a newer request supersedes the in-flight one. The
//! running computation checks the token between steps and aborts with
//! [`SkywatchError::Cancelled`](crate::skywatch_errors::SkywatchError::Cancelled),
//! discarding its partial results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply cloneable cancellation flag shared between a caller and a running request.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the token. All clones observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
