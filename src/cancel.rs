// src/cancel.rs
//! Cooperative cancellation for long-running scans and solves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{GatexError, Result};

/// Shared flag plus optional wall-clock deadline.
///
/// Clones observe the same flag, so a token handed to worker threads can be
/// tripped from the owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that trips itself once `limit` has elapsed from now.
    #[must_use]
    pub fn with_deadline(limit: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(limit),
        }
    }

    /// Token with a deadline only when `secs` is non-zero.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::new()
        } else {
            Self::with_deadline(Duration::from_secs(secs))
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Returns `Err(Cancelled)` once the token has tripped.
    ///
    /// # Errors
    /// Returns [`GatexError::Cancelled`] after `cancel()` or past the deadline.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(GatexError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let worker = token.clone();
        assert!(worker.check().is_ok());
        token.cancel();
        assert!(matches!(worker.check(), Err(GatexError::Cancelled)));
    }

    #[test]
    fn zero_secs_means_no_deadline() {
        assert!(!CancelToken::from_secs(0).is_cancelled());
    }

    #[test]
    fn elapsed_deadline_trips() {
        let token = CancelToken::with_deadline(Duration::ZERO);
        assert!(token.is_cancelled());
    }
}
