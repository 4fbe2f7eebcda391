//! Timer-driven progressive reveal with epoch-based cancellation.
//!
//! An [`Epoch`] is a generation counter shared between a session and the
//! background tasks it spawns. Teardown bumps the counter; every scheduled
//! step re-checks its captured value before mutating anything, so no timer
//! can touch state after the session is discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// Epoch / EpochGuard
// =============================================================================

/// Shared cancellation generation counter.
#[derive(Debug, Default, Clone)]
pub struct Epoch {
    counter: Arc<AtomicU64>,
}

impl Epoch {
    /// Create a fresh epoch at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current generation for later staleness checks.
    pub fn observe(&self) -> EpochGuard {
        EpochGuard {
            counter: Arc::clone(&self.counter),
            observed: self.counter.load(Ordering::SeqCst),
        }
    }

    /// Invalidate all previously observed guards.
    pub fn bump(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// A captured epoch generation held by an in-flight task.
#[derive(Debug)]
pub struct EpochGuard {
    counter: Arc<AtomicU64>,
    observed: u64,
}

impl EpochGuard {
    /// True while no bump has happened since this guard was captured.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.observed
    }
}

// =============================================================================
// RevealScheduler
// =============================================================================

/// Drives the character-by-character disclosure of one assistant turn.
///
/// Produces the lazy, finite sequence of prefix lengths `1..=total_chars`,
/// one per `step`, via the `apply` callback. Non-restartable: one run per
/// turn.
#[derive(Debug, Clone, Copy)]
pub struct RevealScheduler {
    step: Duration,
    start_delay: Duration,
}

impl RevealScheduler {
    /// Create a scheduler with the given per-character step and initial
    /// pre-reveal delay.
    pub fn new(step: Duration, start_delay: Duration) -> Self {
        Self { step, start_delay }
    }

    /// Run the reveal to completion or cancellation.
    ///
    /// `apply(n)` is invoked with each successive prefix length; the guard
    /// is checked before every invocation, so a stale epoch stops the run
    /// without a final mutation. Returns true only if the full content was
    /// emitted.
    pub async fn run<F>(&self, total_chars: usize, guard: &EpochGuard, mut apply: F) -> bool
    where
        F: FnMut(usize),
    {
        if !self.start_delay.is_zero() {
            tokio::time::sleep(self.start_delay).await;
        }
        for prefix_len in 1..=total_chars {
            tokio::time::sleep(self.step).await;
            if !guard.is_current() {
                tracing::debug!(prefix_len, total_chars, "Reveal cancelled");
                return false;
            }
            apply(prefix_len);
        }
        guard.is_current()
    }
}

// =============================================================================
// Tests
// =============================================================================
