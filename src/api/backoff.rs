// src/api/backoff.rs
//! Cooperative rate limiting driven by the server's `backoff` hints.
//!
//! A hint never delays the request that carried it. The governor collects
//! hints from every request of one logical step and, when the step is done,
//! pauses once for the largest hint plus a safety margin.

use crate::constants::BACKOFF_SAFETY_MARGIN_SECS;
use async_trait::async_trait;
use std::time::Duration;

/// The ability to suspend the run for a while.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Combines a newly observed hint with one already pending: the longer wins.
pub fn merge_backoff(observed: Option<u64>, pending: Option<u64>) -> Option<u64> {
    match (observed, pending) {
        (Some(observed), Some(pending)) => Some(observed.max(pending)),
        (observed, pending) => observed.or(pending),
    }
}

/// Tracks the pending backoff and enforces it between logical steps.
pub struct BackoffGovernor<'a> {
    pause: &'a dyn Pause,
    pending: Option<u64>,
    total_paused: Duration,
}

impl<'a> BackoffGovernor<'a> {
    pub fn new(pause: &'a dyn Pause) -> Self {
        Self {
            pause,
            pending: None,
            total_paused: Duration::ZERO,
        }
    }

    /// Records the hint carried by one response.
    pub fn observe(&mut self, backoff: Option<u64>) {
        if let Some(seconds) = backoff {
            log::debug!("Server requested a backoff of {}s", seconds);
        }
        self.pending = merge_backoff(backoff, self.pending);
    }

    /// The largest hint observed since the last pause.
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Pauses once for the pending hint plus the safety margin, then clears it.
    /// Returns the pause taken, if any.
    pub async fn settle(&mut self) -> Option<Duration> {
        let seconds = self.pending.take()?;
        let wait = Duration::from_secs(seconds + BACKOFF_SAFETY_MARGIN_SECS);
        log::warn!("Backing off for {}s as requested by the API", wait.as_secs());
        self.pause.pause(wait).await;
        self.total_paused += wait;
        Some(wait)
    }

    /// Sum of every pause taken so far.
    pub fn total_paused(&self) -> Duration {
        self.total_paused
    }
}
