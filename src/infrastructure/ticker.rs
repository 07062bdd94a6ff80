// src/infrastructure/ticker.rs
//
// Timer abstraction for the draw animation.
//
// The lottery never calls tokio::time directly. It asks a Ticker to wait,
// so tests can run a full draw instantly and inspect every requested delay.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Ticker: Send + Sync {
    /// Suspend the current task for `delay`
    async fn sleep(&self, delay: Duration);
}

/// Real wall-clock ticker
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTicker;

#[async_trait]
impl Ticker for TokioTicker {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Ticker that only yields to the scheduler and records what was asked of it
#[derive(Debug, Default)]
pub struct RecordingTicker {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn total(&self) -> Duration {
        self.delays().iter().sum()
    }
}

#[async_trait]
impl Ticker for RecordingTicker {
    async fn sleep(&self, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(delay);
        tokio::task::yield_now().await;
    }
}
