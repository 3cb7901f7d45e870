// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External completion trigger producers
//!
//! The UI layer completes operations by calling `complete_id` /
//! `complete_random` / `complete_all` directly. The random timer modeled
//! here is an independent producer doing the same thing on a schedule; it
//! is not part of the coordinator's own logic.

use crate::coordinator::Coordinator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Random completion trigger configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Base pause between completion attempts
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Extra random pause added on top of the interval, up to this much
    #[serde(with = "humantime_serde", default)]
    pub jitter: Duration,
}

impl TriggerConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    fn pause(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.interval;
        }
        let cap = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        let extra = rand::rng().random_range(0..=cap);
        self.interval + Duration::from_millis(extra)
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Handle for a running trigger task
pub struct TriggerHandle {
    stop: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TriggerHandle {
    /// Stop the trigger and wait for its task to finish
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.join.await;
    }
}

/// Spawn a task that completes one random active operation per tick
pub fn spawn_random_completer<V>(
    coordinator: Coordinator<V>,
    config: TriggerConfig,
) -> TriggerHandle
where
    V: Clone + Debug + Send + 'static,
{
    let (stop, mut stopped) = watch::channel(false);

    let join = tokio::spawn(async move {
        loop {
            let pause = config.pause();
            tokio::select! {
                _ = tokio::time::sleep(pause) => {
                    if coordinator.complete_random() {
                        debug!("random trigger completed an operation");
                    }
                }
                changed = stopped.changed() => {
                    if changed.is_err() || *stopped.borrow() {
                        break;
                    }
                }
            }
        }
    });

    TriggerHandle { stop, join }
}

#[cfg(test)]
#[path = "triggers_tests.rs"]
mod tests;
