// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observer interface for admission-state changes
//!
//! The coordinator pushes notices onto an internal channel under its state
//! lock, so delivery order matches transition order; a forwarding task
//! drains the channel and calls the registered observer. Delivery is
//! fire-and-forget - a slow or failing observer never blocks or corrupts
//! the coordinator.

use async_trait::async_trait;
use tokio::sync::mpsc;
use warden_core::Snapshot;

/// What the coordinator reports after each state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Notice<V> {
    /// Immutable view of {value, active set, queue} after the transition
    Snapshot(Snapshot<V>),
    /// One human-readable trace line (submitted / admitted / completed / cleared)
    Log(String),
}

/// Receives snapshots and trace lines from the coordinator
#[async_trait]
pub trait Observer<V: Send + 'static>: Send {
    async fn on_snapshot(&mut self, snapshot: Snapshot<V>);
    async fn on_log(&mut self, line: String);
}

/// Observer that forwards notices into an mpsc channel
///
/// Used by the sim console and by tests that assert on delivery order.
pub struct ChannelObserver<V> {
    tx: mpsc::UnboundedSender<Notice<V>>,
}

impl<V> ChannelObserver<V> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice<V>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl<V: Send + 'static> Observer<V> for ChannelObserver<V> {
    async fn on_snapshot(&mut self, snapshot: Snapshot<V>) {
        let _ = self.tx.send(Notice::Snapshot(snapshot));
    }

    async fn on_log(&mut self, line: String) {
        let _ = self.tx.send(Notice::Log(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_observer_forwards_in_order() {
        let (mut obs, mut rx) = ChannelObserver::new();
        obs.on_log("first".to_string()).await;
        obs.on_snapshot(Snapshot {
            value: 1,
            active: vec![],
            queue: vec![],
        })
        .await;

        assert_eq!(rx.try_recv().ok(), Some(Notice::Log("first".to_string())));
        assert!(matches!(rx.try_recv().ok(), Some(Notice::Snapshot(s)) if s.value == 1));
    }

    #[tokio::test]
    async fn channel_observer_survives_dropped_receiver() {
        let (mut obs, rx) = ChannelObserver::<i64>::new();
        drop(rx);
        // Fire-and-forget: no panic, no error
        obs.on_log("into the void".to_string()).await;
    }
}
