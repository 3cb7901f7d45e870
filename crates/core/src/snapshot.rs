// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable point-in-time views of coordinator state

use crate::gate::Gate;
use crate::operation::Operation;
use serde::Serialize;

/// A copy of {value, active set, queue} taken atomically under the
/// coordinator lock
///
/// The active set is sorted by id for deterministic display; the queue
/// keeps arrival order. Observers may hold snapshots indefinitely; nothing
/// in here aliases live coordinator state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<V> {
    pub value: V,
    pub active: Vec<Operation>,
    pub queue: Vec<Operation>,
}

impl<V> Snapshot<V> {
    pub fn capture(value: V, gate: &Gate) -> Self {
        let mut active: Vec<Operation> = gate.active().to_vec();
        active.sort_by_key(|op| op.id);
        Self {
            value,
            active,
            queue: gate.queue().copied().collect(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.queue.is_empty()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
