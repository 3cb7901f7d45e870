// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission gate state machine for readers-writer coordination
//!
//! Tracks which operations hold access to the shared value (the active set)
//! and which are still waiting (the FIFO queue), and decides promotions:
//! any number of concurrent readers, or exactly one writer/updater, never
//! both. Promotion order is strict arrival order, so a waiting writer is
//! never starved by later-arriving readers.

use crate::effect::{Effect, Event};
use crate::operation::{OpId, Operation};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Inputs that can change gate state
#[derive(Clone, Debug)]
pub enum GateInput {
    /// A new request arrives at the back of the queue
    Submit { op: Operation },
    /// An active operation finished
    Complete { id: OpId },
    /// Drop everything: active set and queue
    Clear,
}

/// Admission state: the active set and the FIFO wait queue
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Operations currently holding access. Either all reads, or one
    /// writer/updater.
    active: Vec<Operation>,
    /// Waiting operations in arrival order
    queue: VecDeque<Operation>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, input: GateInput) -> (Gate, Vec<Effect>) {
        match input {
            GateInput::Submit { op } => {
                let mut gate = self.clone();
                gate.queue.push_back(op);

                let mut effects = vec![Effect::Emit(Event::Submitted { op })];
                gate.promote(&mut effects);

                debug_assert!(gate.holds_invariant());
                (gate, effects)
            }

            GateInput::Complete { id } => {
                let Some(pos) = self.active.iter().position(|a| a.id == id) else {
                    // Not active: completing an unknown or queued id is a no-op
                    return (self.clone(), vec![]);
                };

                let mut gate = self.clone();
                let op = gate.active.remove(pos);

                let mut effects = vec![Effect::Emit(Event::Completed { op })];
                gate.promote(&mut effects);

                debug_assert!(gate.holds_invariant());
                (gate, effects)
            }

            GateInput::Clear => {
                let gate = Gate::new();
                let effects = vec![Effect::Emit(Event::Cleared)];
                (gate, effects)
            }
        }
    }

    /// FIFO promotion scan
    ///
    /// Promotes from the queue front until the first entry that cannot be
    /// admitted: a read needs no active writer, a writer/updater needs an
    /// empty active set. Contiguous reads at the front are admitted in one
    /// pass, in arrival order.
    fn promote(&mut self, effects: &mut Vec<Effect>) {
        while let Some(front) = self.queue.front().copied() {
            let admissible = if front.is_exclusive() {
                self.active.is_empty()
            } else {
                !self.has_active_writer()
            };
            if !admissible {
                break;
            }

            self.queue.pop_front();
            self.active.push(front);
            effects.push(Effect::Admit { op: front });
            effects.push(Effect::Emit(Event::Admitted { op: front }));
        }
    }

    /// Whether a writer/updater currently holds access
    pub fn has_active_writer(&self) -> bool {
        self.active.iter().any(Operation::is_exclusive)
    }

    /// Whether `id` currently holds access
    pub fn is_active(&self, id: OpId) -> bool {
        self.active.iter().any(|a| a.id == id)
    }

    /// Whether `id` is active or queued
    ///
    /// An identifier must not submit a new request while a previous one is
    /// in flight; the engine rejects such submissions with a typed error.
    pub fn is_in_flight(&self, id: OpId) -> bool {
        self.is_active(id) || self.queue.iter().any(|q| q.id == id)
    }

    /// Active operations in insertion order
    pub fn active(&self) -> &[Operation] {
        &self.active
    }

    /// Queued operations in arrival order
    pub fn queue(&self) -> impl Iterator<Item = &Operation> {
        self.queue.iter()
    }

    /// Ids of the current active set, in insertion order
    pub fn active_ids(&self) -> Vec<OpId> {
        self.active.iter().map(|a| a.id).collect()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.queue.is_empty()
    }

    /// The readers-writer invariant: all shared entries, or exactly one
    /// exclusive entry
    pub fn holds_invariant(&self) -> bool {
        let writers = self.active.iter().filter(|a| a.is_exclusive()).count();
        writers == 0 || (writers == 1 && self.active.len() == 1)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
