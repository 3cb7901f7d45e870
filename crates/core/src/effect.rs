// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects and events emitted by the admission gate

use crate::operation::Operation;

/// Effects are actions the gate asks the engine to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emit an event for observers and trace logging
    Emit(Event),
    /// Resume the suspended requester of a newly admitted operation
    Admit { op: Operation },
}

/// Events describing admission-state changes
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    /// An operation entered the wait queue
    Submitted { op: Operation },
    /// An operation was promoted into the active set
    Admitted { op: Operation },
    /// An operation finished and left the active set
    Completed { op: Operation },
    /// The coordinator was reset; every queued and active operation was dropped
    Cleared,
}

impl Event {
    /// Event name in `category:action` form, for trace lines
    pub fn name(&self) -> &'static str {
        match self {
            Event::Submitted { .. } => "op:submitted",
            Event::Admitted { .. } => "op:admitted",
            Event::Completed { .. } => "op:completed",
            Event::Cleared => "coordinator:cleared",
        }
    }

    /// The operation this event concerns, if any
    pub fn op(&self) -> Option<Operation> {
        match self {
            Event::Submitted { op } | Event::Admitted { op } | Event::Completed { op } => Some(*op),
            Event::Cleared => None,
        }
    }
}
