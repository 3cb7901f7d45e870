// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation model for the readers-writer coordinator

use serde::{Deserialize, Serialize};

/// Unique identifier for an operation
///
/// Totally ordered; the order is used only for deterministic display of the
/// active set, never for admission order (which is strictly FIFO).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OpId(pub u64);

impl std::fmt::Display for OpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access mode requested by an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// Shared access; any number may be active together
    Read,
    /// Exclusive access; stores a caller-supplied value on completion
    Write,
    /// Exclusive access; stores a transformation of the current value on completion
    Update,
}

impl AccessKind {
    /// Whether this kind requires sole occupancy of the active set
    pub fn is_exclusive(&self) -> bool {
        matches!(self, AccessKind::Write | AccessKind::Update)
    }
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessKind::Read => write!(f, "read"),
            AccessKind::Write => write!(f, "write"),
            AccessKind::Update => write!(f, "update"),
        }
    }
}

/// A request for access to the shared value
///
/// Identity is the identifier plus the kind. Payloads (the written value,
/// the update transform) are held by the engine, keyed by id, so that the
/// gate machine stays payload-free and `Copy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub id: OpId,
    pub kind: AccessKind,
}

impl Operation {
    pub fn read(id: OpId) -> Self {
        Self {
            id,
            kind: AccessKind::Read,
        }
    }

    pub fn write(id: OpId) -> Self {
        Self {
            id,
            kind: AccessKind::Write,
        }
    }

    pub fn update(id: OpId) -> Self {
        Self {
            id,
            kind: AccessKind::Update,
        }
    }

    pub fn is_exclusive(&self) -> bool {
        self.kind.is_exclusive()
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
