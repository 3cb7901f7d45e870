// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the coordinator

use thiserror::Error;
use warden_core::OpId;

/// Errors surfaced to callers of `read`/`write`/`update`
///
/// Nothing else originates inside the coordinator: update transforms are
/// assumed total, and there is no retry - a cancelled operation is not
/// resubmitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The coordinator was cleared or torn down while this operation was
    /// waiting for admission or for its completion signal
    #[error("operation cancelled: coordinator was cleared")]
    Cancelled,
    /// The identifier already has an active or queued operation
    #[error("operation already in flight for id {0}")]
    AlreadyInFlight(OpId),
}
