// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation id generation

use crate::operation::OpId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates unique operation ids
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> OpId;
}

/// Sequential id generator; shared across clones
///
/// Callers own id allocation (the coordinator only checks that an id is not
/// already in flight), so a process-wide sequential counter is all the sim
/// and the tests need.
#[derive(Clone, Default)]
pub struct SequentialIdGen {
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> OpId {
        OpId(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
