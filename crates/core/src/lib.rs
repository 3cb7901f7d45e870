//! warden-core: Pure state machines for the warden coordinator
//!
//! This crate provides:
//! - The operation model (readers and writers over one shared value)
//! - The admission gate state machine (FIFO readers-writer admission)
//! - Effect/event types for engine orchestration
//! - Immutable snapshots for external observers
//!
//! Nothing here blocks, sleeps, or spawns. The async surface lives in
//! warden-engine, which drives these machines and interprets their effects.

pub mod effect;
pub mod gate;
pub mod id;
pub mod operation;
pub mod snapshot;

// Re-exports
pub use effect::{Effect, Event};
pub use gate::{Gate, GateInput};
pub use id::{IdGen, SequentialIdGen};
pub use operation::{AccessKind, OpId, Operation};
pub use snapshot::Snapshot;
