//! warden-engine: Async coordinator for the warden readers-writer system
//!
//! Drives the pure admission machine from warden-core: owns the shared
//! value, suspends requesters on per-identifier wait handles until they are
//! admitted, commits write/update effects at completion time, and delivers
//! snapshots and trace lines to a registered observer.

pub mod coordinator;
pub mod error;
pub mod observer;
pub mod triggers;

pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use observer::{ChannelObserver, Notice, Observer};
pub use triggers::{spawn_random_completer, TriggerConfig, TriggerHandle};
