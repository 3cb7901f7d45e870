// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The readers-writer coordinator
//!
//! One `Coordinator` guards one shared value. Callers submit read, write,
//! or update requests and suspend until the admission gate promotes them;
//! an admitted operation runs either for a fixed simulated-work duration or
//! until an external completion trigger fires. Write and update effects
//! commit at completion time, under the same lock that serializes every
//! other transition.
//!
//! Locking discipline: `Inner` sits behind one `std::sync::Mutex` that is
//! held only while mutating state. Suspension happens on oneshot receivers
//! outside the lock. Oneshot and unbounded-channel sends never block, so
//! resolving waiters and pushing observer notices under the lock is safe
//! and keeps notification order equal to transition order.

use crate::error::CoordinatorError;
use crate::observer::{Notice, Observer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use warden_core::{Effect, Event, Gate, GateInput, OpId, Operation, Snapshot};

/// Commit payload for an in-flight operation, keyed by id
enum Body<V> {
    Read,
    Write(V),
    /// Applied to the value current at completion time, not at request time
    Update(Box<dyn FnOnce(&V) -> V + Send>),
}

/// How an admitted operation completes
enum Pending<V> {
    /// Sleep for a fixed duration, then commit
    Timed(Duration),
    /// Wait for an external trigger (or clear) to resolve the finish handle
    Signalled(oneshot::Receiver<Result<V, CoordinatorError>>),
}

struct Inner<V> {
    value: V,
    /// Reset target for `clear`
    baseline: V,
    /// Bumped on every clear. A timed body records the epoch it was
    /// submitted under; a timer that outlives a clear must not commit into
    /// a later epoch, where its id may belong to a fresh operation.
    epoch: u64,
    gate: Gate,
    bodies: HashMap<OpId, Body<V>>,
    /// One pending admission handle per in-flight id
    admit_waiters: HashMap<OpId, oneshot::Sender<Result<(), CoordinatorError>>>,
    /// One pending finish handle per signalled id; timed operations have none
    finish_waiters: HashMap<OpId, oneshot::Sender<Result<V, CoordinatorError>>>,
    /// Observer channel; `None` until an observer attaches
    notices: Option<mpsc::UnboundedSender<Notice<V>>>,
}

impl<V: Clone + Debug> Inner<V> {
    /// Install a transition result: update the gate, resolve admissions,
    /// forward events, and emit one snapshot
    fn apply(&mut self, gate: Gate, effects: Vec<Effect>) {
        self.gate = gate;
        for effect in effects {
            match effect {
                Effect::Admit { op } => {
                    if let Some(tx) = self.admit_waiters.remove(&op.id) {
                        let _ = tx.send(Ok(()));
                    }
                }
                Effect::Emit(event) => self.trace(&event),
            }
        }
        if let Some(tx) = &self.notices {
            let _ = tx.send(Notice::Snapshot(Snapshot::capture(
                self.value.clone(),
                &self.gate,
            )));
        }
    }

    fn trace(&self, event: &Event) {
        let line = match event {
            Event::Submitted { op } => format!("{op} submitted"),
            Event::Admitted { op } => format!("{op} admitted, begins execution"),
            Event::Completed { op } if op.is_exclusive() => {
                format!("{op} completed, value now {:?}", self.value)
            }
            Event::Completed { op } => format!("{op} completed"),
            Event::Cleared => format!("cleared, value reset to {:?}", self.value),
        };
        debug!(event = event.name(), "{line}");
        if let Some(tx) = &self.notices {
            let _ = tx.send(Notice::Log(line));
        }
    }

    /// Apply the operation's commit payload and return the resulting value
    fn commit(&mut self, id: OpId) -> V {
        match self.bodies.remove(&id) {
            Some(Body::Write(value)) => self.value = value,
            Some(Body::Update(transform)) => self.value = transform(&self.value),
            Some(Body::Read) | None => {}
        }
        self.value.clone()
    }

    /// Complete one active signalled operation
    ///
    /// Returns false when the id is not active or has no finish handle
    /// (timed operations complete only via their timer).
    fn finish_one(&mut self, id: OpId) -> bool {
        if !self.gate.is_active(id) {
            return false;
        }
        let Some(tx) = self.finish_waiters.remove(&id) else {
            return false;
        };

        let value = self.commit(id);
        let (gate, effects) = self.gate.transition(GateInput::Complete { id });
        self.apply(gate, effects);
        let _ = tx.send(Ok(value));
        true
    }

    /// Cancel every outstanding waiter, drop pending bodies, and reset
    fn reset(&mut self, baseline: V) {
        for (_, tx) in self.admit_waiters.drain() {
            let _ = tx.send(Err(CoordinatorError::Cancelled));
        }
        for (_, tx) in self.finish_waiters.drain() {
            let _ = tx.send(Err(CoordinatorError::Cancelled));
        }
        self.bodies.clear();
        self.value = baseline;
        self.epoch += 1;

        let (gate, effects) = self.gate.transition(GateInput::Clear);
        self.apply(gate, effects);
    }
}

/// Coordinator for one shared value
///
/// Cheap to clone; all clones share the same state. Suspended callers each
/// hold a clone, so the state outlives every waiter; `clear` is the
/// teardown path and resolves all of them with `Cancelled`.
pub struct Coordinator<V> {
    inner: Arc<Mutex<Inner<V>>>,
}

impl<V> Clone for Coordinator<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Coordinator<V>
where
    V: Clone + Debug + Send + 'static,
{
    /// Create a coordinator with the given initial value, which also
    /// becomes the `clear` baseline
    pub fn new(baseline: V) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: baseline.clone(),
                baseline,
                epoch: 0,
                gate: Gate::new(),
                bodies: HashMap::new(),
                admit_waiters: HashMap::new(),
                finish_waiters: HashMap::new(),
                notices: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    // === Requests ===

    /// Shared read; completes when an external trigger fires. Returns the
    /// value current at completion.
    pub async fn read(&self, id: OpId) -> Result<V, CoordinatorError> {
        self.run(Operation::read(id), Body::Read, None).await
    }

    /// Shared read with a fixed simulated-work duration
    pub async fn read_for(&self, id: OpId, work: Duration) -> Result<V, CoordinatorError> {
        self.run(Operation::read(id), Body::Read, Some(work)).await
    }

    /// Exclusive write; commits `value` at completion and returns it
    pub async fn write(&self, id: OpId, value: V) -> Result<V, CoordinatorError> {
        self.run(Operation::write(id), Body::Write(value), None).await
    }

    /// Exclusive write with a fixed simulated-work duration
    pub async fn write_for(
        &self,
        id: OpId,
        value: V,
        work: Duration,
    ) -> Result<V, CoordinatorError> {
        self.run(Operation::write(id), Body::Write(value), Some(work))
            .await
    }

    /// Exclusive update; applies `transform` to the value current at
    /// completion time and returns the result
    pub async fn update<F>(&self, id: OpId, transform: F) -> Result<V, CoordinatorError>
    where
        F: FnOnce(&V) -> V + Send + 'static,
    {
        self.run(Operation::update(id), Body::Update(Box::new(transform)), None)
            .await
    }

    /// Exclusive update with a fixed simulated-work duration
    pub async fn update_for<F>(
        &self,
        id: OpId,
        transform: F,
        work: Duration,
    ) -> Result<V, CoordinatorError>
    where
        F: FnOnce(&V) -> V + Send + 'static,
    {
        self.run(
            Operation::update(id),
            Body::Update(Box::new(transform)),
            Some(work),
        )
        .await
    }

    /// Enqueue, suspend until admitted, then run the body to completion
    async fn run(
        &self,
        op: Operation,
        body: Body<V>,
        work: Option<Duration>,
    ) -> Result<V, CoordinatorError> {
        let (admit_rx, pending, epoch) = {
            let mut inner = self.lock();
            if inner.gate.is_in_flight(op.id) {
                return Err(CoordinatorError::AlreadyInFlight(op.id));
            }
            let epoch = inner.epoch;

            let (admit_tx, admit_rx) = oneshot::channel();
            inner.admit_waiters.insert(op.id, admit_tx);

            // The finish handle is registered alongside the admission
            // handle so a trigger firing right after promotion always
            // finds it.
            let pending = match work {
                Some(duration) => Pending::Timed(duration),
                None => {
                    let (finish_tx, finish_rx) = oneshot::channel();
                    inner.finish_waiters.insert(op.id, finish_tx);
                    Pending::Signalled(finish_rx)
                }
            };
            inner.bodies.insert(op.id, body);

            let (gate, effects) = inner.gate.transition(GateInput::Submit { op });
            inner.apply(gate, effects);
            (admit_rx, pending, epoch)
        };

        // Suspend without the lock until the gate promotes us. A dropped
        // sender means the coordinator itself was torn down.
        admit_rx.await.map_err(|_| CoordinatorError::Cancelled)??;

        match pending {
            Pending::Timed(duration) => {
                tokio::time::sleep(duration).await;
                self.finish_timed(op.id, epoch)
            }
            Pending::Signalled(finish_rx) => {
                finish_rx.await.map_err(|_| CoordinatorError::Cancelled)?
            }
        }
    }

    /// Commit a timed body after its work duration elapsed
    ///
    /// The epoch check covers id reuse: a clear may have cancelled this
    /// operation and a fresh one under the same id may be active by the
    /// time the timer fires. That fresh operation is not ours to complete.
    fn finish_timed(&self, id: OpId, epoch: u64) -> Result<V, CoordinatorError> {
        let mut inner = self.lock();
        if inner.epoch != epoch || !inner.gate.is_active(id) {
            // Cleared while the timer was running; nothing to commit
            return Err(CoordinatorError::Cancelled);
        }
        let value = inner.commit(id);
        let (gate, effects) = inner.gate.transition(GateInput::Complete { id });
        inner.apply(gate, effects);
        Ok(value)
    }

    // === Completion triggers ===

    /// Complete the active signalled operation with this id
    ///
    /// Returns whether a match was found. Queued ids, unknown ids, and
    /// timed operations (whose timer owns their completion) do not match.
    pub fn complete_id(&self, id: OpId) -> bool {
        self.lock().finish_one(id)
    }

    /// Complete one active signalled operation, chosen uniformly at random
    pub fn complete_random(&self) -> bool {
        use rand::seq::IndexedRandom;

        let mut inner = self.lock();
        let candidates: Vec<OpId> = inner
            .gate
            .active_ids()
            .into_iter()
            .filter(|id| inner.finish_waiters.contains_key(id))
            .collect();
        match candidates.choose(&mut rand::rng()) {
            Some(&id) => inner.finish_one(id),
            None => false,
        }
    }

    /// Complete every currently-active signalled operation
    ///
    /// Membership is captured before completing anything: completions may
    /// promote queued work, and those newly admitted operations must not be
    /// completed by the same call.
    pub fn complete_all(&self) {
        let mut inner = self.lock();
        let members = inner.gate.active_ids();
        for id in members {
            inner.finish_one(id);
        }
    }

    // === Clear / reset ===

    /// Cancel everything in flight and reset the value to the baseline
    /// chosen at construction (or by the last `clear_to`)
    pub fn clear(&self) {
        let mut inner = self.lock();
        let baseline = inner.baseline.clone();
        inner.reset(baseline);
        info!("coordinator cleared");
    }

    /// Cancel everything in flight and reset to a caller-chosen baseline,
    /// which becomes the new `clear` target
    pub fn clear_to(&self, baseline: V) {
        let mut inner = self.lock();
        inner.baseline = baseline.clone();
        inner.reset(baseline);
        info!("coordinator cleared");
    }

    // === Observation ===

    /// Non-blocking copy of {value, active set, queue}
    pub fn snapshot(&self) -> Snapshot<V> {
        let inner = self.lock();
        Snapshot::capture(inner.value.clone(), &inner.gate)
    }

    /// Register the observer, replacing any previous one
    ///
    /// Spawns a forwarding task that drains the notice channel and calls
    /// the observer; the task for a replaced observer ends once its sender
    /// is dropped. Returns the forwarding task's handle.
    pub fn attach_observer<O>(&self, mut observer: O) -> tokio::task::JoinHandle<()>
    where
        O: Observer<V> + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.lock().notices = Some(tx);

        tokio::spawn(async move {
            while let Some(notice) = rx.recv().await {
                match notice {
                    Notice::Snapshot(snapshot) => observer.on_snapshot(snapshot).await,
                    Notice::Log(line) => observer.on_log(line).await,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
