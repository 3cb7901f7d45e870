// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::gate::GateInput;
use crate::operation::OpId;

fn gate_with(ops: &[Operation]) -> Gate {
    let mut gate = Gate::new();
    for op in ops {
        let (next, _) = gate.transition(GateInput::Submit { op: *op });
        gate = next;
    }
    gate
}

#[test]
fn capture_copies_value_and_sets() {
    let gate = gate_with(&[Operation::write(OpId(1)), Operation::read(OpId(2))]);
    let snap = Snapshot::capture(7, &gate);

    assert_eq!(snap.value, 7);
    assert_eq!(snap.active, vec![Operation::write(OpId(1))]);
    assert_eq!(snap.queue, vec![Operation::read(OpId(2))]);
    assert!(!snap.is_idle());
}

#[test]
fn active_set_sorts_by_id_for_display() {
    // Reads admitted in arrival order 5, 2, 9; display order is by id.
    let gate = gate_with(&[
        Operation::read(OpId(5)),
        Operation::read(OpId(2)),
        Operation::read(OpId(9)),
    ]);
    let snap = Snapshot::capture((), &gate);

    let ids: Vec<u64> = snap.active.iter().map(|op| op.id.0).collect();
    assert_eq!(ids, vec![2, 5, 9]);
}

#[test]
fn queue_keeps_arrival_order() {
    let gate = gate_with(&[
        Operation::write(OpId(1)),
        Operation::read(OpId(9)),
        Operation::read(OpId(3)),
    ]);
    let snap = Snapshot::capture((), &gate);

    let ids: Vec<u64> = snap.queue.iter().map(|op| op.id.0).collect();
    assert_eq!(ids, vec![9, 3]);
}

#[test]
fn equal_state_captures_equal_snapshots() {
    let gate = gate_with(&[Operation::read(OpId(1))]);
    assert_eq!(Snapshot::capture(42, &gate), Snapshot::capture(42, &gate));
}

#[test]
fn idle_snapshot() {
    let snap = Snapshot::capture(0, &Gate::new());
    assert!(snap.is_idle());
}
