// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! warden-sim: console simulation of the readers-writer coordinator
//!
//! Stands in for the excluded UI layer: spawns a swarm of reader, writer,
//! and updater tasks against one coordinator, attaches a console observer,
//! and lets a random timer complete the operations that wait for an
//! external signal. Run with RUST_LOG=debug for the coordinator's own
//! trace output.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::info;
use warden_core::{IdGen, SequentialIdGen, Snapshot};
use warden_engine::{spawn_random_completer, Coordinator, Observer, TriggerConfig};

const WORKERS: usize = 6;
const REQUESTS_PER_WORKER: usize = 4;

/// Prints every trace line and a one-line rendering of each snapshot
struct ConsoleObserver;

#[async_trait]
impl Observer<i64> for ConsoleObserver {
    async fn on_snapshot(&mut self, snapshot: Snapshot<i64>) {
        let active: Vec<String> = snapshot.active.iter().map(ToString::to_string).collect();
        let queue: Vec<String> = snapshot.queue.iter().map(ToString::to_string).collect();
        println!(
            "  state: value={} active=[{}] queue=[{}]",
            snapshot.value,
            active.join(", "),
            queue.join(", ")
        );
    }

    async fn on_log(&mut self, line: String) {
        println!("{line}");
    }
}

/// One simulated caller: a few randomly chosen requests in sequence
async fn worker(coordinator: Coordinator<i64>, ids: SequentialIdGen) {
    for _ in 0..REQUESTS_PER_WORKER {
        let id = ids.next();
        let (kind, timed) = {
            let mut rng = rand::rng();
            (rng.random_range(0..3u8), rng.random_bool(0.5))
        };
        let work = Duration::from_millis(100 + 50 * id.0 % 300);

        let outcome = match (kind, timed) {
            (0, true) => coordinator.read_for(id, work).await,
            (0, false) => coordinator.read(id).await,
            (1, true) => coordinator.write_for(id, id.0 as i64, work).await,
            (1, false) => coordinator.write(id, id.0 as i64).await,
            (_, true) => coordinator.update_for(id, |v| v + 1, work).await,
            (_, false) => coordinator.update(id, |v| v + 1).await,
        };

        match outcome {
            Ok(value) => info!("caller {id} finished, saw value {value}"),
            Err(err) => info!("caller {id} aborted: {err}"),
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    setup_logging();

    let coordinator = Coordinator::new(0i64);
    let forwarder = coordinator.attach_observer(ConsoleObserver);

    let trigger = spawn_random_completer(
        coordinator.clone(),
        TriggerConfig::new(Duration::from_millis(200)).with_jitter(Duration::from_millis(300)),
    );

    let ids = SequentialIdGen::new();
    let workers: Vec<_> = (0..WORKERS)
        .map(|_| tokio::spawn(worker(coordinator.clone(), ids.clone())))
        .collect();

    for handle in workers {
        let _ = handle.await;
    }

    trigger.shutdown().await;
    coordinator.complete_all();
    coordinator.clear();

    // Let the forwarding task drain the final notices before exiting
    tokio::time::sleep(Duration::from_millis(50)).await;
    forwarder.abort();
    info!("simulation finished");
}
