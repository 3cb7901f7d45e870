// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::OpId;

#[test]
fn config_parses_humantime_durations() {
    let config: TriggerConfig =
        serde_json::from_str(r#"{"interval": "250ms", "jitter": "1s 500ms"}"#).unwrap();
    assert_eq!(config.interval, Duration::from_millis(250));
    assert_eq!(config.jitter, Duration::from_millis(1500));
}

#[test]
fn jitter_defaults_to_zero() {
    let config: TriggerConfig = serde_json::from_str(r#"{"interval": "2s"}"#).unwrap();
    assert_eq!(config.jitter, Duration::ZERO);
    assert_eq!(config.pause(), Duration::from_secs(2));
}

#[test]
fn pause_stays_within_interval_plus_jitter() {
    let config = TriggerConfig::new(Duration::from_millis(100)).with_jitter(Duration::from_millis(50));
    for _ in 0..50 {
        let pause = config.pause();
        assert!(pause >= Duration::from_millis(100));
        assert!(pause <= Duration::from_millis(150));
    }
}

#[tokio::test(start_paused = true)]
async fn random_completer_drains_active_operations() {
    let coordinator = Coordinator::new(0i64);

    let c = coordinator.clone();
    let r1 = tokio::spawn(async move { c.read(OpId(1)).await });
    let c = coordinator.clone();
    let r2 = tokio::spawn(async move { c.read(OpId(2)).await });

    let trigger = spawn_random_completer(
        coordinator.clone(),
        TriggerConfig::new(Duration::from_millis(10)),
    );

    // Paused time auto-advances through the trigger's sleeps until both
    // reads have been completed.
    assert_eq!(r1.await.unwrap(), Ok(0));
    assert_eq!(r2.await.unwrap(), Ok(0));
    assert!(coordinator.snapshot().is_idle());

    trigger.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_trigger_task() {
    let coordinator = Coordinator::new(0i64);
    let trigger = spawn_random_completer(
        coordinator,
        TriggerConfig::new(Duration::from_secs(3600)),
    );
    // Must return promptly even though the trigger is mid-sleep.
    trigger.shutdown().await;
}
