//! Session lifecycle and presence properties
//!
//! Exercises the connect/heartbeat/disconnect paths over in-memory ports:
//! multi-device behavior, idempotent disconnects, and explicit TTL
//! validation.

use integration_tests::{settle, TestHarness};
use presence_common::{PresenceConfig, SweepConfig};
use presence_core::{Availability, UserId};

#[tokio::test]
async fn test_connect_marks_user_online() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    harness.lifecycle.on_connect(driver, "s1").await;

    assert!(harness.availability.is_online(driver).await);
    assert_eq!(connection_count(&harness, driver).await, 1);
}

#[tokio::test]
async fn test_two_devices_survive_first_disconnect() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    harness.lifecycle.on_connect(driver, "s1").await;
    assert!(harness.availability.is_online(driver).await);

    // Second device
    harness.lifecycle.on_connect(driver, "s2").await;
    assert!(harness.availability.is_online(driver).await);

    // First device drops; the second keeps the user online
    harness.lifecycle.on_disconnect(driver, "s1").await;
    assert!(harness.availability.is_online(driver).await);

    // Last device drops; presence falls immediately
    harness.lifecycle.on_disconnect(driver, "s2").await;
    assert!(!harness.availability.is_online(driver).await);
}

#[tokio::test]
async fn test_duplicate_connect_is_idempotent() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    harness.lifecycle.on_connect(driver, "s1").await;
    harness.lifecycle.on_connect(driver, "s1").await;

    assert_eq!(connection_count(&harness, driver).await, 1);

    harness.lifecycle.on_disconnect(driver, "s1").await;
    assert!(!harness.availability.is_online(driver).await);
}

#[tokio::test]
async fn test_disconnect_of_unknown_connection_is_noop() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    // Never connected; must not panic or go online
    harness.lifecycle.on_disconnect(driver, "ghost").await;
    assert!(!harness.availability.is_online(driver).await);

    // Known user, unknown connection id: sibling connections untouched
    harness.lifecycle.on_connect(driver, "s1").await;
    harness.lifecycle.on_disconnect(driver, "ghost").await;
    assert!(harness.availability.is_online(driver).await);
}

#[tokio::test]
async fn test_lapsed_ttl_reads_offline_without_eviction() {
    // Zero-second heartbeat window: the record exists but its recorded
    // expiry has already passed, so the explicit validation reports offline
    // even though nothing evicted the key.
    let presence = PresenceConfig {
        heartbeat_ttl_seconds: 0,
        ..PresenceConfig::default()
    };
    let harness = TestHarness::new(presence, SweepConfig::default());
    let driver = harness.seed_driver("Kim");

    harness.lifecycle.on_connect(driver, "s1").await;
    assert!(!harness.availability.is_online(driver).await);
}

#[tokio::test]
async fn test_heartbeat_refreshes_presence() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    harness.lifecycle.on_connect(driver, "s1").await;
    harness.lifecycle.on_heartbeat(driver).await;

    assert!(harness.availability.is_online(driver).await);
}

#[tokio::test]
async fn test_heartbeat_after_state_loss_restores_presence() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    // Heartbeat with no prior record: treated as mark_online, never an error
    harness.lifecycle.on_heartbeat(driver).await;
    assert!(harness.availability.is_online(driver).await);
}

#[tokio::test]
async fn test_first_connect_announces_online_transition() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    harness.lifecycle.on_connect(driver, "s1").await;
    harness.lifecycle.on_connect(driver, "s2").await;
    settle().await;

    let transitions = harness.notifier.changes_for(driver);
    let online: Vec<_> = transitions
        .iter()
        .filter(|c| c.availability == Availability::Online)
        .collect();
    // Only the first device produced a transition
    assert_eq!(online.len(), 1);
}

#[tokio::test]
async fn test_users_are_independent() {
    let harness = TestHarness::with_defaults();
    let a = harness.seed_driver("Kim");
    let b = harness.seed_driver("Lee");

    harness.lifecycle.on_connect(a, "a1").await;
    harness.lifecycle.on_connect(b, "b1").await;
    harness.lifecycle.on_disconnect(a, "a1").await;

    assert!(!harness.availability.is_online(a).await);
    assert!(harness.availability.is_online(b).await);
}

#[tokio::test]
async fn test_unknown_user_reads_offline() {
    let harness = TestHarness::with_defaults();
    assert!(!harness.availability.is_online(UserId::generate()).await);
}

async fn connection_count(harness: &TestHarness, user: UserId) -> u64 {
    use presence_core::ConnectionRegistry;
    harness.registry.count_connections(user).await.unwrap()
}
