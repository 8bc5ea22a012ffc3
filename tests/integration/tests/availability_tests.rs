//! Dispatch-availability debounce behavior
//!
//! Paused-clock tests for the online-queue window: expiry fires the durable
//! offline transition exactly once, re-activity resets the window, and an
//! explicit off-shift cancels it.

use std::time::Duration;

use integration_tests::{settle, TestHarness};
use presence_common::{PresenceConfig, SweepConfig};
use presence_core::{Availability, Driver, Role, UserId};

fn short_window() -> TestHarness {
    let presence = PresenceConfig {
        online_ttl_seconds: 1,
        ..PresenceConfig::default()
    };
    TestHarness::new(presence, SweepConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_window_expiry_forces_driver_offline_once() {
    let harness = short_window();
    let driver = harness.seed_driver("Kim");

    harness.availability.mark_active(driver).await.unwrap();
    assert!(harness.repo.is_flagged_online(driver));

    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;

    assert!(!harness.repo.is_flagged_online(driver));

    let offline: Vec<_> = harness
        .notifier
        .changes_for(driver)
        .into_iter()
        .filter(|c| c.availability == Availability::Offline)
        .collect();
    assert_eq!(offline.len(), 1);

    // Nothing left to fire later
    tokio::time::advance(Duration::from_secs(5)).await;
    settle().await;
    let offline_after = harness
        .notifier
        .changes_for(driver)
        .into_iter()
        .filter(|c| c.availability == Availability::Offline)
        .count();
    assert_eq!(offline_after, 1);
}

#[tokio::test(start_paused = true)]
async fn test_activity_resets_the_window() {
    let harness = short_window();
    let driver = harness.seed_driver("Kim");

    harness.availability.mark_active(driver).await.unwrap();

    // Just before expiry, fresh activity arrives
    tokio::time::advance(Duration::from_millis(900)).await;
    harness.availability.mark_active(driver).await.unwrap();

    // Past the original deadline but inside the new window
    tokio::time::advance(Duration::from_millis(900)).await;
    settle().await;
    assert!(harness.repo.is_flagged_online(driver));

    // The reset window lapses
    tokio::time::advance(Duration::from_millis(200)).await;
    settle().await;
    assert!(!harness.repo.is_flagged_online(driver));
}

#[tokio::test(start_paused = true)]
async fn test_mark_inactive_cancels_pending_expiry() {
    let harness = short_window();
    let driver = harness.seed_driver("Kim");

    harness.availability.mark_active(driver).await.unwrap();
    harness.availability.mark_inactive(driver).await.unwrap();

    assert!(!harness.repo.is_flagged_online(driver));
    assert!(!harness.availability.queue().is_pending(driver));

    // The lapsed timer must not fire a second OFFLINE
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    let offline = harness
        .notifier
        .changes_for(driver)
        .into_iter()
        .filter(|c| c.availability == Availability::Offline)
        .count();
    assert_eq!(offline, 1);
}

#[tokio::test(start_paused = true)]
async fn test_drivers_expire_independently() {
    let harness = short_window();
    let early = harness.seed_driver("Kim");
    let late = harness.seed_driver("Lee");

    harness.availability.mark_active(early).await.unwrap();
    tokio::time::advance(Duration::from_millis(600)).await;
    harness.availability.mark_active(late).await.unwrap();

    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;
    assert!(!harness.repo.is_flagged_online(early));
    assert!(harness.repo.is_flagged_online(late));

    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;
    assert!(!harness.repo.is_flagged_online(late));
}

#[tokio::test]
async fn test_mark_active_persists_and_announces() {
    let harness = TestHarness::with_defaults();
    let driver = harness.seed_driver("Kim");

    harness.availability.mark_active(driver).await.unwrap();

    assert!(harness.repo.is_flagged_online(driver));
    assert!(harness.availability.queue().is_pending(driver));

    let changes = harness.notifier.changes_for(driver);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].availability, Availability::Online);
}

#[tokio::test]
async fn test_mark_active_for_unknown_driver_is_an_error() {
    let harness = TestHarness::with_defaults();
    let unknown = UserId::generate();

    assert!(harness.availability.mark_active(unknown).await.is_err());
}

#[tokio::test]
async fn test_rider_account_gets_no_dispatch_flag() {
    let harness = TestHarness::with_defaults();
    let mut rider = Driver::new(UserId::generate(), "Park".to_string(), "010-0000".to_string());
    rider.role = Role::Rider;
    let id = rider.id;
    harness.repo.insert(rider);

    harness.availability.mark_active(id).await.unwrap();

    assert!(!harness.repo.is_flagged_online(id));
    assert!(!harness.availability.queue().is_pending(id));
    assert!(harness.notifier.changes_for(id).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_rider_heartbeat_cycle_publishes_no_transition() {
    let harness = short_window();
    let mut rider = Driver::new(UserId::generate(), "Park".to_string(), "010-0000".to_string());
    rider.role = Role::Rider;
    let id = rider.id;
    harness.repo.insert(rider);

    // A rider's heartbeat still arms the window like any session
    harness.lifecycle.on_heartbeat(id).await;

    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;

    // The lapsed window makes no durable write and announces nothing
    assert!(!harness.repo.is_flagged_online(id));
    assert!(harness.notifier.changes_for(id).is_empty());
}
