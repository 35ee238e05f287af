//! Revision-signal behaviour of the resource-activity selector.

use plan_model::{ActivityId, DisplayConfig, ReadyToRevise};
use plan_selector::{ResourceActivitySelector, SelectableItem};
use plan_test_utils::{activities, activity_tracker, resource_tracker, StaticActivityFeed};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

async fn settle() {
    tokio::time::sleep(Duration::from_millis(30)).await;
}

#[tokio::test]
async fn construction_seeds_from_tracker_and_feed() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[
        (1, "Dig"),
        (2, "Pour"),
    ])));
    let (_tx, rx) = watch::channel(ReadyToRevise::No);

    let selector = ResourceActivitySelector::new(
        feed,
        &resource_tracker(vec![activity_tracker(1, "Dig", 40)]),
        rx,
        &DisplayConfig::new(),
    );

    let targets = selector.target_items();
    assert_eq!(targets.len(), 2);
    assert_eq!(selector.selected_activity_ids(), vec![ActivityId(1)]);
    assert_eq!(targets[0].percentage_worked(), 40);
    assert_eq!(targets[1].percentage_worked(), 0);
}

#[tokio::test]
async fn ready_signal_triggers_selection_preserving_revision() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[(1, "Dig")])));
    let (tx, rx) = watch::channel(ReadyToRevise::No);

    let selector = ResourceActivitySelector::new(
        Arc::clone(&feed) as Arc<dyn plan_selector::ActivityFeed>,
        &resource_tracker(vec![activity_tracker(1, "Dig", 100)]),
        rx,
        &DisplayConfig::new(),
    );
    assert_eq!(selector.selected_activity_ids(), vec![ActivityId(1)]);

    // Upstream renames the activity and grows.
    feed.set(activities(&[(1, "Dig trench"), (2, "Pour")]));
    tx.send(ReadyToRevise::Yes).unwrap();
    settle().await;

    let targets = selector.target_items();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].name(), "Dig trench");
    assert!(!targets[1].is_selected());
    // Selection survives the revision.
    assert_eq!(selector.selected_activity_ids(), vec![ActivityId(1)]);
}

#[tokio::test]
async fn unchanged_upstream_revision_is_observably_idle() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[(1, "A")])));
    let (tx, rx) = watch::channel(ReadyToRevise::No);

    let selector = ResourceActivitySelector::new(
        Arc::clone(&feed) as Arc<dyn plan_selector::ActivityFeed>,
        &resource_tracker(vec![activity_tracker(1, "A", 0)]),
        rx,
        &DisplayConfig::new(),
    );
    let before = selector.target_items();

    tx.send(ReadyToRevise::Yes).unwrap();
    settle().await;

    let after = selector.target_items();
    assert_eq!(after.len(), 1);
    assert!(Arc::ptr_eq(&before[0], &after[0]));
    assert!(!after[0].is_released());
    assert_eq!(selector.selected_activity_ids(), vec![ActivityId(1)]);
}

#[tokio::test]
async fn not_ready_signal_is_ignored() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[(1, "A")])));
    let (tx, rx) = watch::channel(ReadyToRevise::Yes);

    let selector = ResourceActivitySelector::new(
        Arc::clone(&feed) as Arc<dyn plan_selector::ActivityFeed>,
        &resource_tracker(vec![]),
        rx,
        &DisplayConfig::new(),
    );

    feed.set(activities(&[(1, "A"), (2, "B")]));
    tx.send(ReadyToRevise::No).unwrap();
    settle().await;

    // The upstream growth is not reflected without a ready transition.
    assert_eq!(selector.target_items().len(), 1);
}

#[tokio::test]
async fn removed_upstream_activity_is_released() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[(1, "A"), (2, "B")])));
    let (tx, rx) = watch::channel(ReadyToRevise::No);

    let selector = ResourceActivitySelector::new(
        Arc::clone(&feed) as Arc<dyn plan_selector::ActivityFeed>,
        &resource_tracker(vec![activity_tracker(2, "B", 10)]),
        rx,
        &DisplayConfig::new(),
    );
    let removed = selector.target_items()[0].clone();
    assert_eq!(removed.activity_id(), ActivityId(1));

    feed.set(activities(&[(2, "B")]));
    tx.send(ReadyToRevise::Yes).unwrap();
    settle().await;

    assert!(removed.is_released());
    assert_eq!(selector.target_items().len(), 1);
    assert_eq!(selector.selected_activity_ids(), vec![ActivityId(2)]);
}

#[tokio::test]
async fn disposal_detaches_from_signal() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[(1, "A")])));
    let (tx, rx) = watch::channel(ReadyToRevise::No);

    let selector = ResourceActivitySelector::new(
        Arc::clone(&feed) as Arc<dyn plan_selector::ActivityFeed>,
        &resource_tracker(vec![]),
        rx,
        &DisplayConfig::new(),
    );

    selector.dispose();
    settle().await;

    feed.set(activities(&[(1, "A"), (2, "B")]));
    // The aborted watcher may already have dropped its receiver.
    let _ = tx.send(ReadyToRevise::Yes);
    settle().await;

    assert!(selector.is_disposed());
    assert!(selector.target_items().is_empty());
}

#[tokio::test]
async fn dropping_the_selector_does_not_wedge_the_signal() {
    let feed = Arc::new(StaticActivityFeed::new(activities(&[(1, "A")])));
    let (tx, rx) = watch::channel(ReadyToRevise::No);

    let selector = ResourceActivitySelector::new(
        Arc::clone(&feed) as Arc<dyn plan_selector::ActivityFeed>,
        &resource_tracker(vec![]),
        rx,
        &DisplayConfig::new(),
    );
    drop(selector);
    settle().await;

    // The watcher held only a weak reference; nothing left to revive.
    let _ = tx.send(ReadyToRevise::Yes);
    settle().await;
}
