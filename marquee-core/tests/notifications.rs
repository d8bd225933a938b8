//! Notification feed timing under paused tokio time.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::realtime::{
    DismissReason, EventRegistry, NotificationChange, NotificationFeed,
    NotificationTiming,
};
use marquee_model::{RelayEventKind, RelayPayload};
use tokio::sync::broadcast;
use tokio::time::sleep;

fn monitor_update() -> RelayPayload {
    RelayPayload {
        kind: "monitor".into(),
        count: 3,
        processed_count: Some(1),
        request_count: Some(10),
        error_count: Some(0),
        ..Default::default()
    }
}

fn drain(rx: &mut broadcast::Receiver<NotificationChange>) -> Vec<NotificationChange> {
    let mut changes = Vec::new();
    while let Ok(change) = rx.try_recv() {
        changes.push(change);
    }
    changes
}

fn shown(changes: &[NotificationChange]) -> usize {
    changes
        .iter()
        .filter(|c| matches!(c, NotificationChange::Shown(_)))
        .count()
}

async fn identical_updates(gap: Duration) -> usize {
    let feed = NotificationFeed::spawn(NotificationTiming::default());
    let mut rx = feed.subscribe();

    feed.push(RelayEventKind::MonitorUpdate, monitor_update());
    sleep(gap).await;
    feed.push(RelayEventKind::MonitorUpdate, monitor_update());
    sleep(Duration::from_millis(500)).await;

    shown(&drain(&mut rx))
}

#[tokio::test(start_paused = true)]
async fn identical_updates_1000ms_apart_show_once() {
    assert_eq!(identical_updates(Duration::from_millis(1000)).await, 1);
}

#[tokio::test(start_paused = true)]
async fn identical_updates_1100ms_apart_show_twice() {
    assert_eq!(identical_updates(Duration::from_millis(1100)).await, 2);
}

#[tokio::test(start_paused = true)]
async fn notifications_auto_dismiss_after_five_seconds() {
    let feed = NotificationFeed::spawn(NotificationTiming::default());
    let mut rx = feed.subscribe();
    let sync = RelayPayload {
        processed_count: Some(8),
        ..Default::default()
    };

    feed.push(RelayEventKind::SyncComplete, sync);
    sleep(Duration::from_millis(4900)).await;
    let early = drain(&mut rx);
    assert_eq!(shown(&early), 1);
    assert_eq!(early.len(), 1);

    sleep(Duration::from_millis(200)).await;
    assert!(matches!(
        drain(&mut rx).as_slice(),
        [NotificationChange::Dismissed {
            reason: DismissReason::Expired,
            ..
        }]
    ));
}

#[tokio::test(start_paused = true)]
async fn explicit_dismissal_is_published() {
    let feed = NotificationFeed::spawn(NotificationTiming::default());
    let mut rx = feed.subscribe();

    feed.push(
        RelayEventKind::SyncComplete,
        RelayPayload {
            processed_count: Some(2),
            ..Default::default()
        },
    );
    let Ok(NotificationChange::Shown(notification)) = rx.recv().await else {
        panic!("expected a notification");
    };

    feed.dismiss(notification.id);
    assert_eq!(
        rx.recv().await.unwrap(),
        NotificationChange::Dismissed {
            id: notification.id,
            reason: DismissReason::User,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn registry_events_reach_the_feed() {
    let feed = NotificationFeed::spawn(NotificationTiming::default());
    let registry = Arc::new(EventRegistry::new());
    let handlers = feed.attach(&registry);
    let mut rx = feed.subscribe();

    registry.emit(&RelayEventKind::MonitorUpdate, &monitor_update());
    registry.emit(
        &RelayEventKind::MonitorUpdate,
        &RelayPayload {
            count: 0,
            ..Default::default()
        },
    );
    sleep(Duration::from_millis(150)).await;
    // The zero-count event replaced the pending one in the debounce slot.
    assert!(drain(&mut rx).is_empty());

    registry.emit(&RelayEventKind::MonitorUpdate, &monitor_update());
    sleep(Duration::from_millis(150)).await;
    assert_eq!(shown(&drain(&mut rx)), 1);

    for (kind, handler) in &handlers {
        assert!(registry.off(kind, handler));
    }
    assert_eq!(registry.handler_count(&RelayEventKind::MonitorUpdate), 0);
}
