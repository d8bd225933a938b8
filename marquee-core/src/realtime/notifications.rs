//! Notification admission, debounce, duplicate suppression and expiry.
//!
//! [`NotificationCenter`] is a plain state machine: every method takes the
//! current instant and returns the visible changes it caused. The async
//! [`NotificationFeed`](super::NotificationFeed) drives it with real (or
//! paused) tokio time.

use std::collections::HashMap;
use std::time::Duration;

use marquee_model::{RelayEventKind, RelayPayload};
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::i18n::Strings;

pub const DISPLAY_WINDOW: Duration = Duration::from_secs(5);
pub const DEDUPE_WINDOW: Duration = Duration::from_secs(1);
pub const MONITOR_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    /// How long a notification stays visible.
    pub display: Duration,
    /// Identical events closer than this collapse into one.
    pub dedupe: Duration,
    /// Quiet period before a `monitorUpdate` is turned into a notification.
    pub debounce: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            display: DISPLAY_WINDOW,
            dedupe: DEDUPE_WINDOW,
            debounce: MONITOR_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: RelayEventKind,
    pub payload: RelayPayload,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

impl Notification {
    pub fn message(&self, strings: &Strings) -> String {
        match self.kind {
            RelayEventKind::SyncComplete => {
                strings.sync_complete_message(self.payload.processed())
            }
            _ => strings.monitor_update_message(self.payload.count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Expired,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationChange {
    Shown(Notification),
    Dismissed { id: Uuid, reason: DismissReason },
}

/// Composite identity used for duplicate suppression. The timestamp is
/// left out so a re-sent event still counts as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupeKey {
    kind: RelayEventKind,
    count: u64,
    processed: Option<u64>,
    requests: Option<u64>,
    errors: Option<u64>,
}

impl DedupeKey {
    fn new(kind: &RelayEventKind, payload: &RelayPayload) -> Self {
        Self {
            kind: kind.clone(),
            count: payload.count,
            processed: payload.processed_count,
            requests: payload.request_count,
            errors: payload.error_count,
        }
    }
}

#[derive(Debug)]
pub struct NotificationCenter {
    timing: NotificationTiming,
    /// Single debounce slot for `monitorUpdate`; a new event replaces it.
    pending: Option<(RelayPayload, Instant)>,
    recent: HashMap<DedupeKey, Instant>,
    visible: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            timing,
            pending: None,
            recent: HashMap::new(),
            visible: Vec::new(),
        }
    }

    pub fn timing(&self) -> NotificationTiming {
        self.timing
    }

    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn on_event(
        &mut self,
        kind: &RelayEventKind,
        payload: RelayPayload,
        now: Instant,
    ) -> Vec<NotificationChange> {
        match kind {
            RelayEventKind::MonitorUpdate => {
                self.pending = Some((payload, now + self.timing.debounce));
                Vec::new()
            }
            RelayEventKind::SyncComplete => {
                if payload.processed() == 0 {
                    debug!("Dropping syncComplete with nothing processed");
                    return Vec::new();
                }
                self.admit(kind, payload, now).into_iter().collect()
            }
            RelayEventKind::Other(name) => {
                debug!("No notification for relay event {}", name);
                Vec::new()
            }
        }
    }

    /// Fire the debounce slot and expire notifications due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<NotificationChange> {
        let mut changes = Vec::new();

        if self.pending.as_ref().is_some_and(|(_, due)| *due <= now)
            && let Some((payload, _)) = self.pending.take()
        {
            if payload.count > 0 {
                changes.extend(self.admit(
                    &RelayEventKind::MonitorUpdate,
                    payload,
                    now,
                ));
            } else {
                debug!("Dropping monitorUpdate with zero count");
            }
        }

        let (expired, kept): (Vec<_>, Vec<_>) = self
            .visible
            .drain(..)
            .partition(|notification| notification.expires_at <= now);
        self.visible = kept;
        changes.extend(expired.into_iter().map(|notification| {
            NotificationChange::Dismissed {
                id: notification.id,
                reason: DismissReason::Expired,
            }
        }));

        let dedupe = self.timing.dedupe;
        self.recent
            .retain(|_, seen| now.saturating_duration_since(*seen) <= dedupe);

        changes
    }

    pub fn dismiss(&mut self, id: Uuid) -> Option<NotificationChange> {
        let index = self.visible.iter().position(|n| n.id == id)?;
        self.visible.remove(index);
        Some(NotificationChange::Dismissed {
            id,
            reason: DismissReason::User,
        })
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let pending = self.pending.as_ref().map(|(_, due)| *due);
        let expiry = self.visible.iter().map(|n| n.expires_at).min();
        match (pending, expiry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn admit(
        &mut self,
        kind: &RelayEventKind,
        payload: RelayPayload,
        now: Instant,
    ) -> Option<NotificationChange> {
        let key = DedupeKey::new(kind, &payload);
        if let Some(seen) = self.recent.get(&key)
            && now.saturating_duration_since(*seen) <= self.timing.dedupe
        {
            debug!("Suppressing duplicate {} notification", kind);
            return None;
        }
        self.recent.insert(key, now);

        let notification = Notification {
            id: Uuid::new_v4(),
            kind: kind.clone(),
            payload,
            shown_at: now,
            expires_at: now + self.timing.display,
        };
        self.visible.push(notification.clone());
        Some(NotificationChange::Shown(notification))
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NotificationTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(count: u64) -> RelayPayload {
        RelayPayload {
            kind: "monitor".into(),
            count,
            ..Default::default()
        }
    }

    fn shown(changes: &[NotificationChange]) -> usize {
        changes
            .iter()
            .filter(|c| matches!(c, NotificationChange::Shown(_)))
            .count()
    }

    #[test]
    fn monitor_updates_wait_for_the_debounce() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();

        assert!(center.on_event(&RelayEventKind::MonitorUpdate, monitor(2), t0).is_empty());
        assert_eq!(center.next_deadline(), Some(t0 + MONITOR_DEBOUNCE));
        assert!(center.poll(t0 + Duration::from_millis(50)).is_empty());
        assert_eq!(shown(&center.poll(t0 + MONITOR_DEBOUNCE)), 1);
    }

    #[test]
    fn debounce_keeps_only_the_latest_event() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();

        center.on_event(&RelayEventKind::MonitorUpdate, monitor(1), t0);
        center.on_event(
            &RelayEventKind::MonitorUpdate,
            monitor(4),
            t0 + Duration::from_millis(60),
        );
        assert!(center.poll(t0 + MONITOR_DEBOUNCE).is_empty());

        let changes = center.poll(t0 + Duration::from_millis(160));
        let [NotificationChange::Shown(n)] = changes.as_slice() else {
            panic!("expected one notification, got {changes:?}");
        };
        assert_eq!(n.payload.count, 4);
    }

    #[test]
    fn zero_counts_are_never_shown() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();

        center.on_event(&RelayEventKind::MonitorUpdate, monitor(0), t0);
        assert!(center.poll(t0 + MONITOR_DEBOUNCE).is_empty());

        let sync = RelayPayload {
            count: 7,
            processed_count: Some(0),
            ..Default::default()
        };
        assert!(center.on_event(&RelayEventKind::SyncComplete, sync, t0).is_empty());
        assert!(center.visible().is_empty());
    }

    #[test]
    fn sync_complete_is_immediate() {
        let mut center = NotificationCenter::default();
        let sync = RelayPayload {
            processed_count: Some(12),
            ..Default::default()
        };
        let changes = center.on_event(&RelayEventKind::SyncComplete, sync, Instant::now());
        assert_eq!(shown(&changes), 1);
    }

    #[test]
    fn duplicates_within_a_second_collapse() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();

        let send = |center: &mut NotificationCenter, at: Instant| {
            center.on_event(&RelayEventKind::MonitorUpdate, monitor(3), at);
            shown(&center.poll(at + MONITOR_DEBOUNCE))
        };

        assert_eq!(send(&mut center, t0), 1);
        assert_eq!(send(&mut center, t0 + Duration::from_millis(1000)), 0);
        assert_eq!(send(&mut center, t0 + Duration::from_millis(2100)), 1);
    }

    #[test]
    fn distinct_payloads_are_both_shown() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();
        let a = RelayPayload {
            processed_count: Some(3),
            error_count: Some(0),
            ..Default::default()
        };
        let b = RelayPayload {
            error_count: Some(1),
            ..a.clone()
        };

        let mut changes = center.on_event(&RelayEventKind::SyncComplete, a, t0);
        changes.extend(center.on_event(&RelayEventKind::SyncComplete, b, t0));
        assert_eq!(shown(&changes), 2);
    }

    #[test]
    fn notifications_expire_or_are_dismissed() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();
        let payload = |n| RelayPayload {
            processed_count: Some(n),
            ..Default::default()
        };

        center.on_event(&RelayEventKind::SyncComplete, payload(1), t0);
        let changes = center.on_event(&RelayEventKind::SyncComplete, payload(2), t0);
        let [NotificationChange::Shown(second)] = changes.as_slice() else {
            panic!("expected a notification");
        };

        assert!(matches!(
            center.dismiss(second.id),
            Some(NotificationChange::Dismissed {
                reason: DismissReason::User,
                ..
            })
        ));
        assert_eq!(center.next_deadline(), Some(t0 + DISPLAY_WINDOW));

        let expired = center.poll(t0 + DISPLAY_WINDOW);
        assert!(matches!(
            expired.as_slice(),
            [NotificationChange::Dismissed {
                reason: DismissReason::Expired,
                ..
            }]
        ));
        assert!(center.visible().is_empty());
        assert_eq!(center.next_deadline(), None);
    }
}
