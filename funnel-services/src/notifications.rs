//! Notification service
//!
//! Notifications are derived, not authored: `generate` scans incomplete
//! activities due within 24 hours and open deals expected to close within 7
//! days. Generation is idempotent per referenced entity, so re-running the
//! scan never duplicates.

use chrono::{Duration, Utc};
use funnel_core::{
    new_entity_id, Activity, Deal, DealStatus, EntityId, EntityKind, Notification,
    NotificationFilter, NotificationKind, Timestamp,
};
use funnel_store::Store;

/// How close an activity due date must be to raise a notification.
const ACTIVITY_DUE_WINDOW_HOURS: i64 = 24;
/// How close a deal's expected close date must be to raise a notification.
const DEAL_CLOSING_WINDOW_DAYS: i64 = 7;

pub fn list(store: &Store, filter: &NotificationFilter) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = store
        .get_all::<Notification>()
        .into_iter()
        .filter(|n| filter.matches(n))
        .collect();
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notifications
}

pub fn unread_count(store: &Store) -> usize {
    store
        .get_all::<Notification>()
        .iter()
        .filter(|n| !n.is_read)
        .count()
}

/// Scan the dataset as of `now` and create notifications for due-soon
/// conditions. Entities that already have a notification are skipped.
/// Returns only the notifications created by this run.
pub fn generate(store: &Store, now: Timestamp) -> Vec<Notification> {
    let existing: Vec<EntityId> = store
        .get_all::<Notification>()
        .into_iter()
        .map(|n| n.entity_id)
        .collect();
    let mut created = Vec::new();

    let activity_cutoff = now + Duration::hours(ACTIVITY_DUE_WINDOW_HOURS);
    for activity in store.get_all::<Activity>() {
        if activity.is_completed || existing.contains(&activity.id) {
            continue;
        }
        let Some(due) = activity.due_date else {
            continue;
        };
        if due <= activity_cutoff {
            created.push(store.create(Notification {
                id: new_entity_id(),
                kind: NotificationKind::ActivityDue,
                title: String::from("Activity due soon"),
                body: activity.title.clone(),
                entity_type: EntityKind::Activity,
                entity_id: activity.id,
                is_read: false,
                created_at: Utc::now(),
            }));
        }
    }

    let deal_cutoff = now + Duration::days(DEAL_CLOSING_WINDOW_DAYS);
    for deal in store.get_all::<Deal>() {
        if deal.status != DealStatus::Open || existing.contains(&deal.id) {
            continue;
        }
        let Some(close) = deal.expected_close_date else {
            continue;
        };
        if close <= deal_cutoff {
            created.push(store.create(Notification {
                id: new_entity_id(),
                kind: NotificationKind::DealClosing,
                title: String::from("Deal closing soon"),
                body: deal.title.clone(),
                entity_type: EntityKind::Deal,
                entity_id: deal.id,
                is_read: false,
                created_at: Utc::now(),
            }));
        }
    }

    created
}

pub fn mark_read(store: &Store, id: EntityId) -> Option<Notification> {
    store.update::<Notification>(id, |n| {
        n.is_read = true;
    })
}

pub fn mark_all_read(store: &Store) {
    let notifications: Vec<Notification> = store
        .get_all::<Notification>()
        .into_iter()
        .map(|mut n| {
            n.is_read = true;
            n
        })
        .collect();
    store.save(&notifications);
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Notification>(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::ActivityKind;

    #[test]
    fn test_generate_flags_due_soon_activity() {
        let store = Store::in_memory();
        let now = Utc::now();

        let mut due_soon = Activity::new(ActivityKind::Task, "Send quote");
        due_soon.due_date = Some(now + Duration::hours(3));
        store.create(due_soon);

        let mut far_out = Activity::new(ActivityKind::Task, "Next month");
        far_out.due_date = Some(now + Duration::days(30));
        store.create(far_out);

        let created = generate(&store, now);
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].kind, NotificationKind::ActivityDue);
        assert_eq!(created[0].body, "Send quote");
    }

    #[test]
    fn test_generate_is_idempotent_per_entity() {
        let store = Store::in_memory();
        let now = Utc::now();

        let mut activity = Activity::new(ActivityKind::Call, "Chase invoice");
        activity.due_date = Some(now + Duration::hours(1));
        store.create(activity);

        assert_eq!(generate(&store, now).len(), 1);
        assert_eq!(generate(&store, now).len(), 0);
        assert_eq!(store.get_all::<Notification>().len(), 1);
    }

    #[test]
    fn test_generate_skips_completed_and_closed() {
        let store = Store::in_memory();
        let now = Utc::now();

        let mut done = Activity::new(ActivityKind::Task, "Done already");
        done.due_date = Some(now + Duration::hours(1));
        done.is_completed = true;
        store.create(done);

        let mut won = Deal::new(
            funnel_core::new_entity_id(),
            funnel_core::new_entity_id(),
            funnel_core::new_entity_id(),
            "Closed won",
        );
        won.expected_close_date = Some(now + Duration::days(2));
        won.status = DealStatus::Won;
        store.create(won);

        assert!(generate(&store, now).is_empty());
    }

    #[test]
    fn test_mark_all_read_and_unread_count() {
        let store = Store::in_memory();
        let now = Utc::now();

        let mut deal = Deal::new(
            funnel_core::new_entity_id(),
            funnel_core::new_entity_id(),
            funnel_core::new_entity_id(),
            "Closing",
        );
        deal.expected_close_date = Some(now + Duration::days(1));
        store.create(deal);

        generate(&store, now);
        assert_eq!(unread_count(&store), 1);

        mark_all_read(&store);
        assert_eq!(unread_count(&store), 0);
    }
}
