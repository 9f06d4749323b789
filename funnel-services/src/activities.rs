//! Activity service

use funnel_core::{Activity, ActivityFilter, CrmError, CrmResult, EntityId, EntityKind, Timestamp};
use funnel_store::Store;

/// Partial update for [`Activity`].
#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub kind: Option<funnel_core::ActivityKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub is_completed: Option<bool>,
    pub assigned_to: Option<String>,
}

pub fn list(store: &Store, filter: &ActivityFilter) -> Vec<Activity> {
    store
        .get_all::<Activity>()
        .into_iter()
        .filter(|a| filter.matches(a))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Activity> {
    store.get_by_id(id)
}

pub fn create(store: &Store, activity: Activity) -> Activity {
    store.create(activity)
}

pub fn update(store: &Store, id: EntityId, patch: ActivityPatch) -> Option<Activity> {
    store.update::<Activity>(id, |a| {
        if let Some(kind) = patch.kind {
            a.kind = kind;
        }
        if let Some(title) = patch.title {
            a.title = title;
        }
        if let Some(description) = patch.description {
            a.description = description;
        }
        if let Some(due_date) = patch.due_date {
            a.due_date = Some(due_date);
        }
        if let Some(is_completed) = patch.is_completed {
            a.is_completed = is_completed;
        }
        if let Some(assigned_to) = patch.assigned_to {
            a.assigned_to = assigned_to;
        }
    })
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Activity>(id);
}

/// Flip the completion flag. Unlike a plain update, a missing activity here
/// is a loud error.
pub fn toggle_completed(store: &Store, id: EntityId) -> CrmResult<Activity> {
    if get(store, id).is_none() {
        return Err(CrmError::not_found(EntityKind::Activity, id));
    }
    store
        .update::<Activity>(id, |a| {
            a.is_completed = !a.is_completed;
        })
        .ok_or(CrmError::not_found(EntityKind::Activity, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::ActivityKind;

    #[test]
    fn test_toggle_flips_both_ways() {
        let store = Store::in_memory();
        let activity = create(&store, Activity::new(ActivityKind::Task, "Send quote"));

        assert!(toggle_completed(&store, activity.id).unwrap().is_completed);
        assert!(!toggle_completed(&store, activity.id).unwrap().is_completed);
    }

    #[test]
    fn test_toggle_missing_activity_is_loud() {
        let store = Store::in_memory();
        assert!(matches!(
            toggle_completed(&store, funnel_core::new_entity_id()).unwrap_err(),
            CrmError::NotFound { .. }
        ));
    }

    #[test]
    fn test_filter_by_completion_and_deal() {
        let store = Store::in_memory();
        let deal_id = funnel_core::new_entity_id();

        let mut on_deal = Activity::new(ActivityKind::Call, "On deal");
        on_deal.deal_id = Some(deal_id);
        create(&store, on_deal);
        create(&store, Activity::new(ActivityKind::Call, "Elsewhere"));

        let matches = list(
            &store,
            &ActivityFilter {
                deal_id: Some(deal_id),
                is_completed: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "On deal");
    }
}
