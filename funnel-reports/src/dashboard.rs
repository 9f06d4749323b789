//! Dashboard composition
//!
//! The landing view: deal totals, the default pipeline's weighted value, the
//! weekly activity summary, and the freshest deal changes annotated with
//! their stage names.

use crate::{
    activity::{weekly_activity_summary, ActivitySummary},
    pipeline::{pipeline_value_by_stage, StageValue},
};
use chrono::{DateTime, Local};
use funnel_core::{Deal, DealStatus, Stage};
use funnel_store::Store;
use serde::{Deserialize, Serialize};

/// Default number of rows in the recent-changes feed.
pub const RECENT_CHANGES_LIMIT: usize = 20;

/// A recently updated deal with its current stage resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentDealChange {
    pub deal: Deal,
    pub stage_name: Option<String>,
}

/// Everything the dashboard shows in one pass over the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub open_deal_count: usize,
    pub open_deal_value: i64,
    pub won_deal_count: usize,
    pub won_deal_value: i64,
    pub weighted_pipeline: Vec<StageValue>,
    pub activity: ActivitySummary,
    pub recent_changes: Vec<RecentDealChange>,
}

/// The `limit` most recently updated deals, newest first.
pub fn recent_deal_changes(store: &Store, limit: usize) -> Vec<RecentDealChange> {
    let stages = store.get_all::<Stage>();
    let mut deals = store.get_all::<Deal>();
    deals.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    deals
        .into_iter()
        .take(limit)
        .map(|deal| {
            let stage_name = stages
                .iter()
                .find(|s| s.id == deal.stage_id)
                .map(|s| s.name.clone());
            RecentDealChange { deal, stage_name }
        })
        .collect()
}

/// Fold the dataset into the dashboard view as of `now`.
pub fn dashboard_snapshot(store: &Store, now: DateTime<Local>) -> DashboardSnapshot {
    let deals = store.get_all::<Deal>();
    let open: Vec<&Deal> = deals.iter().filter(|d| d.status == DealStatus::Open).collect();
    let won: Vec<&Deal> = deals.iter().filter(|d| d.status == DealStatus::Won).collect();

    DashboardSnapshot {
        open_deal_count: open.len(),
        open_deal_value: open.iter().map(|d| d.value).sum(),
        won_deal_count: won.len(),
        won_deal_value: won.iter().map(|d| d.value).sum(),
        weighted_pipeline: pipeline_value_by_stage(store, None),
        activity: weekly_activity_summary(store, now),
        recent_changes: recent_deal_changes(store, RECENT_CHANGES_LIMIT),
    }
}

/// [`dashboard_snapshot`] against the wall clock.
pub fn dashboard_snapshot_now(store: &Store) -> DashboardSnapshot {
    dashboard_snapshot(store, Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use funnel_core::{new_entity_id, Pipeline};

    #[test]
    fn test_recent_changes_are_newest_first_and_capped() {
        let store = Store::in_memory();
        let pipeline = store.create(Pipeline::new("Sales"));
        let stage = store.create(Stage::new(pipeline.id, "Qualify", 1, 20));

        let now = Utc::now();
        let deals: Vec<Deal> = (0..25i64)
            .map(|i| {
                let mut deal = Deal::new(pipeline.id, stage.id, new_entity_id(), format!("deal {}", i));
                deal.updated_at = now - Duration::minutes(i);
                deal
            })
            .collect();
        store.save(&deals);

        let recent = recent_deal_changes(&store, RECENT_CHANGES_LIMIT);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].deal.title, "deal 0");
        assert!(recent
            .windows(2)
            .all(|w| w[0].deal.updated_at >= w[1].deal.updated_at));
        assert_eq!(recent[0].stage_name.as_deref(), Some("Qualify"));
    }

    #[test]
    fn test_missing_stage_resolves_to_none() {
        let store = Store::in_memory();
        store.create(Deal::new(new_entity_id(), new_entity_id(), new_entity_id(), "orphan"));
        let recent = recent_deal_changes(&store, 5);
        assert_eq!(recent[0].stage_name, None);
    }

    #[test]
    fn test_snapshot_totals_split_by_status() {
        let store = Store::in_memory();
        let mut pipeline = Pipeline::new("Sales");
        pipeline.is_default = true;
        let pipeline = store.create(pipeline);
        let stage = store.create(Stage::new(pipeline.id, "Qualify", 1, 50));

        let mut open = Deal::new(pipeline.id, stage.id, new_entity_id(), "open");
        open.value = 1_000;
        store.create(open);

        let mut won = Deal::new(pipeline.id, stage.id, new_entity_id(), "won");
        won.value = 2_000;
        won.status = DealStatus::Won;
        store.create(won);

        let snapshot = dashboard_snapshot(&store, Local::now());
        assert_eq!(snapshot.open_deal_count, 1);
        assert_eq!(snapshot.open_deal_value, 1_000);
        assert_eq!(snapshot.won_deal_count, 1);
        assert_eq!(snapshot.won_deal_value, 2_000);
        assert_eq!(snapshot.weighted_pipeline[0].weighted_value, 500);
    }
}
