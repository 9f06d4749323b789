//! Pipeline value and forecast
//!
//! Both views weight the open-deal value of each stage by that stage's win
//! probability: `weighted = round(raw * probability / 100)`.

use funnel_core::{Deal, DealStatus, EntityId, Pipeline, Stage};
use funnel_store::Store;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stage's share of the pipeline, raw and probability-weighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageValue {
    pub stage_id: EntityId,
    pub stage_name: String,
    pub probability: i32,
    pub open_deal_count: usize,
    pub raw_value: i64,
    pub weighted_value: i64,
}

fn weight(raw: i64, probability: i32) -> i64 {
    (raw as f64 * probability as f64 / 100.0).round() as i64
}

fn open_totals(deals: &[Deal]) -> HashMap<EntityId, (usize, i64)> {
    let mut totals: HashMap<EntityId, (usize, i64)> = HashMap::new();
    for deal in deals.iter().filter(|d| d.status == DealStatus::Open) {
        let entry = totals.entry(deal.stage_id).or_default();
        entry.0 += 1;
        entry.1 += deal.value;
    }
    totals
}

fn stage_value(stage: &Stage, totals: &HashMap<EntityId, (usize, i64)>) -> StageValue {
    let (count, raw) = totals.get(&stage.id).copied().unwrap_or((0, 0));
    StageValue {
        stage_id: stage.id,
        stage_name: stage.name.clone(),
        probability: stage.probability,
        open_deal_count: count,
        raw_value: raw,
        weighted_value: weight(raw, stage.probability),
    }
}

/// Weighted value per stage of one pipeline (the default pipeline when
/// `pipeline_id` is `None`), in display order. Empty when no pipeline
/// resolves.
pub fn pipeline_value_by_stage(store: &Store, pipeline_id: Option<EntityId>) -> Vec<StageValue> {
    let pipelines = store.get_all::<Pipeline>();
    let Some(target) = pipeline_id.or_else(|| {
        pipelines.iter().find(|p| p.is_default).map(|p| p.id)
    }) else {
        return Vec::new();
    };

    let mut stages: Vec<Stage> = store
        .get_all::<Stage>()
        .into_iter()
        .filter(|s| s.pipeline_id == target)
        .collect();
    stages.sort_by_key(|s| s.order);

    let totals = open_totals(&store.get_all::<Deal>());
    stages.iter().map(|s| stage_value(s, &totals)).collect()
}

/// Weighted value across every stage in the system, filtered to stages that
/// carry any open-deal value.
pub fn forecast_by_stage(store: &Store) -> Vec<StageValue> {
    let mut stages = store.get_all::<Stage>();
    stages.sort_by_key(|s| s.order);

    let totals = open_totals(&store.get_all::<Deal>());
    stages
        .iter()
        .map(|s| stage_value(s, &totals))
        .filter(|v| v.raw_value != 0)
        .collect()
}
