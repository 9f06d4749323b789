//! Pipeline service
//!
//! Owns the single-default invariant: at most one pipeline carries
//! `is_default` at any time, and the settings singleton tracks its id.
//! Deletion is the heaviest cascade in the system (stages, deal
//! reassignment, default promotion).

use crate::settings;
use chrono::Utc;
use funnel_core::{CrmError, CrmResult, Deal, EntityId, EntityKind, Pipeline, Stage};
use funnel_store::Store;

/// Partial update for [`Pipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelinePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_default: Option<bool>,
}

pub fn list(store: &Store) -> Vec<Pipeline> {
    store.get_all()
}

pub fn get(store: &Store, id: EntityId) -> Option<Pipeline> {
    store.get_by_id(id)
}

/// The pipeline currently flagged as the system-wide default.
pub fn get_default(store: &Store) -> Option<Pipeline> {
    store.get_all::<Pipeline>().into_iter().find(|p| p.is_default)
}

/// Create a pipeline. If it claims the default flag, every other pipeline
/// loses it and settings are pointed at the new one.
pub fn create(store: &Store, pipeline: Pipeline) -> Pipeline {
    let wants_default = pipeline.is_default;
    let created = store.create(pipeline);
    if wants_default {
        claim_default(store, created.id);
    }
    created
}

pub fn update(store: &Store, id: EntityId, patch: PipelinePatch) -> Option<Pipeline> {
    let updated = store.update::<Pipeline>(id, |p| {
        if let Some(name) = patch.name {
            p.name = name;
        }
        if let Some(description) = patch.description {
            p.description = description;
        }
        if let Some(is_default) = patch.is_default {
            p.is_default = is_default;
        }
    })?;
    if updated.is_default {
        claim_default(store, updated.id);
    }
    Some(updated)
}

/// Make `id` the single default pipeline.
pub fn set_default(store: &Store, id: EntityId) -> CrmResult<Pipeline> {
    if get(store, id).is_none() {
        return Err(CrmError::not_found(EntityKind::Pipeline, id));
    }
    claim_default(store, id);
    get(store, id).ok_or(CrmError::not_found(EntityKind::Pipeline, id))
}

/// Delete a pipeline and everything that hangs off it:
/// - its stages are deleted;
/// - deals in those stages move to the default pipeline's lowest-order
///   stage if a different default pipeline exists, otherwise they are
///   deleted outright;
/// - if no default pipeline remains afterward, an arbitrary survivor is
///   promoted (settings follow either way).
///
/// No-op when the pipeline does not exist.
pub fn delete(store: &Store, id: EntityId) {
    if get(store, id).is_none() {
        return;
    }

    let all_stages = store.get_all::<Stage>();
    let (doomed_stages, kept_stages): (Vec<Stage>, Vec<Stage>) =
        all_stages.into_iter().partition(|s| s.pipeline_id == id);

    // Lowest-order stage of another default pipeline, if any. The deleted
    // pipeline may itself be the default, in which case there is no target.
    let fallback_stage = store
        .get_all::<Pipeline>()
        .into_iter()
        .find(|p| p.id != id && p.is_default)
        .and_then(|fallback| {
            kept_stages
                .iter()
                .filter(|s| s.pipeline_id == fallback.id)
                .min_by_key(|s| s.order)
                .cloned()
        });

    let doomed_stage_ids: Vec<EntityId> = doomed_stages.iter().map(|s| s.id).collect();
    let deals = store.get_all::<Deal>();
    let rewritten: Vec<Deal> = match &fallback_stage {
        Some(target) => deals
            .into_iter()
            .map(|mut d| {
                if doomed_stage_ids.contains(&d.stage_id) {
                    d.pipeline_id = target.pipeline_id;
                    d.stage_id = target.id;
                }
                d
            })
            .collect(),
        None => deals
            .into_iter()
            .filter(|d| !doomed_stage_ids.contains(&d.stage_id))
            .collect(),
    };
    store.save(&rewritten);
    store.save(&kept_stages);
    store.remove::<Pipeline>(id);

    // Keep the single-default invariant alive for the survivors.
    let mut pipelines = store.get_all::<Pipeline>();
    if !pipelines.iter().any(|p| p.is_default) {
        if let Some(first) = pipelines.first_mut() {
            first.is_default = true;
            first.updated_at = Utc::now();
            let promoted = first.id;
            store.save(&pipelines);
            settings::set_default_pipeline(store, Some(promoted));
        } else {
            settings::set_default_pipeline(store, None);
        }
    } else if settings::get(store).default_pipeline_id == Some(id) {
        let current = pipelines.iter().find(|p| p.is_default).map(|p| p.id);
        settings::set_default_pipeline(store, current);
    }
}

/// Clear the default flag everywhere except `id`, set it on `id`, and point
/// settings at it.
fn claim_default(store: &Store, id: EntityId) {
    let mut pipelines = store.get_all::<Pipeline>();
    for p in pipelines.iter_mut() {
        p.is_default = p.id == id;
    }
    store.save(&pipelines);
    settings::set_default_pipeline(store, Some(id));
}
