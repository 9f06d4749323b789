//! Stage service
//!
//! Stages are ordered within their pipeline; `order` drives display and the
//! delete-reassignment rule. Deleting a stage that still has deals moves them
//! to the next-higher-order sibling, and is refused when no such sibling
//! exists.

use funnel_core::{CrmError, CrmResult, Deal, EntityId, Stage};
use funnel_store::Store;

/// Partial update for [`Stage`].
#[derive(Debug, Clone, Default)]
pub struct StagePatch {
    pub name: Option<String>,
    pub order: Option<i32>,
    pub color: Option<String>,
    pub probability: Option<i32>,
}

/// Stages of one pipeline, in display order.
pub fn list_for_pipeline(store: &Store, pipeline_id: EntityId) -> Vec<Stage> {
    let mut stages: Vec<Stage> = store
        .get_all::<Stage>()
        .into_iter()
        .filter(|s| s.pipeline_id == pipeline_id)
        .collect();
    stages.sort_by_key(|s| s.order);
    stages
}

pub fn get(store: &Store, id: EntityId) -> Option<Stage> {
    store.get_by_id(id)
}

pub fn create(store: &Store, stage: Stage) -> CrmResult<Stage> {
    validate_probability(stage.probability)?;
    Ok(store.create(stage))
}

pub fn update(store: &Store, id: EntityId, patch: StagePatch) -> CrmResult<Option<Stage>> {
    if let Some(probability) = patch.probability {
        validate_probability(probability)?;
    }
    Ok(store.update::<Stage>(id, |s| {
        if let Some(name) = patch.name {
            s.name = name;
        }
        if let Some(order) = patch.order {
            s.order = order;
        }
        if let Some(color) = patch.color {
            s.color = color;
        }
        if let Some(probability) = patch.probability {
            s.probability = probability;
        }
    }))
}

/// Delete a stage. Deals still referencing it are reassigned to the sibling
/// with the smallest order above this one; with deals attached and no such
/// sibling, the delete is refused and nothing changes.
pub fn delete(store: &Store, id: EntityId) -> CrmResult<()> {
    let Some(stage) = get(store, id) else {
        return Ok(());
    };

    let deals = store.get_all::<Deal>();
    let attached: usize = deals.iter().filter(|d| d.stage_id == id).count();

    if attached > 0 {
        let successor = store
            .get_all::<Stage>()
            .into_iter()
            .filter(|s| s.pipeline_id == stage.pipeline_id && s.order > stage.order)
            .min_by_key(|s| s.order);
        let Some(successor) = successor else {
            return Err(CrmError::StageHasDeals {
                stage_id: id,
                deal_count: attached,
            });
        };
        let rewritten: Vec<Deal> = deals
            .into_iter()
            .map(|mut d| {
                if d.stage_id == id {
                    d.stage_id = successor.id;
                }
                d
            })
            .collect();
        store.save(&rewritten);
    }

    store.remove::<Stage>(id);
    Ok(())
}

fn validate_probability(probability: i32) -> CrmResult<()> {
    if !(0..=100).contains(&probability) {
        return Err(CrmError::validation(
            "probability",
            format!("{} is outside 0-100", probability),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::{new_entity_id, Pipeline};

    fn pipeline_with_stages(store: &Store) -> (Pipeline, Stage, Stage) {
        let pipeline = store.create(Pipeline::new("Sales"));
        let first = store.create(Stage::new(pipeline.id, "Qualify", 1, 20));
        let second = store.create(Stage::new(pipeline.id, "Close", 2, 80));
        (pipeline, first, second)
    }

    #[test]
    fn test_list_is_sorted_by_order() {
        let store = Store::in_memory();
        let pipeline = store.create(Pipeline::new("Sales"));
        store.create(Stage::new(pipeline.id, "Late", 5, 90));
        store.create(Stage::new(pipeline.id, "Early", 1, 10));

        let names: Vec<String> = list_for_pipeline(&store, pipeline.id)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }

    #[test]
    fn test_create_rejects_out_of_range_probability() {
        let store = Store::in_memory();
        let pipeline = store.create(Pipeline::new("Sales"));
        let err = create(&store, Stage::new(pipeline.id, "Bogus", 1, 150)).unwrap_err();
        assert!(matches!(err, CrmError::Validation { .. }));
    }

    #[test]
    fn test_delete_without_deals_always_succeeds() {
        let store = Store::in_memory();
        let (_, first, _) = pipeline_with_stages(&store);
        delete(&store, first.id).unwrap();
        assert!(get(&store, first.id).is_none());
    }

    #[test]
    fn test_delete_reassigns_deals_to_next_order() {
        let store = Store::in_memory();
        let (pipeline, first, second) = pipeline_with_stages(&store);
        let deal = store.create(Deal::new(pipeline.id, first.id, new_entity_id(), "Moves up"));

        delete(&store, first.id).unwrap();
        assert_eq!(store.get_by_id::<Deal>(deal.id).unwrap().stage_id, second.id);
    }

    #[test]
    fn test_delete_last_stage_with_deals_is_refused() {
        let store = Store::in_memory();
        let (pipeline, _first, second) = pipeline_with_stages(&store);
        let deal = store.create(Deal::new(pipeline.id, second.id, new_entity_id(), "Stuck"));

        let err = delete(&store, second.id).unwrap_err();
        assert!(matches!(err, CrmError::StageHasDeals { deal_count: 1, .. }));

        // Stage and deal are untouched.
        assert!(get(&store, second.id).is_some());
        assert_eq!(store.get_by_id::<Deal>(deal.id).unwrap().stage_id, second.id);
    }
}
