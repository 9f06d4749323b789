//! Saved report definitions
//!
//! CRUD only. Executing a definition against the dataset lives in the
//! aggregation crate; this service just persists what the user saved.

use funnel_core::{EntityId, Report};
use funnel_store::Store;

/// Partial update for [`Report`].
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub name: Option<String>,
    pub kind: Option<funnel_core::ReportKind>,
    pub description: Option<String>,
    pub config: Option<serde_json::Value>,
}

pub fn list(store: &Store) -> Vec<Report> {
    store.get_all()
}

pub fn get(store: &Store, id: EntityId) -> Option<Report> {
    store.get_by_id(id)
}

pub fn create(store: &Store, report: Report) -> Report {
    store.create(report)
}

pub fn update(store: &Store, id: EntityId, patch: ReportPatch) -> Option<Report> {
    store.update::<Report>(id, |r| {
        if let Some(name) = patch.name {
            r.name = name;
        }
        if let Some(kind) = patch.kind {
            r.kind = kind;
        }
        if let Some(description) = patch.description {
            r.description = description;
        }
        if let Some(config) = patch.config {
            r.config = config;
        }
    })
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Report>(id);
}
