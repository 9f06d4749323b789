//! Attachment service
//!
//! Metadata only; there are no file bytes anywhere in the system.

use funnel_core::{Attachment, EntityId, EntityKind};
use funnel_store::Store;

/// Attachments pinned to one entity.
pub fn list_for(store: &Store, entity_type: EntityKind, entity_id: EntityId) -> Vec<Attachment> {
    store
        .get_all::<Attachment>()
        .into_iter()
        .filter(|a| a.entity_type == entity_type && a.entity_id == entity_id)
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Attachment> {
    store.get_by_id(id)
}

pub fn create(store: &Store, attachment: Attachment) -> Attachment {
    store.create(attachment)
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Attachment>(id);
}
