//! Tag service
//!
//! Tags themselves are trivial; the interesting part is the link table.
//! Linking is idempotent on `(entity_type, entity_id, tag_id)` and deleting
//! a tag sweeps every link that referenced it.

use funnel_core::{EntityId, EntityKind, EntityTag, Tag};
use funnel_store::Store;

/// Partial update for [`Tag`].
#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub fn list(store: &Store) -> Vec<Tag> {
    store.get_all()
}

pub fn get(store: &Store, id: EntityId) -> Option<Tag> {
    store.get_by_id(id)
}

pub fn create(store: &Store, tag: Tag) -> Tag {
    store.create(tag)
}

pub fn update(store: &Store, id: EntityId, patch: TagPatch) -> Option<Tag> {
    store.update::<Tag>(id, |t| {
        if let Some(name) = patch.name {
            t.name = name;
        }
        if let Some(color) = patch.color {
            t.color = color;
        }
    })
}

/// Delete a tag and every link that referenced it.
pub fn delete(store: &Store, id: EntityId) {
    let links: Vec<EntityTag> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| et.tag_id != id)
        .collect();
    store.save(&links);
    store.remove::<Tag>(id);
}

/// Attach `tag_id` to an entity. Returns the existing link unchanged when
/// the triple is already present.
pub fn tag_entity(
    store: &Store,
    entity_type: EntityKind,
    entity_id: EntityId,
    tag_id: EntityId,
) -> EntityTag {
    if let Some(existing) = store.get_all::<EntityTag>().into_iter().find(|et| {
        et.entity_type == entity_type && et.entity_id == entity_id && et.tag_id == tag_id
    }) {
        return existing;
    }
    store.create(EntityTag::new(entity_type, entity_id, tag_id))
}

/// Detach `tag_id` from an entity. No-op when no such link exists.
pub fn untag_entity(
    store: &Store,
    entity_type: EntityKind,
    entity_id: EntityId,
    tag_id: EntityId,
) {
    let links: Vec<EntityTag> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| {
            !(et.entity_type == entity_type && et.entity_id == entity_id && et.tag_id == tag_id)
        })
        .collect();
    store.save(&links);
}

/// All tags attached to one entity.
pub fn tags_for(store: &Store, entity_type: EntityKind, entity_id: EntityId) -> Vec<Tag> {
    let tag_ids: Vec<EntityId> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| et.entity_type == entity_type && et.entity_id == entity_id)
        .map(|et| et.tag_id)
        .collect();
    store
        .get_all::<Tag>()
        .into_iter()
        .filter(|t| tag_ids.contains(&t.id))
        .collect()
}

/// Ids of all entities of `entity_type` carrying `tag_id`.
pub fn entities_with_tag(
    store: &Store,
    entity_type: EntityKind,
    tag_id: EntityId,
) -> Vec<EntityId> {
    store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| et.entity_type == entity_type && et.tag_id == tag_id)
        .map(|et| et.entity_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::new_entity_id;

    #[test]
    fn test_tag_entity_is_idempotent() {
        let store = Store::in_memory();
        let tag = create(&store, Tag::new("vip", "#f59e0b"));
        let deal_id = new_entity_id();

        let first = tag_entity(&store, EntityKind::Deal, deal_id, tag.id);
        let second = tag_entity(&store, EntityKind::Deal, deal_id, tag.id);
        assert_eq!(first.id, second.id);
        assert_eq!(store.get_all::<EntityTag>().len(), 1);
    }

    #[test]
    fn test_delete_tag_sweeps_links() {
        let store = Store::in_memory();
        let tag = create(&store, Tag::new("vip", "#f59e0b"));
        let other = create(&store, Tag::new("churn-risk", "#ef4444"));
        let deal_id = new_entity_id();

        tag_entity(&store, EntityKind::Deal, deal_id, tag.id);
        tag_entity(&store, EntityKind::Deal, deal_id, other.id);

        delete(&store, tag.id);
        let remaining = store.get_all::<EntityTag>();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].tag_id, other.id);
    }

    #[test]
    fn test_same_tag_on_different_kinds_is_two_links() {
        let store = Store::in_memory();
        let tag = create(&store, Tag::new("vip", "#f59e0b"));
        let id = new_entity_id();

        tag_entity(&store, EntityKind::Deal, id, tag.id);
        tag_entity(&store, EntityKind::Contact, id, tag.id);
        assert_eq!(store.get_all::<EntityTag>().len(), 2);

        untag_entity(&store, EntityKind::Deal, id, tag.id);
        assert_eq!(tags_for(&store, EntityKind::Contact, id).len(), 1);
        assert!(tags_for(&store, EntityKind::Deal, id).is_empty());
    }
}
