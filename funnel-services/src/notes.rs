//! Note service

use funnel_core::{EntityId, Note, NoteFilter};
use funnel_store::Store;

/// Partial update for [`Note`].
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub content: Option<String>,
}

pub fn list(store: &Store, filter: &NoteFilter) -> Vec<Note> {
    store
        .get_all::<Note>()
        .into_iter()
        .filter(|n| filter.matches(n))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Note> {
    store.get_by_id(id)
}

pub fn create(store: &Store, note: Note) -> Note {
    store.create(note)
}

pub fn update(store: &Store, id: EntityId, patch: NotePatch) -> Option<Note> {
    store.update::<Note>(id, |n| {
        if let Some(content) = patch.content {
            n.content = content;
        }
    })
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Note>(id);
}
