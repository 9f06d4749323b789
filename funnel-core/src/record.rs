//! Record trait - what the typed store adapter needs from an entity
//!
//! Mirrors the adapter contract: `create` stamps identity and creation time,
//! `update` re-stamps the update time only on types that carry one.

use crate::{keys, EntityId, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marker trait for persistable entity records.
///
/// Implementations must be `Clone + Serialize + DeserializeOwned` so the
/// adapter can round-trip whole collections through JSON.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Storage key of this entity's collection.
    const KEY: &'static str;

    /// Unique identifier of this record.
    fn id(&self) -> EntityId;

    /// Stamp a fresh identity and creation time. Called by the adapter on
    /// insert; whatever the caller put in these fields is overwritten.
    fn stamp_created(&mut self, id: EntityId, now: Timestamp);

    /// Re-stamp the update time. Default is a no-op for types without an
    /// `updated_at` field.
    fn stamp_updated(&mut self, _now: Timestamp) {}
}

macro_rules! impl_record {
    // Records with created_at and updated_at.
    ($ty:ty, $key:expr, touch) => {
        impl Record for $ty {
            const KEY: &'static str = $key;

            fn id(&self) -> EntityId {
                self.id
            }

            fn stamp_created(&mut self, id: EntityId, now: Timestamp) {
                self.id = id;
                self.created_at = now;
                self.updated_at = now;
            }

            fn stamp_updated(&mut self, now: Timestamp) {
                self.updated_at = now;
            }
        }
    };
    // Records with created_at only.
    ($ty:ty, $key:expr, created) => {
        impl Record for $ty {
            const KEY: &'static str = $key;

            fn id(&self) -> EntityId {
                self.id
            }

            fn stamp_created(&mut self, id: EntityId, now: Timestamp) {
                self.id = id;
                self.created_at = now;
            }
        }
    };
    // Bare link records without timestamps.
    ($ty:ty, $key:expr) => {
        impl Record for $ty {
            const KEY: &'static str = $key;

            fn id(&self) -> EntityId {
                self.id
            }

            fn stamp_created(&mut self, id: EntityId, _now: Timestamp) {
                self.id = id;
            }
        }
    };
}

impl_record!(crate::Pipeline, keys::PIPELINES, touch);
impl_record!(crate::Stage, keys::STAGES, created);
impl_record!(crate::Company, keys::COMPANIES, touch);
impl_record!(crate::Contact, keys::CONTACTS, touch);
impl_record!(crate::Lead, keys::LEADS, touch);
impl_record!(crate::Deal, keys::DEALS, touch);
impl_record!(crate::Activity, keys::ACTIVITIES, created);
impl_record!(crate::Note, keys::NOTES, touch);
impl_record!(crate::Tag, keys::TAGS, created);
impl_record!(crate::EntityTag, keys::ENTITY_TAGS);
impl_record!(crate::Email, keys::EMAILS, created);
impl_record!(crate::Attachment, keys::ATTACHMENTS, created);
impl_record!(crate::Member, keys::MEMBERS, created);
impl_record!(crate::Report, keys::REPORTS, touch);
impl_record!(crate::Template, keys::TEMPLATES, touch);
impl_record!(crate::DealHistory, keys::DEAL_HISTORY, created);
impl_record!(crate::Notification, keys::NOTIFICATIONS, created);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pipeline, Stage};
    use chrono::Utc;

    #[test]
    fn test_stamp_created_sets_both_timestamps() {
        let mut pipeline = Pipeline::new("Sales");
        let id = crate::new_entity_id();
        let now = Utc::now();
        pipeline.stamp_created(id, now);
        assert_eq!(pipeline.id, id);
        assert_eq!(pipeline.created_at, now);
        assert_eq!(pipeline.updated_at, now);
    }

    #[test]
    fn test_stamp_updated_is_noop_without_updated_at() {
        let mut stage = Stage::new(crate::new_entity_id(), "Qualify", 1, 20);
        let created = stage.created_at;
        stage.stamp_updated(Utc::now());
        assert_eq!(stage.created_at, created);
    }
}
