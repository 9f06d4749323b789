//! FUNNEL Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains the entity records, their enums, the error taxonomy,
//! the typed query filters, and the storage-key registry.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod entities;
pub mod enums;
pub mod error;
pub mod filter;
pub mod keys;
pub mod record;

pub use entities::*;
pub use enums::*;
pub use error::*;
pub use filter::*;
pub use record::Record;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier. Random UUIDv4, persisted as its canonical string form.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone, persisted as ISO-8601.
pub type Timestamp = DateTime<Utc>;

/// Generate a new random EntityId.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        let a = new_entity_id();
        let b = new_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_id_roundtrips_as_string() {
        let id = new_entity_id();
        let json = serde_json::to_string(&id).unwrap();
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
