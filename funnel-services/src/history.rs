//! Deal history service
//!
//! Append-only audit rows, one per field change. Written by the deal
//! service's mutation paths, never edited afterwards.

use chrono::Utc;
use funnel_core::{new_entity_id, DealHistory, EntityId};
use funnel_store::Store;

/// Append one audit row for `deal_id`.
pub fn record(
    store: &Store,
    deal_id: EntityId,
    field: &str,
    old_value: impl Into<String>,
    new_value: impl Into<String>,
) -> DealHistory {
    store.create(DealHistory {
        id: new_entity_id(),
        deal_id,
        field: field.to_string(),
        old_value: old_value.into(),
        new_value: new_value.into(),
        changed_by: String::new(),
        created_at: Utc::now(),
    })
}

/// All audit rows for one deal, newest first.
pub fn for_deal(store: &Store, deal_id: EntityId) -> Vec<DealHistory> {
    let mut rows: Vec<DealHistory> = store
        .get_all::<DealHistory>()
        .into_iter()
        .filter(|h| h.deal_id == deal_id)
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_read_back_newest_first() {
        let store = Store::in_memory();
        let deal_id = new_entity_id();
        record(&store, deal_id, "value", "0", "1000");
        record(&store, deal_id, "status", "open", "won");
        record(&store, new_entity_id(), "value", "1", "2");

        let rows = for_deal(&store, deal_id);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.deal_id == deal_id));
    }
}
