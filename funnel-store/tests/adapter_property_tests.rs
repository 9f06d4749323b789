//! Adapter contract properties
//!
//! The typed store must keep its promises for any input: fresh unique ids on
//! create, id stability on update, and graceful degradation on junk data.

use funnel_core::{keys, Pipeline, Tag};
use funnel_store::Store;
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_tag() -> impl Strategy<Value = Tag> {
    ("[a-z]{1,12}", "#[0-9a-f]{6}").prop_map(|(name, color)| Tag::new(name, color))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_create_assigns_globally_unique_ids(tags in prop::collection::vec(arb_tag(), 1..16)) {
        let store = Store::in_memory();
        let mut seen = HashSet::new();
        for tag in tags {
            let created = store.create(tag);
            prop_assert!(seen.insert(created.id));
            prop_assert!(store.get_by_id::<Tag>(created.id).is_some());
        }
    }

    #[test]
    fn prop_update_never_changes_id_and_moves_updated_at_forward(name in "[a-z]{1,16}") {
        let store = Store::in_memory();
        let pipeline = store.create(Pipeline::new("before"));

        let updated = store
            .update::<Pipeline>(pipeline.id, |p| p.name = name.clone())
            .unwrap();
        prop_assert_eq!(updated.id, pipeline.id);
        prop_assert_eq!(updated.name, name);
        prop_assert!(updated.updated_at >= pipeline.updated_at);
        prop_assert!(updated.created_at <= updated.updated_at);
    }

    #[test]
    fn prop_get_all_survives_arbitrary_junk(junk in "\\PC{0,128}") {
        let store = Store::in_memory();
        store.write_raw(keys::TAGS, &junk);
        // Whatever was written, reads degrade instead of failing.
        let _: Vec<Tag> = store.get_all();
    }
}

#[test]
fn test_created_at_is_not_in_the_future() {
    let store = Store::in_memory();
    let tag = store.create(Tag::new("vip", "#f59e0b"));
    assert!(tag.created_at <= chrono::Utc::now());
}
