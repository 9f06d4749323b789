//! FUNNEL Test Utilities
//!
//! Centralized test infrastructure for the FUNNEL workspace:
//! - Store factories (empty and demo-seeded)
//! - Entity fixtures wired into a consistent pipeline/stage graph
//! - Proptest generators for entity types

// Re-export the store and core types for convenience
pub use funnel_core::{
    Activity, ActivityKind, AppSettings, Attachment, Company, Contact, CrmError, CrmResult,
    Deal, DealPriority, DealStatus, Email, EmailStatus, EntityId, EntityKind, EntityTag, Lead,
    LeadSource, LeadStatus, Member, MemberRole, Note, Notification, Pipeline, Report, Stage,
    Tag, Template, Timestamp, new_entity_id,
};
pub use funnel_store::{JsonFileBackend, KvBackend, MemoryBackend, Store};

use funnel_services::{pipelines, seed};

// ============================================================================
// STORE FACTORIES
// ============================================================================

/// An empty in-memory store.
pub fn fresh_store() -> Store {
    Store::in_memory()
}

/// An in-memory store populated with the demo dataset.
pub fn seeded_store() -> Store {
    let store = Store::in_memory();
    seed::seed_demo_data(&store);
    store
}

// ============================================================================
// FIXTURES
// ============================================================================

/// A default pipeline with `n` stages at orders `1..=n`, probabilities
/// spread evenly up to 100.
pub fn pipeline_with_stages(store: &Store, n: usize) -> (Pipeline, Vec<Stage>) {
    let mut pipeline = Pipeline::new("Fixture pipeline");
    pipeline.is_default = true;
    let pipeline = pipelines::create(store, pipeline);

    let stages = (1..=n)
        .map(|order| {
            let probability = (order * 100 / n.max(1)) as i32;
            store.create(Stage::new(
                pipeline.id,
                format!("Stage {}", order),
                order as i32,
                probability,
            ))
        })
        .collect();
    (pipeline, stages)
}

/// An open deal of `value` in the given stage.
pub fn open_deal(store: &Store, pipeline: &Pipeline, stage: &Stage, value: i64) -> Deal {
    let mut deal = Deal::new(pipeline.id, stage.id, new_entity_id(), "Fixture deal");
    deal.value = value;
    store.create(deal)
}

/// A contact employed at a fresh company.
pub fn employed_contact(store: &Store, company_name: &str) -> (Company, Contact) {
    let company = store.create(Company::new(company_name));
    let mut contact = Contact::new("Fixture contact", "contact@example.com");
    contact.company_id = Some(company.id);
    let contact = store.create(contact);
    (company, contact)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating FUNNEL entity types.

    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random UUID.
    pub fn arb_entity_id() -> impl Strategy<Value = EntityId> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a Timestamp within a reasonable range (2020-2030).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1_577_836_800i64..1_893_456_000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    /// Generate a DealStatus variant.
    pub fn arb_deal_status() -> impl Strategy<Value = DealStatus> {
        prop_oneof![
            Just(DealStatus::Open),
            Just(DealStatus::Won),
            Just(DealStatus::Lost),
        ]
    }

    /// Generate a LeadSource variant.
    pub fn arb_lead_source() -> impl Strategy<Value = LeadSource> {
        prop_oneof![
            Just(LeadSource::Website),
            Just(LeadSource::Referral),
            Just(LeadSource::Email),
            Just(LeadSource::Social),
            Just(LeadSource::Event),
            Just(LeadSource::Other),
        ]
    }

    /// Generate a deal with arbitrary value/status/timestamps.
    pub fn arb_deal() -> impl Strategy<Value = Deal> {
        (
            arb_entity_id(),
            arb_entity_id(),
            arb_entity_id(),
            0i64..100_000_000,
            arb_deal_status(),
            arb_timestamp(),
            "[a-zA-Z ]{1,24}",
        )
            .prop_map(
                |(pipeline_id, stage_id, contact_id, value, status, updated_at, title)| {
                    let mut deal = Deal::new(pipeline_id, stage_id, contact_id, title);
                    deal.value = value;
                    deal.status = status;
                    deal.updated_at = updated_at;
                    deal
                },
            )
    }

    /// Generate a tag with a plausible name and color.
    pub fn arb_tag() -> impl Strategy<Value = Tag> {
        ("[a-z]{1,12}", "#[0-9a-f]{6}").prop_map(|(name, color)| Tag::new(name, color))
    }
}
