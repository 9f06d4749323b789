//! Lead service
//!
//! Conversion is one-way and deliberately lossy: the lead stays behind with
//! `status = qualified` (the same value manual qualification uses) and a new
//! open deal is born in the default pipeline's first stage.

use crate::pipelines;
use funnel_core::{
    Contact, CrmError, CrmResult, Deal, EntityId, EntityKind, Lead, LeadFilter, LeadStatus,
    Stage,
};
use funnel_store::Store;

/// Partial update for [`Lead`].
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub source: Option<funnel_core::LeadSource>,
    pub status: Option<LeadStatus>,
    pub score: Option<i32>,
    pub assigned_to: Option<String>,
}

pub fn list(store: &Store, filter: &LeadFilter) -> Vec<Lead> {
    store
        .get_all::<Lead>()
        .into_iter()
        .filter(|l| filter.matches(l))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Lead> {
    store.get_by_id(id)
}

pub fn create(store: &Store, lead: Lead) -> CrmResult<Lead> {
    validate_score(lead.score)?;
    Ok(store.create(lead))
}

pub fn update(store: &Store, id: EntityId, patch: LeadPatch) -> CrmResult<Option<Lead>> {
    if let Some(score) = patch.score {
        validate_score(score)?;
    }
    Ok(store.update::<Lead>(id, |l| {
        if let Some(source) = patch.source {
            l.source = source;
        }
        if let Some(status) = patch.status {
            l.status = status;
        }
        if let Some(score) = patch.score {
            l.score = score;
        }
        if let Some(assigned_to) = patch.assigned_to {
            l.assigned_to = assigned_to;
        }
    }))
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Lead>(id);
}

/// Convert a lead into a deal.
///
/// The new deal lands in the default pipeline's lowest-order stage with
/// `value = 0`, `currency = KRW`, medium priority, open status, carrying the
/// lead's contact, its contact's company, and the lead's assignee. The lead
/// itself is only marked `qualified`; it is not deleted.
pub fn convert_to_deal(store: &Store, id: EntityId) -> CrmResult<Deal> {
    let lead = get(store, id).ok_or(CrmError::not_found(EntityKind::Lead, id))?;

    let pipeline = pipelines::get_default(store).ok_or_else(|| {
        CrmError::validation("pipeline", "no default pipeline to receive converted leads")
    })?;
    let stage = store
        .get_all::<Stage>()
        .into_iter()
        .filter(|s| s.pipeline_id == pipeline.id)
        .min_by_key(|s| s.order)
        .ok_or_else(|| {
            CrmError::validation("pipeline", "default pipeline has no stages")
        })?;

    let contact = store.get_by_id::<Contact>(lead.contact_id);
    let title = contact
        .as_ref()
        .map(|c| format!("{} deal", c.name))
        .unwrap_or_else(|| String::from("New deal"));

    let mut deal = Deal::new(pipeline.id, stage.id, lead.contact_id, title);
    deal.company_id = contact.and_then(|c| c.company_id);
    deal.assigned_to = lead.assigned_to.clone();
    let deal = store.create(deal);

    store.update::<Lead>(id, |l| {
        l.status = LeadStatus::Qualified;
    });

    Ok(deal)
}

fn validate_score(score: i32) -> CrmResult<()> {
    if !(1..=100).contains(&score) {
        return Err(CrmError::validation(
            "score",
            format!("{} is outside 1-100", score),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::{Company, DealPriority, DealStatus, LeadSource, Pipeline};

    fn default_pipeline_with_stage(store: &Store) -> (Pipeline, Stage) {
        let mut p = Pipeline::new("Sales");
        p.is_default = true;
        let pipeline = pipelines::create(store, p);
        store.create(Stage::new(pipeline.id, "Negotiate", 2, 60));
        let first = store.create(Stage::new(pipeline.id, "Qualify", 1, 20));
        (pipeline, first)
    }

    #[test]
    fn test_create_rejects_out_of_range_score() {
        let store = Store::in_memory();
        let mut lead = Lead::new(funnel_core::new_entity_id(), LeadSource::Referral);
        lead.score = 0;
        assert!(matches!(
            create(&store, lead).unwrap_err(),
            CrmError::Validation { .. }
        ));
    }

    #[test]
    fn test_convert_copies_lead_fields_and_qualifies() {
        let store = Store::in_memory();
        let (pipeline, first_stage) = default_pipeline_with_stage(&store);

        let company = store.create(Company::new("ACME"));
        let mut contact = Contact::new("Kim", "kim@acme.io");
        contact.company_id = Some(company.id);
        let contact = store.create(contact);

        let mut lead = Lead::new(contact.id, LeadSource::Website);
        lead.assigned_to = "m1".to_string();
        let lead = create(&store, lead).unwrap();

        let deal = convert_to_deal(&store, lead.id).unwrap();
        assert_eq!(deal.pipeline_id, pipeline.id);
        assert_eq!(deal.stage_id, first_stage.id);
        assert_eq!(deal.contact_id, contact.id);
        assert_eq!(deal.company_id, Some(company.id));
        assert_eq!(deal.assigned_to, "m1");
        assert_eq!(deal.value, 0);
        assert_eq!(deal.currency, "KRW");
        assert_eq!(deal.priority, DealPriority::Medium);
        assert_eq!(deal.status, DealStatus::Open);

        let lead = get(&store, lead.id).unwrap();
        assert_eq!(lead.status, LeadStatus::Qualified);
    }

    #[test]
    fn test_convert_without_default_pipeline_errors() {
        let store = Store::in_memory();
        let contact = store.create(Contact::new("Kim", "kim@acme.io"));
        let lead = create(&store, Lead::new(contact.id, LeadSource::Event)).unwrap();

        assert!(matches!(
            convert_to_deal(&store, lead.id).unwrap_err(),
            CrmError::Validation { .. }
        ));
    }

    #[test]
    fn test_convert_missing_lead_is_loud() {
        let store = Store::in_memory();
        assert!(matches!(
            convert_to_deal(&store, funnel_core::new_entity_id()).unwrap_err(),
            CrmError::NotFound { .. }
        ));
    }
}
