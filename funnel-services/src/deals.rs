//! Deal service
//!
//! Deals are the center of the model: stage moves and closes flow through
//! dedicated operations (not plain patches) so the status rules hold and
//! every watched change lands in the audit log.

use crate::history;
use funnel_core::{
    Company, Contact, CrmError, CrmResult, Deal, DealFilter, DealStatus, EntityId, EntityKind,
    EntityTag, Pipeline, Stage, Tag, Timestamp,
};
use funnel_store::Store;

/// Partial update for [`Deal`]. Stage and status have their own operations.
#[derive(Debug, Clone, Default)]
pub struct DealPatch {
    pub title: Option<String>,
    pub value: Option<i64>,
    pub currency: Option<String>,
    pub expected_close_date: Option<Timestamp>,
    pub priority: Option<funnel_core::DealPriority>,
    pub assigned_to: Option<String>,
}

/// A deal joined with the display names of everything it references.
/// Missing referents resolve to `None`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct DealDetail {
    pub deal: Deal,
    pub pipeline_name: Option<String>,
    pub stage_name: Option<String>,
    pub contact_name: Option<String>,
    pub company_name: Option<String>,
    pub tags: Vec<Tag>,
}

pub fn list(store: &Store, filter: &DealFilter) -> Vec<Deal> {
    store
        .get_all::<Deal>()
        .into_iter()
        .filter(|d| filter.matches(d))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Deal> {
    store.get_by_id(id)
}

/// The deal plus resolved display names and tags.
pub fn get_detail(store: &Store, id: EntityId) -> Option<DealDetail> {
    let deal = get(store, id)?;
    let pipeline_name = store
        .get_by_id::<Pipeline>(deal.pipeline_id)
        .map(|p| p.name);
    let stage_name = store.get_by_id::<Stage>(deal.stage_id).map(|s| s.name);
    let contact_name = store.get_by_id::<Contact>(deal.contact_id).map(|c| c.name);
    let company_name = deal
        .company_id
        .and_then(|cid| store.get_by_id::<Company>(cid))
        .map(|c| c.name);
    let tag_ids: Vec<EntityId> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| et.entity_type == EntityKind::Deal && et.entity_id == deal.id)
        .map(|et| et.tag_id)
        .collect();
    let tags = store
        .get_all::<Tag>()
        .into_iter()
        .filter(|t| tag_ids.contains(&t.id))
        .collect();

    Some(DealDetail {
        deal,
        pipeline_name,
        stage_name,
        contact_name,
        company_name,
        tags,
    })
}

pub fn create(store: &Store, deal: Deal) -> Deal {
    store.create(deal)
}

/// Apply a partial update and audit each watched field that changed.
pub fn update(store: &Store, id: EntityId, patch: DealPatch) -> Option<Deal> {
    let before = get(store, id)?;
    let updated = store.update::<Deal>(id, |d| {
        if let Some(title) = patch.title {
            d.title = title;
        }
        if let Some(value) = patch.value {
            d.value = value;
        }
        if let Some(currency) = patch.currency {
            d.currency = currency;
        }
        if let Some(date) = patch.expected_close_date {
            d.expected_close_date = Some(date);
        }
        if let Some(priority) = patch.priority {
            d.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            d.assigned_to = assigned_to;
        }
    })?;

    if before.title != updated.title {
        history::record(store, id, "title", before.title, updated.title.clone());
    }
    if before.value != updated.value {
        history::record(
            store,
            id,
            "value",
            before.value.to_string(),
            updated.value.to_string(),
        );
    }
    if before.assigned_to != updated.assigned_to {
        history::record(
            store,
            id,
            "assignedTo",
            before.assigned_to,
            updated.assigned_to.clone(),
        );
    }
    Some(updated)
}

/// Delete a deal and everything scoped to it: activities, notes, emails,
/// audit rows, tag links, and attachment metadata.
pub fn delete(store: &Store, id: EntityId) {
    use funnel_core::{Activity, Attachment, DealHistory, Email, Note};

    let activities: Vec<Activity> = store
        .get_all::<Activity>()
        .into_iter()
        .filter(|a| a.deal_id != Some(id))
        .collect();
    store.save(&activities);

    let notes: Vec<Note> = store
        .get_all::<Note>()
        .into_iter()
        .filter(|n| n.deal_id != Some(id))
        .collect();
    store.save(&notes);

    let emails: Vec<Email> = store
        .get_all::<Email>()
        .into_iter()
        .filter(|e| e.deal_id != Some(id))
        .collect();
    store.save(&emails);

    let rows: Vec<DealHistory> = store
        .get_all::<DealHistory>()
        .into_iter()
        .filter(|h| h.deal_id != id)
        .collect();
    store.save(&rows);

    let links: Vec<EntityTag> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| !(et.entity_type == EntityKind::Deal && et.entity_id == id))
        .collect();
    store.save(&links);

    let attachments: Vec<Attachment> = store
        .get_all::<Attachment>()
        .into_iter()
        .filter(|a| !(a.entity_type == EntityKind::Deal && a.entity_id == id))
        .collect();
    store.save(&attachments);

    store.remove::<Deal>(id);
}

/// Move an open deal to another stage. The pipeline follows the stage.
pub fn move_to_stage(store: &Store, id: EntityId, stage_id: EntityId) -> CrmResult<Deal> {
    let deal = get(store, id).ok_or(CrmError::not_found(EntityKind::Deal, id))?;
    if deal.status != DealStatus::Open {
        return Err(CrmError::validation(
            "status",
            format!("stage changes require an open deal, this one is {}", deal.status),
        ));
    }
    let stage = store
        .get_by_id::<Stage>(stage_id)
        .ok_or(CrmError::not_found(EntityKind::Stage, stage_id))?;

    let updated = store
        .update::<Deal>(id, |d| {
            d.stage_id = stage.id;
            d.pipeline_id = stage.pipeline_id;
        })
        .ok_or(CrmError::not_found(EntityKind::Deal, id))?;

    if deal.stage_id != updated.stage_id {
        history::record(
            store,
            id,
            "stageId",
            deal.stage_id.to_string(),
            updated.stage_id.to_string(),
        );
    }
    Ok(updated)
}

/// Close a deal as won or lost. `lost_reason` is kept only for lost deals.
pub fn close(
    store: &Store,
    id: EntityId,
    outcome: DealStatus,
    lost_reason: Option<String>,
) -> CrmResult<Deal> {
    if outcome == DealStatus::Open {
        return Err(CrmError::validation("status", "close requires won or lost"));
    }
    let before = get(store, id).ok_or(CrmError::not_found(EntityKind::Deal, id))?;

    let updated = store
        .update::<Deal>(id, |d| {
            d.status = outcome;
            d.lost_reason = match outcome {
                DealStatus::Lost => lost_reason,
                _ => None,
            };
        })
        .ok_or(CrmError::not_found(EntityKind::Deal, id))?;

    if before.status != updated.status {
        history::record(
            store,
            id,
            "status",
            before.status.to_string(),
            updated.status.to_string(),
        );
    }
    Ok(updated)
}

/// Reopen a closed deal, clearing any lost reason.
pub fn reopen(store: &Store, id: EntityId) -> CrmResult<Deal> {
    let before = get(store, id).ok_or(CrmError::not_found(EntityKind::Deal, id))?;

    let updated = store
        .update::<Deal>(id, |d| {
            d.status = DealStatus::Open;
            d.lost_reason = None;
        })
        .ok_or(CrmError::not_found(EntityKind::Deal, id))?;

    if before.status != updated.status {
        history::record(
            store,
            id,
            "status",
            before.status.to_string(),
            updated.status.to_string(),
        );
    }
    Ok(updated)
}
