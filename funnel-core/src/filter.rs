//! Typed query filters
//!
//! Every field is optional; a present field is an exact match (or a
//! case-insensitive substring match for `search`), and fields compose with
//! logical AND. A default filter matches everything.

use crate::{
    Activity, ActivityKind, Company, Contact, Deal, DealPriority, DealStatus, Email, EmailStatus,
    EntityId, Lead, LeadSource, LeadStatus, Note, Notification,
};
use serde::{Deserialize, Serialize};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter for deal queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealFilter {
    pub pipeline_id: Option<EntityId>,
    pub stage_id: Option<EntityId>,
    pub contact_id: Option<EntityId>,
    pub company_id: Option<EntityId>,
    pub status: Option<DealStatus>,
    pub priority: Option<DealPriority>,
    pub assigned_to: Option<String>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
}

impl DealFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        self.pipeline_id.map_or(true, |id| deal.pipeline_id == id)
            && self.stage_id.map_or(true, |id| deal.stage_id == id)
            && self.contact_id.map_or(true, |id| deal.contact_id == id)
            && self.company_id.map_or(true, |id| deal.company_id == Some(id))
            && self.status.map_or(true, |s| deal.status == s)
            && self.priority.map_or(true, |p| deal.priority == p)
            && self
                .assigned_to
                .as_ref()
                .map_or(true, |m| &deal.assigned_to == m)
            && self
                .search
                .as_ref()
                .map_or(true, |q| contains_ci(&deal.title, q))
    }
}

/// Filter for contact queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    pub company_id: Option<EntityId>,
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        self.company_id
            .map_or(true, |id| contact.company_id == Some(id))
            && self.search.as_ref().map_or(true, |q| {
                contains_ci(&contact.name, q) || contains_ci(&contact.email, q)
            })
    }
}

/// Filter for company queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    pub industry: Option<String>,
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
}

impl CompanyFilter {
    pub fn matches(&self, company: &Company) -> bool {
        self.industry
            .as_ref()
            .map_or(true, |i| &company.industry == i)
            && self
                .search
                .as_ref()
                .map_or(true, |q| contains_ci(&company.name, q))
    }
}

/// Filter for lead queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFilter {
    pub contact_id: Option<EntityId>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub assigned_to: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        self.contact_id.map_or(true, |id| lead.contact_id == id)
            && self.status.map_or(true, |s| lead.status == s)
            && self.source.map_or(true, |s| lead.source == s)
            && self
                .assigned_to
                .as_ref()
                .map_or(true, |m| &lead.assigned_to == m)
    }
}

/// Filter for activity queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilter {
    pub deal_id: Option<EntityId>,
    pub contact_id: Option<EntityId>,
    pub kind: Option<ActivityKind>,
    pub is_completed: Option<bool>,
    pub assigned_to: Option<String>,
}

impl ActivityFilter {
    pub fn matches(&self, activity: &Activity) -> bool {
        self.deal_id.map_or(true, |id| activity.deal_id == Some(id))
            && self
                .contact_id
                .map_or(true, |id| activity.contact_id == Some(id))
            && self.kind.map_or(true, |k| activity.kind == k)
            && self.is_completed.map_or(true, |c| activity.is_completed == c)
            && self
                .assigned_to
                .as_ref()
                .map_or(true, |m| &activity.assigned_to == m)
    }
}

/// Filter for note queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilter {
    pub deal_id: Option<EntityId>,
    pub contact_id: Option<EntityId>,
    pub company_id: Option<EntityId>,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        self.deal_id.map_or(true, |id| note.deal_id == Some(id))
            && self.contact_id.map_or(true, |id| note.contact_id == Some(id))
            && self.company_id.map_or(true, |id| note.company_id == Some(id))
    }
}

/// Filter for email queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFilter {
    pub deal_id: Option<EntityId>,
    pub contact_id: Option<EntityId>,
    pub status: Option<EmailStatus>,
}

impl EmailFilter {
    pub fn matches(&self, email: &Email) -> bool {
        self.deal_id.map_or(true, |id| email.deal_id == Some(id))
            && self.contact_id.map_or(true, |id| email.contact_id == id)
            && self.status.map_or(true, |s| email.status == s)
    }
}

/// Filter for notification queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFilter {
    pub is_read: Option<bool>,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        self.is_read.map_or(true, |r| notification.is_read == r)
    }
}
