//! Core entity structures
//!
//! Every record is flat: foreign keys are plain ids, nothing owns anything.
//! Referential integrity is the services' job, not the data model's.
//! Field names serialize in camelCase so the persisted JSON matches the
//! backup wire format.

use crate::{
    ActivityKind, DealPriority, DealStatus, EmailStatus, EntityId, EntityKind, LeadSource,
    LeadStatus, MemberRole, NotificationKind, ReportKind, Timestamp,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Pipeline - one sales process variant, a named sequence of stages.
/// At most one pipeline is the system-wide default at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Pipeline {
    /// Create a non-default pipeline with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            name: name.into(),
            description: String::new(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Stage - an ordered step within a pipeline. `probability` (0-100) is the
/// win likelihood used for weighted forecasting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: EntityId,
    pub pipeline_id: EntityId,
    pub name: String,
    pub order: i32,
    pub color: String,
    pub probability: i32,
    pub created_at: Timestamp,
}

impl Stage {
    pub fn new(pipeline_id: EntityId, name: impl Into<String>, order: i32, probability: i32) -> Self {
        Self {
            id: crate::new_entity_id(),
            pipeline_id,
            name: name.into(),
            order,
            color: String::from("#94a3b8"),
            probability,
            created_at: Utc::now(),
        }
    }
}

/// Company record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: EntityId,
    pub name: String,
    pub industry: String,
    pub website: String,
    pub phone: String,
    pub address: String,
    /// Headcount band, display only (e.g. "11-50").
    pub size: String,
    pub revenue: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            name: name.into(),
            industry: String::new(),
            website: String::new(),
            phone: String::new(),
            address: String::new(),
            size: String::new(),
            revenue: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Contact - a person, optionally attached to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: EntityId,
    pub company_id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub avatar: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            company_id: None,
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            position: String::new(),
            avatar: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lead - a pre-qualification record on a contact. Converting a lead creates
/// a deal but keeps the lead around with `status = qualified`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: EntityId,
    pub contact_id: EntityId,
    pub source: LeadSource,
    pub status: LeadStatus,
    /// 1-100 qualification score.
    pub score: i32,
    /// Member id as a string; "" means unassigned (see DESIGN.md).
    pub assigned_to: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    pub fn new(contact_id: EntityId, source: LeadSource) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            contact_id,
            source,
            status: LeadStatus::New,
            score: 50,
            assigned_to: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Deal - a sales opportunity moving through stages until closed.
/// `lost_reason` is meaningful only while `status = lost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: EntityId,
    pub pipeline_id: EntityId,
    pub stage_id: EntityId,
    pub contact_id: EntityId,
    pub company_id: Option<EntityId>,
    pub title: String,
    pub value: i64,
    pub currency: String,
    pub expected_close_date: Option<Timestamp>,
    pub priority: DealPriority,
    pub status: DealStatus,
    pub lost_reason: Option<String>,
    /// Member id as a string; "" means unassigned (see DESIGN.md).
    pub assigned_to: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Deal {
    pub fn new(
        pipeline_id: EntityId,
        stage_id: EntityId,
        contact_id: EntityId,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            pipeline_id,
            stage_id,
            contact_id,
            company_id: None,
            title: title.into(),
            value: 0,
            currency: String::from("KRW"),
            expected_close_date: None,
            priority: DealPriority::Medium,
            status: DealStatus::Open,
            lost_reason: None,
            assigned_to: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Activity - a call/email/meeting/task tied to a deal and/or a contact.
/// At least one of `deal_id`/`contact_id` should be set; the store does not
/// enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: EntityId,
    pub deal_id: Option<EntityId>,
    pub contact_id: Option<EntityId>,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub due_date: Option<Timestamp>,
    pub is_completed: bool,
    /// Member id as a string; "" means unassigned (see DESIGN.md).
    pub assigned_to: String,
    pub created_at: Timestamp,
}

impl Activity {
    pub fn new(kind: ActivityKind, title: impl Into<String>) -> Self {
        Self {
            id: crate::new_entity_id(),
            deal_id: None,
            contact_id: None,
            kind,
            title: title.into(),
            description: String::new(),
            due_date: None,
            is_completed: false,
            assigned_to: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Note - free text pinned to a deal, contact, or company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub deal_id: Option<EntityId>,
    pub contact_id: Option<EntityId>,
    pub company_id: Option<EntityId>,
    pub content: String,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    pub fn new(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            deal_id: None,
            contact_id: None,
            company_id: None,
            content: content.into(),
            created_by: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Tag - a named label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: crate::new_entity_id(),
            name: name.into(),
            color: color.into(),
            created_at: Utc::now(),
        }
    }
}

/// EntityTag - many-to-many link between a tag and a deal/contact/company.
/// Unique on `(entity_type, entity_id, tag_id)`, enforced at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTag {
    pub id: EntityId,
    pub entity_type: EntityKind,
    pub entity_id: EntityId,
    pub tag_id: EntityId,
}

impl EntityTag {
    pub fn new(entity_type: EntityKind, entity_id: EntityId, tag_id: EntityId) -> Self {
        Self {
            id: crate::new_entity_id(),
            entity_type,
            entity_id,
            tag_id,
        }
    }
}

/// Email - a logged or drafted message on a contact, optionally a deal.
/// `sent_at` is stamped exactly when `status` transitions to `Sent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: EntityId,
    pub deal_id: Option<EntityId>,
    pub contact_id: EntityId,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub status: EmailStatus,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Email {
    pub fn new(contact_id: EntityId, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: crate::new_entity_id(),
            deal_id: None,
            contact_id,
            from: String::new(),
            to: to.into(),
            subject: subject.into(),
            body: String::new(),
            status: EmailStatus::Draft,
            sent_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Attachment - file metadata only, no bytes are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: EntityId,
    pub entity_type: EntityKind,
    pub entity_id: EntityId,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub uploaded_by: String,
    pub created_at: Timestamp,
}

impl Attachment {
    pub fn new(entity_type: EntityKind, entity_id: EntityId, file_name: impl Into<String>) -> Self {
        Self {
            id: crate::new_entity_id(),
            entity_type,
            entity_id,
            file_name: file_name.into(),
            file_size: 0,
            file_type: String::new(),
            uploaded_by: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Member - a workspace user that deals, leads, and activities are assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub avatar: String,
    pub created_at: Timestamp,
}

impl Member {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: MemberRole) -> Self {
        Self {
            id: crate::new_entity_id(),
            name: name.into(),
            email: email.into(),
            role,
            avatar: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Report - a saved report definition. Running it is the reports layer's job;
/// `config` carries the free-form parameters the UI persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub description: String,
    pub config: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Report {
    pub fn new(name: impl Into<String>, kind: ReportKind) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            name: name.into(),
            kind,
            description: String::new(),
            config: serde_json::Value::Object(Default::default()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Template - an email template with `{{placeholder}}` substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: EntityId,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Template {
    pub fn new(name: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_entity_id(),
            name: name.into(),
            subject: subject.into(),
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// DealHistory - append-only audit row for one field change on a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealHistory {
    pub id: EntityId,
    pub deal_id: EntityId,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub changed_by: String,
    pub created_at: Timestamp,
}

/// Notification - generated from due-soon activities and closing deals.
/// Generation is idempotent per referenced entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub entity_type: EntityKind,
    pub entity_id: EntityId,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// AppSettings - the one non-array record, stored as a single object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub default_pipeline_id: Option<EntityId>,
    pub default_currency: String,
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_pipeline_id: None,
            default_currency: String::from("KRW"),
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_serializes_camel_case() {
        let deal = Deal::new(
            crate::new_entity_id(),
            crate::new_entity_id(),
            crate::new_entity_id(),
            "Renewal",
        );
        let json = serde_json::to_value(&deal).unwrap();
        assert!(json.get("pipelineId").is_some());
        assert!(json.get("expectedCloseDate").is_some());
        assert_eq!(json["status"], "open");
        assert_eq!(json["assignedTo"], "");
    }

    #[test]
    fn test_activity_kind_serializes_as_type() {
        let activity = Activity::new(ActivityKind::Call, "Intro call");
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "call");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_settings_default_currency() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_currency, "KRW");
        assert!(!settings.dark_mode);
        assert!(settings.default_pipeline_id.is_none());
    }
}
