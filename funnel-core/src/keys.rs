//! Storage-key registry
//!
//! Every collection lives under one string key holding a JSON array; the
//! settings key holds a single JSON object. Backup/restore iterates this
//! registry, so a new entity type is not persisted until its key is added
//! here.

/// Pipelines collection.
pub const PIPELINES: &str = "sp_pipelines";
/// Stages collection.
pub const STAGES: &str = "sp_stages";
/// Companies collection.
pub const COMPANIES: &str = "sp_companies";
/// Contacts collection.
pub const CONTACTS: &str = "sp_contacts";
/// Leads collection.
pub const LEADS: &str = "sp_leads";
/// Deals collection.
pub const DEALS: &str = "sp_deals";
/// Activities collection.
pub const ACTIVITIES: &str = "sp_activities";
/// Notes collection.
pub const NOTES: &str = "sp_notes";
/// Tags collection.
pub const TAGS: &str = "sp_tags";
/// Tag-to-entity links.
pub const ENTITY_TAGS: &str = "sp_entity_tags";
/// Emails collection.
pub const EMAILS: &str = "sp_emails";
/// Attachment metadata collection.
pub const ATTACHMENTS: &str = "sp_attachments";
/// Members collection.
pub const MEMBERS: &str = "sp_members";
/// Saved report definitions.
pub const REPORTS: &str = "sp_reports";
/// Deal audit log.
pub const DEAL_HISTORY: &str = "sp_deal_history";
/// Generated notifications.
pub const NOTIFICATIONS: &str = "sp_notifications";
/// Email templates.
pub const TEMPLATES: &str = "sp_templates";
/// App settings singleton (object-valued, not an array).
pub const SETTINGS: &str = "sp_settings";

/// All array-valued keys, in export order.
pub const ARRAY_KEYS: [&str; 17] = [
    PIPELINES,
    STAGES,
    COMPANIES,
    CONTACTS,
    LEADS,
    DEALS,
    ACTIVITIES,
    NOTES,
    TAGS,
    ENTITY_TAGS,
    EMAILS,
    ATTACHMENTS,
    MEMBERS,
    REPORTS,
    DEAL_HISTORY,
    NOTIFICATIONS,
    TEMPLATES,
];

/// Whether `key` is a known array-valued storage key.
pub fn is_array_key(key: &str) -> bool {
    ARRAY_KEYS.contains(&key)
}
