//! Enum types for FUNNEL entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE ENUMS
// ============================================================================

/// Entity type discriminator for polymorphic references (tags, attachments,
/// notifications) and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Pipeline,
    Stage,
    Company,
    Contact,
    Lead,
    Deal,
    Activity,
    Note,
    Tag,
    Email,
    Attachment,
    Member,
    Report,
    Template,
    Notification,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Pipeline => "pipeline",
            EntityKind::Stage => "stage",
            EntityKind::Company => "company",
            EntityKind::Contact => "contact",
            EntityKind::Lead => "lead",
            EntityKind::Deal => "deal",
            EntityKind::Activity => "activity",
            EntityKind::Note => "note",
            EntityKind::Tag => "tag",
            EntityKind::Email => "email",
            EntityKind::Attachment => "attachment",
            EntityKind::Member => "member",
            EntityKind::Report => "report",
            EntityKind::Template => "template",
            EntityKind::Notification => "notification",
        };
        write!(f, "{}", s)
    }
}

/// Deal lifecycle status. Stage moves are only legal while `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Open,
    Won,
    Lost,
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealStatus::Open => write!(f, "open"),
            DealStatus::Won => write!(f, "won"),
            DealStatus::Lost => write!(f, "lost"),
        }
    }
}

/// Deal priority for list ordering and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealPriority {
    Low,
    Medium,
    High,
}

/// Lead qualification status. `Qualified` doubles as "converted to a deal";
/// conversion does not get a status of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Lost,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Qualified => write!(f, "qualified"),
            LeadStatus::Lost => write!(f, "lost"),
        }
    }
}

/// Acquisition channel a lead came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Website,
    Referral,
    Email,
    Social,
    Event,
    Other,
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::Email => "email",
            LeadSource::Social => "social",
            LeadSource::Event => "event",
            LeadSource::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Email delivery state. `sent_at` is stamped exactly when this becomes `Sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Draft,
    Scheduled,
    Sent,
}

/// Activity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Task,
}

/// Notification trigger type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    ActivityDue,
    DealClosing,
}

/// Workspace member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Manager,
    Rep,
}

/// Which aggregation a saved report definition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportKind {
    Pipeline,
    Forecast,
    MonthlySales,
    MemberPerformance,
    LeadSource,
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipeline" => Ok(ReportKind::Pipeline),
            "forecast" => Ok(ReportKind::Forecast),
            "monthlySales" => Ok(ReportKind::MonthlySales),
            "memberPerformance" => Ok(ReportKind::MemberPerformance),
            "leadSource" => Ok(ReportKind::LeadSource),
            other => Err(format!("unknown report kind: {}", other)),
        }
    }
}
