//! Email service
//!
//! Emails are metadata rows, not actual delivery. `send` and `schedule` are
//! loud state transitions; `sent_at` is stamped exactly once, when the
//! status first becomes `Sent`.

use chrono::Utc;
use funnel_core::{CrmError, CrmResult, Email, EmailFilter, EmailStatus, EntityId, EntityKind};
use funnel_store::Store;

/// Partial update for [`Email`]. Status moves through `send`/`schedule`.
#[derive(Debug, Clone, Default)]
pub struct EmailPatch {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub to: Option<String>,
}

pub fn list(store: &Store, filter: &EmailFilter) -> Vec<Email> {
    store
        .get_all::<Email>()
        .into_iter()
        .filter(|e| filter.matches(e))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Email> {
    store.get_by_id(id)
}

pub fn create(store: &Store, email: Email) -> Email {
    store.create(email)
}

pub fn update(store: &Store, id: EntityId, patch: EmailPatch) -> Option<Email> {
    store.update::<Email>(id, |e| {
        if let Some(subject) = patch.subject {
            e.subject = subject;
        }
        if let Some(body) = patch.body {
            e.body = body;
        }
        if let Some(to) = patch.to {
            e.to = to;
        }
    })
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Email>(id);
}

/// Mark an email as sent and stamp `sent_at`. Loud when the email does not
/// exist or already went out.
pub fn send(store: &Store, id: EntityId) -> CrmResult<Email> {
    let email = get(store, id).ok_or(CrmError::not_found(EntityKind::Email, id))?;
    if email.status == EmailStatus::Sent {
        return Err(CrmError::validation("status", "email was already sent"));
    }
    store
        .update::<Email>(id, |e| {
            e.status = EmailStatus::Sent;
            e.sent_at = Some(Utc::now());
        })
        .ok_or(CrmError::not_found(EntityKind::Email, id))
}

/// Move a draft to the scheduled state. Loud when missing or already sent.
pub fn schedule(store: &Store, id: EntityId) -> CrmResult<Email> {
    let email = get(store, id).ok_or(CrmError::not_found(EntityKind::Email, id))?;
    if email.status == EmailStatus::Sent {
        return Err(CrmError::validation("status", "sent email cannot be scheduled"));
    }
    store
        .update::<Email>(id, |e| {
            e.status = EmailStatus::Scheduled;
        })
        .ok_or(CrmError::not_found(EntityKind::Email, id))
}
