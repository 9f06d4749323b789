//! Member service
//!
//! Deleting a member blanks `assigned_to` to the empty string on every deal,
//! activity, and lead that pointed at them. The empty-string sentinel (not a
//! null) is load-bearing compatibility behavior; see DESIGN.md.

use funnel_core::{Activity, Deal, EntityId, Lead, Member};
use funnel_store::Store;

/// Partial update for [`Member`].
#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<funnel_core::MemberRole>,
    pub avatar: Option<String>,
}

pub fn list(store: &Store) -> Vec<Member> {
    store.get_all()
}

pub fn get(store: &Store, id: EntityId) -> Option<Member> {
    store.get_by_id(id)
}

/// Display-name lookup for assignment columns.
pub fn name_of(store: &Store, id: EntityId) -> Option<String> {
    get(store, id).map(|m| m.name)
}

pub fn create(store: &Store, member: Member) -> Member {
    store.create(member)
}

pub fn update(store: &Store, id: EntityId, patch: MemberPatch) -> Option<Member> {
    store.update::<Member>(id, |m| {
        if let Some(name) = patch.name {
            m.name = name;
        }
        if let Some(email) = patch.email {
            m.email = email;
        }
        if let Some(role) = patch.role {
            m.role = role;
        }
        if let Some(avatar) = patch.avatar {
            m.avatar = avatar;
        }
    })
}

/// Delete a member and blank every `assigned_to` that referenced them.
pub fn delete(store: &Store, id: EntityId) {
    let member_ref = id.to_string();

    let deals: Vec<Deal> = store
        .get_all::<Deal>()
        .into_iter()
        .map(|mut d| {
            if d.assigned_to == member_ref {
                d.assigned_to = String::new();
            }
            d
        })
        .collect();
    store.save(&deals);

    let activities: Vec<Activity> = store
        .get_all::<Activity>()
        .into_iter()
        .map(|mut a| {
            if a.assigned_to == member_ref {
                a.assigned_to = String::new();
            }
            a
        })
        .collect();
    store.save(&activities);

    let leads: Vec<Lead> = store
        .get_all::<Lead>()
        .into_iter()
        .map(|mut l| {
            if l.assigned_to == member_ref {
                l.assigned_to = String::new();
            }
            l
        })
        .collect();
    store.save(&leads);

    store.remove::<Member>(id);
}
