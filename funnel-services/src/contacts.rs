//! Contact service
//!
//! The contact delete cascade is the widest destructive one: every record
//! that exists only in relation to the contact (leads, activities, notes,
//! emails, attachments, tag links) goes with it. Deals deliberately survive.

use funnel_core::{
    Activity, Attachment, Company, Contact, ContactFilter, Email, EntityId, EntityKind,
    EntityTag, Lead, Note, Tag,
};
use funnel_store::Store;

/// Partial update for [`Contact`].
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub company_id: Option<EntityId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub avatar: Option<String>,
}

/// A contact joined with its company name and tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetail {
    pub contact: Contact,
    pub company_name: Option<String>,
    pub tags: Vec<Tag>,
}

pub fn list(store: &Store, filter: &ContactFilter) -> Vec<Contact> {
    store
        .get_all::<Contact>()
        .into_iter()
        .filter(|c| filter.matches(c))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Contact> {
    store.get_by_id(id)
}

pub fn get_detail(store: &Store, id: EntityId) -> Option<ContactDetail> {
    let contact = get(store, id)?;
    let company_name = contact
        .company_id
        .and_then(|cid| store.get_by_id::<Company>(cid))
        .map(|c| c.name);
    let tag_ids: Vec<EntityId> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| et.entity_type == EntityKind::Contact && et.entity_id == id)
        .map(|et| et.tag_id)
        .collect();
    let tags = store
        .get_all::<Tag>()
        .into_iter()
        .filter(|t| tag_ids.contains(&t.id))
        .collect();

    Some(ContactDetail {
        contact,
        company_name,
        tags,
    })
}

pub fn create(store: &Store, contact: Contact) -> Contact {
    store.create(contact)
}

pub fn update(store: &Store, id: EntityId, patch: ContactPatch) -> Option<Contact> {
    store.update::<Contact>(id, |c| {
        if let Some(company_id) = patch.company_id {
            c.company_id = Some(company_id);
        }
        if let Some(name) = patch.name {
            c.name = name;
        }
        if let Some(email) = patch.email {
            c.email = email;
        }
        if let Some(phone) = patch.phone {
            c.phone = phone;
        }
        if let Some(position) = patch.position {
            c.position = position;
        }
        if let Some(avatar) = patch.avatar {
            c.avatar = avatar;
        }
    })
}

/// Delete a contact and every record scoped to it: tag links, leads,
/// activities, notes, emails, and attachment metadata.
pub fn delete(store: &Store, id: EntityId) {
    let links: Vec<EntityTag> = store
        .get_all::<EntityTag>()
        .into_iter()
        .filter(|et| !(et.entity_type == EntityKind::Contact && et.entity_id == id))
        .collect();
    store.save(&links);

    let leads: Vec<Lead> = store
        .get_all::<Lead>()
        .into_iter()
        .filter(|l| l.contact_id != id)
        .collect();
    store.save(&leads);

    let activities: Vec<Activity> = store
        .get_all::<Activity>()
        .into_iter()
        .filter(|a| a.contact_id != Some(id))
        .collect();
    store.save(&activities);

    let notes: Vec<Note> = store
        .get_all::<Note>()
        .into_iter()
        .filter(|n| n.contact_id != Some(id))
        .collect();
    store.save(&notes);

    let emails: Vec<Email> = store
        .get_all::<Email>()
        .into_iter()
        .filter(|e| e.contact_id != id)
        .collect();
    store.save(&emails);

    let attachments: Vec<Attachment> = store
        .get_all::<Attachment>()
        .into_iter()
        .filter(|a| !(a.entity_type == EntityKind::Contact && a.entity_id == id))
        .collect();
    store.save(&attachments);

    store.remove::<Contact>(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::{ActivityKind, LeadSource};

    #[test]
    fn test_delete_cascades_across_all_scoped_collections() {
        let store = Store::in_memory();
        let contact = create(&store, Contact::new("Kim", "kim@acme.io"));

        store.create(Lead::new(contact.id, LeadSource::Website));

        let mut activity = Activity::new(ActivityKind::Call, "Intro");
        activity.contact_id = Some(contact.id);
        store.create(activity);

        let mut note = Note::new("Met at the expo");
        note.contact_id = Some(contact.id);
        store.create(note);

        store.create(Email::new(contact.id, "kim@acme.io", "Hello"));
        store.create(Attachment::new(EntityKind::Contact, contact.id, "card.png"));

        let tag = store.create(Tag::new("vip", "#f59e0b"));
        store.create(EntityTag::new(EntityKind::Contact, contact.id, tag.id));

        delete(&store, contact.id);

        assert!(get(&store, contact.id).is_none());
        assert!(store.get_all::<Lead>().is_empty());
        assert!(store.get_all::<Activity>().is_empty());
        assert!(store.get_all::<Note>().is_empty());
        assert!(store.get_all::<Email>().is_empty());
        assert!(store.get_all::<Attachment>().is_empty());
        assert!(store.get_all::<EntityTag>().is_empty());
        // The tag itself survives; only the link went away.
        assert_eq!(store.get_all::<Tag>().len(), 1);
    }

    #[test]
    fn test_search_filter_matches_name_or_email() {
        let store = Store::in_memory();
        create(&store, Contact::new("Kim Minji", "minji@acme.io"));
        create(&store, Contact::new("Lee Joon", "joon@other.co"));

        let by_name = list(
            &store,
            &ContactFilter {
                search: Some("minji".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_name.len(), 1);

        let by_email = list(
            &store,
            &ContactFilter {
                search: Some("OTHER.CO".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Lee Joon");
    }

    #[test]
    fn test_detail_resolves_company_name() {
        let store = Store::in_memory();
        let company = store.create(Company::new("ACME"));
        let mut contact = Contact::new("Kim", "kim@acme.io");
        contact.company_id = Some(company.id);
        let contact = create(&store, contact);

        let detail = get_detail(&store, contact.id).unwrap();
        assert_eq!(detail.company_name.as_deref(), Some("ACME"));
    }
}
