//! Company service
//!
//! Deleting a company is a mixed cascade: dependent contacts and deals keep
//! living with their `company_id` nulled, while notes and attachments scoped
//! to the company go away with it.

use funnel_core::{
    Attachment, Company, CompanyFilter, Contact, Deal, EntityId, EntityKind, Note,
};
use funnel_store::Store;

/// Partial update for [`Company`].
#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub size: Option<String>,
    pub revenue: Option<i64>,
}

/// A company with dependent-record counts for list/detail views.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetail {
    pub company: Company,
    pub contact_count: usize,
    pub deal_count: usize,
    pub open_deal_value: i64,
}

pub fn list(store: &Store, filter: &CompanyFilter) -> Vec<Company> {
    store
        .get_all::<Company>()
        .into_iter()
        .filter(|c| filter.matches(c))
        .collect()
}

pub fn get(store: &Store, id: EntityId) -> Option<Company> {
    store.get_by_id(id)
}

pub fn get_detail(store: &Store, id: EntityId) -> Option<CompanyDetail> {
    let company = get(store, id)?;
    let contact_count = store
        .get_all::<Contact>()
        .iter()
        .filter(|c| c.company_id == Some(id))
        .count();
    let deals: Vec<Deal> = store
        .get_all::<Deal>()
        .into_iter()
        .filter(|d| d.company_id == Some(id))
        .collect();
    let open_deal_value = deals
        .iter()
        .filter(|d| d.status == funnel_core::DealStatus::Open)
        .map(|d| d.value)
        .sum();

    Some(CompanyDetail {
        company,
        contact_count,
        deal_count: deals.len(),
        open_deal_value,
    })
}

pub fn create(store: &Store, company: Company) -> Company {
    store.create(company)
}

pub fn update(store: &Store, id: EntityId, patch: CompanyPatch) -> Option<Company> {
    store.update::<Company>(id, |c| {
        if let Some(name) = patch.name {
            c.name = name;
        }
        if let Some(industry) = patch.industry {
            c.industry = industry;
        }
        if let Some(website) = patch.website {
            c.website = website;
        }
        if let Some(phone) = patch.phone {
            c.phone = phone;
        }
        if let Some(address) = patch.address {
            c.address = address;
        }
        if let Some(size) = patch.size {
            c.size = size;
        }
        if let Some(revenue) = patch.revenue {
            c.revenue = revenue;
        }
    })
}

/// Delete a company: nullify `company_id` on its contacts and deals, delete
/// its notes and attachment metadata, then the company itself.
pub fn delete(store: &Store, id: EntityId) {
    let contacts: Vec<Contact> = store
        .get_all::<Contact>()
        .into_iter()
        .map(|mut c| {
            if c.company_id == Some(id) {
                c.company_id = None;
            }
            c
        })
        .collect();
    store.save(&contacts);

    let deals: Vec<Deal> = store
        .get_all::<Deal>()
        .into_iter()
        .map(|mut d| {
            if d.company_id == Some(id) {
                d.company_id = None;
            }
            d
        })
        .collect();
    store.save(&deals);

    let notes: Vec<Note> = store
        .get_all::<Note>()
        .into_iter()
        .filter(|n| n.company_id != Some(id))
        .collect();
    store.save(&notes);

    let attachments: Vec<Attachment> = store
        .get_all::<Attachment>()
        .into_iter()
        .filter(|a| !(a.entity_type == EntityKind::Company && a.entity_id == id))
        .collect();
    store.save(&attachments);

    store.remove::<Company>(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::new_entity_id;

    #[test]
    fn test_delete_nullifies_contacts_and_deals() {
        let store = Store::in_memory();
        let company = create(&store, Company::new("ACME"));

        let mut contact = Contact::new("Kim", "kim@acme.io");
        contact.company_id = Some(company.id);
        let contact = store.create(contact);

        let mut deal = Deal::new(new_entity_id(), new_entity_id(), contact.id, "ACME deal");
        deal.company_id = Some(company.id);
        let deal = store.create(deal);

        delete(&store, company.id);

        assert_eq!(store.get_by_id::<Contact>(contact.id).unwrap().company_id, None);
        assert_eq!(store.get_by_id::<Deal>(deal.id).unwrap().company_id, None);
        assert!(get(&store, company.id).is_none());
    }

    #[test]
    fn test_delete_removes_scoped_notes_and_attachments() {
        let store = Store::in_memory();
        let company = create(&store, Company::new("ACME"));

        let mut note = Note::new("Renewal context");
        note.company_id = Some(company.id);
        store.create(note);
        store.create(Attachment::new(EntityKind::Company, company.id, "contract.pdf"));

        let unrelated = store.create(Note::new("Unrelated"));

        delete(&store, company.id);

        let notes = store.get_all::<Note>();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, unrelated.id);
        assert!(store.get_all::<Attachment>().is_empty());
    }

    #[test]
    fn test_detail_counts_dependents() {
        let store = Store::in_memory();
        let company = create(&store, Company::new("ACME"));
        let mut contact = Contact::new("Kim", "kim@acme.io");
        contact.company_id = Some(company.id);
        let contact = store.create(contact);

        let mut deal = Deal::new(new_entity_id(), new_entity_id(), contact.id, "One");
        deal.company_id = Some(company.id);
        deal.value = 700;
        store.create(deal);

        let detail = get_detail(&store, company.id).unwrap();
        assert_eq!(detail.contact_count, 1);
        assert_eq!(detail.deal_count, 1);
        assert_eq!(detail.open_deal_value, 700);
    }
}
