//! Demo-data bootstrap
//!
//! Populates an empty store with a small, internally consistent dataset.
//! Every key goes through `seed_if_empty`, so existing user data is never
//! touched, even when only some collections are populated.

use chrono::{Duration, Utc};
use funnel_core::{
    keys, Activity, ActivityKind, AppSettings, Company, Contact, Deal, DealPriority, Lead,
    LeadSource, LeadStatus, Member, MemberRole, Note, Pipeline, Stage, Tag, Template,
};
use funnel_store::Store;

/// Seed demo data on first run.
pub fn seed_demo_data(store: &Store) {
    let mut pipeline = Pipeline::new("Sales Pipeline");
    pipeline.description = String::from("Default sales process");
    pipeline.is_default = true;

    let stages = [
        ("Qualification", 1, 20, "#60a5fa"),
        ("Proposal", 2, 40, "#a78bfa"),
        ("Negotiation", 3, 60, "#f59e0b"),
        ("Closing", 4, 80, "#34d399"),
    ]
    .map(|(name, order, probability, color)| {
        let mut stage = Stage::new(pipeline.id, name, order, probability);
        stage.color = color.to_string();
        stage
    });

    let admin = Member::new("Han Seo-yeon", "seoyeon@funnel.io", MemberRole::Admin);
    let rep = Member::new("Park Ji-ho", "jiho@funnel.io", MemberRole::Rep);

    let mut acme = Company::new("ACME Industries");
    acme.industry = String::from("Manufacturing");
    acme.size = String::from("201-500");
    acme.revenue = 12_000_000_000;
    let mut nova = Company::new("Nova Labs");
    nova.industry = String::from("Software");
    nova.size = String::from("11-50");
    nova.revenue = 800_000_000;

    let mut kim = Contact::new("Kim Min-ji", "minji@acme.example");
    kim.company_id = Some(acme.id);
    kim.position = String::from("Procurement Lead");
    let mut lee = Contact::new("Lee Joon-ho", "joon@novalabs.example");
    lee.company_id = Some(nova.id);
    lee.position = String::from("CTO");
    let choi = Contact::new("Choi Da-eun", "daeun@example.com");

    let mut warm_lead = Lead::new(choi.id, LeadSource::Website);
    warm_lead.score = 70;
    warm_lead.assigned_to = rep.id.to_string();
    let mut cold_lead = Lead::new(lee.id, LeadSource::Event);
    cold_lead.status = LeadStatus::Contacted;
    cold_lead.score = 35;

    let mut big_deal = Deal::new(pipeline.id, stages[1].id, kim.id, "ACME annual contract");
    big_deal.company_id = Some(acme.id);
    big_deal.value = 45_000_000;
    big_deal.priority = DealPriority::High;
    big_deal.assigned_to = admin.id.to_string();
    big_deal.expected_close_date = Some(Utc::now() + Duration::days(21));

    let mut small_deal = Deal::new(pipeline.id, stages[0].id, lee.id, "Nova pilot");
    small_deal.company_id = Some(nova.id);
    small_deal.value = 5_000_000;
    small_deal.assigned_to = rep.id.to_string();

    let mut call = Activity::new(ActivityKind::Call, "Follow up on proposal");
    call.deal_id = Some(big_deal.id);
    call.contact_id = Some(kim.id);
    call.assigned_to = admin.id.to_string();
    call.due_date = Some(Utc::now() + Duration::days(2));

    let mut meeting = Activity::new(ActivityKind::Meeting, "Pilot kickoff");
    meeting.deal_id = Some(small_deal.id);
    meeting.contact_id = Some(lee.id);
    meeting.assigned_to = rep.id.to_string();
    meeting.due_date = Some(Utc::now() + Duration::days(7));

    let mut note = Note::new("Prefers quarterly invoicing.");
    note.company_id = Some(acme.id);
    note.created_by = admin.id.to_string();

    let welcome = Template::new(
        "Welcome",
        "Welcome aboard, {{name}}",
        "Hi {{name}},\n\nThanks for your time today. I'll follow up with {{next_step}}.\n",
    );

    store.seed_if_empty(&[pipeline.clone()]);
    store.seed_if_empty(&stages);
    store.seed_if_empty(&[acme, nova]);
    store.seed_if_empty(&[kim, lee, choi]);
    store.seed_if_empty(&[warm_lead, cold_lead]);
    store.seed_if_empty(&[big_deal, small_deal]);
    store.seed_if_empty(&[call, meeting]);
    store.seed_if_empty(&[note]);
    store.seed_if_empty(&[
        Tag::new("vip", "#f59e0b"),
        Tag::new("churn-risk", "#ef4444"),
    ]);
    store.seed_if_empty(&[admin, rep]);
    store.seed_if_empty(&[welcome]);

    if store.get_object::<AppSettings>(keys::SETTINGS).is_none() {
        store.save_object(
            keys::SETTINGS,
            &AppSettings {
                default_pipeline_id: Some(pipeline.id),
                ..Default::default()
            },
        );
    }
}
