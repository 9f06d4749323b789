//! Member performance and lead-source conversion

use funnel_core::{Activity, Deal, DealStatus, EntityId, Lead, LeadSource, LeadStatus, Member};
use funnel_store::Store;
use serde::{Deserialize, Serialize};

/// Per-member deal and activity totals. Win rate is `won_deals /
/// total_deals`, computed by the caller when it needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPerformance {
    pub member_id: EntityId,
    pub member_name: String,
    pub total_deals: usize,
    pub won_deals: usize,
    pub open_value: i64,
    pub activity_count: usize,
}

/// Per-source lead totals. `qualified` doubles as the conversion count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSourceStats {
    pub source: LeadSource,
    pub total: usize,
    pub qualified: usize,
}

/// Deal and activity totals for every member.
pub fn member_performance(store: &Store) -> Vec<MemberPerformance> {
    let deals = store.get_all::<Deal>();
    let activities = store.get_all::<Activity>();

    store
        .get_all::<Member>()
        .into_iter()
        .map(|member| {
            let member_ref = member.id.to_string();
            let mine: Vec<&Deal> = deals.iter().filter(|d| d.assigned_to == member_ref).collect();
            MemberPerformance {
                member_id: member.id,
                member_name: member.name,
                total_deals: mine.len(),
                won_deals: mine.iter().filter(|d| d.status == DealStatus::Won).count(),
                open_value: mine
                    .iter()
                    .filter(|d| d.status == DealStatus::Open)
                    .map(|d| d.value)
                    .sum(),
                activity_count: activities
                    .iter()
                    .filter(|a| a.assigned_to == member_ref)
                    .count(),
            }
        })
        .collect()
}

/// Lead totals per source, in first-seen order.
pub fn lead_source_stats(store: &Store) -> Vec<LeadSourceStats> {
    let mut stats: Vec<LeadSourceStats> = Vec::new();
    for lead in store.get_all::<Lead>() {
        let slot = match stats.iter().position(|s| s.source == lead.source) {
            Some(slot) => slot,
            None => {
                stats.push(LeadSourceStats {
                    source: lead.source,
                    total: 0,
                    qualified: 0,
                });
                stats.len() - 1
            }
        };
        stats[slot].total += 1;
        if lead.status == LeadStatus::Qualified {
            stats[slot].qualified += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::{ActivityKind, MemberRole, new_entity_id};

    #[test]
    fn test_member_performance_counts_only_their_records() {
        let store = Store::in_memory();
        let member = store.create(Member::new("Han", "han@funnel.io", MemberRole::Rep));
        let member_ref = member.id.to_string();

        let mut won = Deal::new(new_entity_id(), new_entity_id(), new_entity_id(), "Won");
        won.assigned_to = member_ref.clone();
        won.status = DealStatus::Won;
        won.value = 9_000;
        store.create(won);

        let mut open = Deal::new(new_entity_id(), new_entity_id(), new_entity_id(), "Open");
        open.assigned_to = member_ref.clone();
        open.value = 4_000;
        store.create(open);

        store.create(Deal::new(new_entity_id(), new_entity_id(), new_entity_id(), "Nobody's"));

        let mut activity = Activity::new(ActivityKind::Call, "Theirs");
        activity.assigned_to = member_ref;
        store.create(activity);

        let perf = member_performance(&store);
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].total_deals, 2);
        assert_eq!(perf[0].won_deals, 1);
        assert_eq!(perf[0].open_value, 4_000);
        assert_eq!(perf[0].activity_count, 1);
    }

    #[test]
    fn test_lead_source_stats_count_qualified() {
        let store = Store::in_memory();

        let mut a = Lead::new(new_entity_id(), LeadSource::Website);
        a.status = LeadStatus::Qualified;
        store.create(a);
        store.create(Lead::new(new_entity_id(), LeadSource::Website));
        store.create(Lead::new(new_entity_id(), LeadSource::Referral));

        let stats = lead_source_stats(&store);
        let website = stats.iter().find(|s| s.source == LeadSource::Website).unwrap();
        assert_eq!(website.total, 2);
        assert_eq!(website.qualified, 1);
        let referral = stats.iter().find(|s| s.source == LeadSource::Referral).unwrap();
        assert_eq!(referral.total, 1);
        assert_eq!(referral.qualified, 0);
    }
}
