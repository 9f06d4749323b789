//! Monthly sales statistics
//!
//! A fixed trailing 12-month window ending at the current month. Won deals
//! contribute their value, lost deals contribute a count, both bucketed by
//! `updated_at` in local calendar time. Older deals fall off silently.

use chrono::{DateTime, Datelike, Local};
use funnel_core::{Deal, DealStatus};
use funnel_store::Store;
use serde::{Deserialize, Serialize};

/// One `YYYY-MM` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: String,
    pub won_value: i64,
    pub lost_count: usize,
}

/// Step `months` back from `(year, month)`.
fn shift_month(year: i32, month: u32, months: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - months as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// Trailing 12 months of won value and lost count, oldest bucket first.
pub fn monthly_sales(store: &Store, now: DateTime<Local>) -> Vec<MonthlySales> {
    let months: Vec<(i32, u32)> = (0..12u32)
        .rev()
        .map(|back| shift_month(now.year(), now.month(), back))
        .collect();

    let mut buckets: Vec<MonthlySales> = months
        .iter()
        .map(|(year, month)| MonthlySales {
            month: format!("{:04}-{:02}", year, month),
            won_value: 0,
            lost_count: 0,
        })
        .collect();

    for deal in store.get_all::<Deal>() {
        let local = deal.updated_at.with_timezone(&Local);
        let slot = months
            .iter()
            .position(|&(year, month)| local.year() == year && local.month() == month);
        let Some(slot) = slot else {
            continue;
        };
        match deal.status {
            DealStatus::Won => buckets[slot].won_value += deal.value,
            DealStatus::Lost => buckets[slot].lost_count += 1,
            DealStatus::Open => {}
        }
    }

    buckets
}

/// [`monthly_sales`] against the wall clock.
pub fn monthly_sales_now(store: &Store) -> Vec<MonthlySales> {
    monthly_sales(store, Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use funnel_core::new_entity_id;

    fn closed_deal(status: DealStatus, value: i64, updated_at: DateTime<Utc>) -> Deal {
        let mut deal = Deal::new(new_entity_id(), new_entity_id(), new_entity_id(), "d");
        deal.value = value;
        deal.status = status;
        deal.updated_at = updated_at;
        deal
    }

    #[test]
    fn test_shift_month_crosses_year_boundary() {
        assert_eq!(shift_month(2026, 2, 3), (2025, 11));
        assert_eq!(shift_month(2026, 8, 0), (2026, 8));
        assert_eq!(shift_month(2026, 1, 12), (2025, 1));
    }

    #[test]
    fn test_window_is_twelve_buckets_ending_now() {
        let store = Store::in_memory();
        let now = Local::now();
        let buckets = monthly_sales(&store, now);
        assert_eq!(buckets.len(), 12);
        assert_eq!(
            buckets[11].month,
            format!("{:04}-{:02}", now.year(), now.month())
        );
    }

    #[test]
    fn test_current_month_accumulates_wins_and_losses() {
        let store = Store::in_memory();
        let now_utc = Utc::now();

        let deals = vec![
            closed_deal(DealStatus::Won, 3_000, now_utc),
            closed_deal(DealStatus::Won, 2_000, now_utc),
            closed_deal(DealStatus::Lost, 9_999, now_utc),
            closed_deal(DealStatus::Open, 500, now_utc),
        ];
        store.save(&deals);

        let buckets = monthly_sales(&store, now_utc.with_timezone(&Local));
        let current = buckets.last().unwrap();
        assert_eq!(current.won_value, 5_000);
        assert_eq!(current.lost_count, 1);
    }

    #[test]
    fn test_deals_outside_window_are_excluded() {
        let store = Store::in_memory();
        let now_utc = Utc::now();
        let ancient = now_utc - Duration::days(400);

        store.save(&[closed_deal(DealStatus::Won, 7_000, ancient)]);

        let buckets = monthly_sales(&store, now_utc.with_timezone(&Local));
        assert!(buckets.iter().all(|b| b.won_value == 0));
    }
}
