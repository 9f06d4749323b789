//! Weekly activity summary
//!
//! The week starts on the local Sunday. Completed/pending count activities
//! due inside the current week; overdue counts every incomplete activity due
//! before today's local midnight, regardless of week boundaries.

use chrono::{DateTime, Datelike, Duration, Local, NaiveTime};
use funnel_core::Activity;
use funnel_store::Store;
use serde::{Deserialize, Serialize};

/// Counts for the dashboard's activity widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

/// Activity counts for the week containing `now`.
pub fn weekly_activity_summary(store: &Store, now: DateTime<Local>) -> ActivitySummary {
    let today = now.date_naive();
    let week_start = (today
        - Duration::days(today.weekday().num_days_from_sunday() as i64))
    .and_time(NaiveTime::MIN);
    let week_end = week_start + Duration::days(7);
    let today_start = today.and_time(NaiveTime::MIN);

    let mut summary = ActivitySummary::default();
    for activity in store.get_all::<Activity>() {
        let Some(due) = activity.due_date else {
            continue;
        };
        let due_local = due.with_timezone(&Local).naive_local();

        if due_local >= week_start && due_local < week_end {
            if activity.is_completed {
                summary.completed += 1;
            } else {
                summary.pending += 1;
            }
        }
        if !activity.is_completed && due_local < today_start {
            summary.overdue += 1;
        }
    }
    summary
}

/// [`weekly_activity_summary`] against the wall clock.
pub fn weekly_activity_summary_now(store: &Store) -> ActivitySummary {
    weekly_activity_summary(store, Local::now())
}
