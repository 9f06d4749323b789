//! FUNNEL Reports - Aggregation Layer
//!
//! Pure, stateless functions that fold whole collections into derived views.
//! Nothing here mutates data. Date bucketing uses local calendar time, and
//! every date-dependent function takes an explicit `now` so callers (and
//! tests) control the clock; `*_now` wrappers exist for the common case.

pub mod activity;
pub mod dashboard;
pub mod performance;
pub mod pipeline;
pub mod sales;

pub use activity::{weekly_activity_summary, weekly_activity_summary_now, ActivitySummary};
pub use dashboard::{
    dashboard_snapshot, dashboard_snapshot_now, recent_deal_changes, DashboardSnapshot,
    RecentDealChange,
};
pub use performance::{
    lead_source_stats, member_performance, LeadSourceStats, MemberPerformance,
};
pub use pipeline::{forecast_by_stage, pipeline_value_by_stage, StageValue};
pub use sales::{monthly_sales, monthly_sales_now, MonthlySales};
