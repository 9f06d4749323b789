//! Aggregations over realistic datasets

use chrono::Local;
use funnel_core::DealStatus;
use funnel_reports::{
    dashboard_snapshot, forecast_by_stage, monthly_sales_now, pipeline_value_by_stage,
};
use funnel_services::deals;
use funnel_test_utils::{open_deal, pipeline_with_stages, seeded_store, fresh_store};

#[test]
fn test_weighted_pipeline_from_spec_worked_example() {
    let store = fresh_store();
    let (pipeline, stages) = pipeline_with_stages(&store, 3);

    // Overwrite the fixture's evenly-spread probabilities.
    for (stage, probability) in stages.iter().zip([20, 50, 80]) {
        funnel_services::stages::update(
            &store,
            stage.id,
            funnel_services::stages::StagePatch {
                probability: Some(probability),
                ..Default::default()
            },
        )
        .unwrap();
    }

    open_deal(&store, &pipeline, &stages[0], 1_000);
    open_deal(&store, &pipeline, &stages[1], 2_000);
    open_deal(&store, &pipeline, &stages[2], 500);

    let weighted: Vec<i64> = pipeline_value_by_stage(&store, None)
        .into_iter()
        .map(|v| v.weighted_value)
        .collect();
    assert_eq!(weighted, vec![200, 1_000, 400]);
}

#[test]
fn test_closing_a_deal_moves_value_into_monthly_sales() {
    let store = fresh_store();
    let (pipeline, stages) = pipeline_with_stages(&store, 2);
    let deal = open_deal(&store, &pipeline, &stages[0], 3_000);

    deals::close(&store, deal.id, DealStatus::Won, None).unwrap();

    let buckets = monthly_sales_now(&store);
    assert_eq!(buckets.last().unwrap().won_value, 3_000);

    // The closed deal no longer contributes to the open forecast.
    assert!(forecast_by_stage(&store).is_empty());
}

#[test]
fn test_dashboard_over_seeded_demo_data() {
    let store = seeded_store();
    let snapshot = dashboard_snapshot(&store, Local::now());

    assert_eq!(snapshot.open_deal_count, 2);
    assert!(snapshot.open_deal_value > 0);
    assert!(!snapshot.weighted_pipeline.is_empty());
    assert_eq!(snapshot.recent_changes.len(), 2);
    assert!(snapshot.recent_changes.iter().all(|c| c.stage_name.is_some()));
}
