//! Dashboard load orchestration and derived view tests.

mod common;

use std::sync::Arc;

use sales_analytics::config::{LOAD_FAILED_MESSAGE, PIE_COMPARISON_NOTICE};
use sales_analytics::source::fetch_years;
use sales_analytics::views::compute;
use sales_analytics::{
    ChartData, ChartKind, ComparisonSpec, Dashboard, DashboardParams, FilterCriteria,
    LoadOutcome, LoadState, MockSource, Month, PeriodSelector, SalesAnalytics, SalesError,
};

// ---------------------------------------------------------------------------
// DashboardParams
// ---------------------------------------------------------------------------

#[test]
fn required_years_without_comparison() {
    assert_eq!(DashboardParams::for_year(2023).required_years(), vec![2023]);
}

#[test]
fn required_years_include_comparison_periods() {
    let params = DashboardParams::for_year(2024)
        .with_comparison(ComparisonSpec::default().enabled(true));
    assert_eq!(params.required_years(), vec![2022, 2024]);

    let disabled = DashboardParams::for_year(2024).with_comparison(ComparisonSpec::default());
    assert_eq!(disabled.required_years(), vec![2024]);
}

// ---------------------------------------------------------------------------
// compute
// ---------------------------------------------------------------------------

#[test]
fn compute_is_idempotent() {
    let pool = common::sample_pool();
    let params = DashboardParams::for_year(2023)
        .with_filters(FilterCriteria::new(15000.0, "North", "All"))
        .with_comparison(ComparisonSpec::default().enabled(true));
    assert_eq!(compute(&pool, &params), compute(&pool, &params));
}

#[test]
fn compute_for_default_year() {
    let pool = common::sample_pool();
    let views = compute(&pool, &DashboardParams::default());

    assert_eq!(views.year_record_count, 12);
    assert_eq!(views.filtered.len(), 12);
    assert_eq!(views.summary.total_sales, 297000.0);
    assert_eq!(views.by_region.len(), 4);
    assert_eq!(views.by_product.len(), 3);
    assert!(views.comparison.is_none());
    assert_eq!(views.forecast.len(), 3);
    assert_eq!(views.chart.kind(), ChartKind::Bar);
    assert!(views.notice(&DashboardParams::default()).is_none());
}

#[test]
fn rollups_ignore_filters_but_summary_does_not() {
    let pool = common::sample_pool();
    let params =
        DashboardParams::for_year(2024).with_filters(FilterCriteria::default().with_region("North"));
    let views = compute(&pool, &params);

    assert_eq!(views.filtered.len(), 3);
    assert_eq!(views.summary.record_count, 3);
    let region_total: f64 = views.by_region.iter().map(|r| r.sales).sum();
    assert_eq!(region_total, 297000.0);
}

#[test]
fn empty_filter_result_has_notice() {
    let pool = common::sample_pool();
    let params = DashboardParams::for_year(2024)
        .with_filters(FilterCriteria::default().with_threshold(1_000_000.0));
    let views = compute(&pool, &params);

    assert!(views.is_empty());
    assert!(views.chart.is_empty());
    assert!(views.overview.is_none());
    assert!(views.forecast.is_empty());
    assert_eq!(
        views.notice(&params).as_deref(),
        Some("No data available for the selected filters. Try adjusting your criteria.")
    );
}

#[test]
fn pie_chart_slices_by_month() {
    let pool = common::small_pool();
    let params = DashboardParams::for_year(2024).with_chart(ChartKind::Pie);
    let views = compute(&pool, &params);

    match views.chart {
        ChartData::Pie { slices } => {
            let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["Jan", "Feb", "Mar"]);
            assert_eq!(slices[2].value, 30000.0);
        }
        other => panic!("expected pie chart, got {:?}", other),
    }
}

#[test]
fn pie_comparison_falls_back_to_bar() {
    let pool = common::sample_pool();
    let params = DashboardParams::for_year(2024)
        .with_chart(ChartKind::Pie)
        .with_comparison(ComparisonSpec::default().enabled(true));
    let views = compute(&pool, &params);

    assert_eq!(views.chart.kind(), ChartKind::Bar);
    assert_eq!(views.chart.notice(), Some(PIE_COMPARISON_NOTICE));
    assert_eq!(views.notice(&params).as_deref(), Some(PIE_COMPARISON_NOTICE));

    match &views.chart {
        ChartData::Series { points, .. } => {
            assert_eq!(points.len(), 2);
            assert_eq!(points[0].label, "Jun 2024");
            assert_eq!(points[0].sales, 25000.0);
            assert_eq!(points[0].records, Some(1));
            assert_eq!(points[1].label, "Jul 2022");
        }
        other => panic!("expected series chart, got {:?}", other),
    }
}

#[test]
fn line_comparison_keeps_kind() {
    let pool = common::sample_pool();
    let params = DashboardParams::for_year(2024)
        .with_chart(ChartKind::Line)
        .with_comparison(ComparisonSpec::default().enabled(true));
    let views = compute(&pool, &params);
    assert_eq!(views.chart.kind(), ChartKind::Line);
    assert!(views.chart.notice().is_none());
}

#[test]
fn missing_comparison_period_notice_takes_precedence() {
    let pool = common::sample_pool();
    let spec = ComparisonSpec::between(
        PeriodSelector::new(2024, Month::Jun),
        PeriodSelector::new(2021, Month::Jul),
    );
    let params = DashboardParams::for_year(2024)
        .with_chart(ChartKind::Pie)
        .with_comparison(spec);
    let views = compute(&pool, &params);
    assert_eq!(
        views.notice(&params).as_deref(),
        Some("No data available for Jul 2021 with the current filters.")
    );
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn new_dashboard_is_idle_without_views() {
    let dash = Dashboard::new(DashboardParams::default());
    assert_eq!(dash.state(), &LoadState::Idle);
    assert!(dash.views().is_none());
    assert!(dash.pool().is_empty());
}

#[test]
fn load_fetches_required_years() {
    let source = MockSource::instant();
    let mut dash = Dashboard::new(DashboardParams::for_year(2023));
    assert_eq!(dash.load(&source), LoadOutcome::Applied);
    assert_eq!(dash.state(), &LoadState::Ready);
    assert_eq!(dash.loaded_years(), vec![2023]);
    assert_eq!(dash.pool().len(), 12);
    assert!(dash.views().is_some());
}

#[test]
fn derived_only_changes_do_not_refetch() {
    let source = MockSource::instant();
    let mut dash = Dashboard::new(DashboardParams::for_year(2024));
    dash.load(&source);

    let params = DashboardParams::for_year(2024)
        .with_filters(FilterCriteria::new(25000.0, "All", "Clothing"))
        .with_chart(ChartKind::Line);
    assert!(dash.set_params(params).is_none());
    assert_eq!(dash.state(), &LoadState::Ready);

    let views = dash.views().unwrap();
    assert!(views
        .filtered
        .iter()
        .all(|r| r.product == "Clothing" && r.sales >= 25000.0));
}

#[test]
fn year_change_issues_ticket() {
    let source = MockSource::instant();
    let mut dash = Dashboard::new(DashboardParams::for_year(2024));
    dash.load(&source);

    let ticket = dash.set_params(DashboardParams::for_year(2022)).unwrap();
    assert_eq!(ticket.years, vec![2022]);
    assert_eq!(dash.state(), &LoadState::Loading { seq: ticket.seq });
    assert!(dash.views().is_none());
}

#[test]
fn enabling_comparison_on_unloaded_year_fetches() {
    let source = MockSource::instant();
    let mut dash = Dashboard::new(DashboardParams::for_year(2024));
    dash.load(&source);

    let params =
        DashboardParams::for_year(2024).with_comparison(ComparisonSpec::default().enabled(true));
    assert_eq!(dash.update(&source, params), Some(LoadOutcome::Applied));
    assert_eq!(dash.loaded_years(), vec![2022, 2024]);

    let views = dash.views().unwrap();
    let outcome = views.comparison.unwrap();
    assert_eq!(outcome.result.period2_total, 21000.0);
}

#[test]
fn stale_completion_is_discarded() {
    let mut dash = Dashboard::new(DashboardParams::for_year(2022));
    let first = dash.begin_load();
    let second = dash.set_params(DashboardParams::for_year(2023)).unwrap();
    assert!(second.seq > first.seq);

    let newer = fetch_years(&MockSource::instant(), &second.years);
    assert_eq!(dash.complete_load(&second, newer), LoadOutcome::Applied);

    // The older request resolves last and must not overwrite the pool.
    let older = fetch_years(&MockSource::instant(), &first.years);
    assert_eq!(dash.complete_load(&first, older), LoadOutcome::Stale);

    assert_eq!(dash.loaded_years(), vec![2023]);
    assert!(dash.pool().iter().all(|r| r.year == 2023));
    assert_eq!(dash.state(), &LoadState::Ready);
}

#[test]
fn stale_failure_does_not_fail_dashboard() {
    let mut dash = Dashboard::new(DashboardParams::for_year(2022));
    let first = dash.begin_load();
    let second = dash.begin_load();

    let outcome = dash.complete_load(&first, Err(SalesError::Fetch("timed out".into())));
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(dash.state(), &LoadState::Loading { seq: second.seq });
}

#[test]
fn filter_change_while_loading_reuses_pending_load() {
    let mut dash = Dashboard::new(DashboardParams::for_year(2024));
    let ticket = dash.begin_load();

    let params =
        DashboardParams::for_year(2024).with_filters(FilterCriteria::default().with_threshold(1.0));
    assert!(dash.set_params(params).is_none());

    let records = fetch_years(&MockSource::instant(), &ticket.years);
    assert_eq!(dash.complete_load(&ticket, records), LoadOutcome::Applied);
    assert_eq!(dash.params().filters.threshold, 1.0);
}

#[test]
fn failed_load_sets_static_message() {
    let source = MockSource::failing();
    let mut dash = Dashboard::new(DashboardParams::default());
    assert_eq!(dash.load(&source), LoadOutcome::Applied);

    assert_eq!(
        dash.state(),
        &LoadState::Failed {
            message: LOAD_FAILED_MESSAGE.to_string()
        }
    );
    assert_eq!(dash.error_message(), Some(LOAD_FAILED_MESSAGE));
    assert!(dash.views().is_none());

    // No automatic retry on a derived-only change.
    let params = DashboardParams::default().with_chart(ChartKind::Line);
    assert!(dash.set_params(params).is_none());
    assert!(dash.error_message().is_some());
}

#[test]
fn failed_load_recovers_on_next_successful_load() {
    let mut dash = Dashboard::new(DashboardParams::default());
    dash.load(&MockSource::failing());
    dash.load(&MockSource::instant());
    assert_eq!(dash.state(), &LoadState::Ready);
    assert!(dash.error_message().is_none());
}

// ---------------------------------------------------------------------------
// SalesAnalytics
// ---------------------------------------------------------------------------

#[test]
fn sdk_load_and_views() {
    let mut sdk = common::instant_sdk(DashboardParams::default());
    assert!(sdk.views().is_none());
    assert_eq!(sdk.load(), LoadOutcome::Applied);

    let views = sdk.views().unwrap();
    assert_eq!(views.summary.record_count, 12);
    assert_eq!(sdk.query().totals(2024).total_sales, 297000.0);
}

#[test]
fn sdk_set_params_reports_fetches() {
    let mut sdk = common::instant_sdk(DashboardParams::default());
    sdk.load();

    let narrowed = DashboardParams::default()
        .with_filters(FilterCriteria::default().with_product("Furniture"));
    assert_eq!(sdk.set_params(narrowed), None);
    assert_eq!(
        sdk.set_params(DashboardParams::for_year(2023)),
        Some(LoadOutcome::Applied)
    );
    assert_eq!(sdk.params().year, 2023);
}

#[test]
fn sdk_with_failing_source() {
    let mut sdk = SalesAnalytics::builder()
        .source(Arc::new(MockSource::failing()))
        .build()
        .unwrap();
    sdk.load();
    assert_eq!(sdk.error_message(), Some(LOAD_FAILED_MESSAGE));
    assert!(sdk.views().is_none());
}

#[test]
fn sdk_custom_records() {
    let source = MockSource::instant().with_records(common::small_pool());
    let mut sdk = SalesAnalytics::builder()
        .source(Arc::new(source))
        .build()
        .unwrap();
    sdk.load();
    assert_eq!(sdk.views().unwrap().summary.total_sales, 60000.0);
}

#[test]
fn sdk_display() {
    let mut sdk = common::instant_sdk(DashboardParams::default());
    assert_eq!(
        sdk.to_string(),
        "SalesAnalytics(year=2024, loaded=[], records=0, state=Idle)"
    );
    sdk.load();
    assert_eq!(
        sdk.to_string(),
        "SalesAnalytics(year=2024, loaded=[2024], records=12, state=Ready)"
    );
}
