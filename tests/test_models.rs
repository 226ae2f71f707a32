//! Model parsing and serialization tests.

mod common;

use sales_analytics::{
    ChartKind, ComparisonSpec, DashboardParams, FilterCriteria, Month, Product, SalesRecord,
    SalesRecordPatch, Selector,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

#[test]
fn month_labels_and_numbers() {
    assert_eq!(Month::ALL.len(), 12);
    assert_eq!(Month::Jan.number(), 1);
    assert_eq!(Month::Dec.number(), 12);
    assert_eq!(Month::Sep.to_string(), "Sep");
}

#[test]
fn month_parses_case_insensitively() {
    assert_eq!("jun".parse::<Month>().unwrap(), Month::Jun);
    assert_eq!(" OCT ".parse::<Month>().unwrap(), Month::Oct);
    assert!("June".parse::<Month>().is_err());
}

#[test]
fn month_json_accepts_any_case() {
    let month: Month = serde_json::from_value(json!("jan")).unwrap();
    assert_eq!(month, Month::Jan);
    let month: Month = serde_json::from_value(json!("DEC")).unwrap();
    assert_eq!(month, Month::Dec);
    assert!(serde_json::from_value::<Month>(json!("Janvier")).is_err());
    assert_eq!(serde_json::to_value(Month::Jan).unwrap(), json!("Jan"));
}

#[test]
fn months_sort_chronologically() {
    let mut months = vec![Month::Dec, Month::Jan, Month::Jul];
    months.sort();
    assert_eq!(months, vec![Month::Jan, Month::Jul, Month::Dec]);
}

// ---------------------------------------------------------------------------
// Selector / FilterCriteria
// ---------------------------------------------------------------------------

#[test]
fn selector_from_labels() {
    assert_eq!(Selector::from("All"), Selector::Any);
    assert_eq!(Selector::from(""), Selector::Any);
    assert_eq!(Selector::from(None), Selector::Any);
    assert_eq!(Selector::from(" West "), Selector::exact("West"));
    assert_eq!(Selector::from("West".to_string()).as_exact(), Some("West"));
}

#[test]
fn selector_matching() {
    assert!(Selector::Any.matches("anything"));
    assert!(Selector::exact("North").matches("North"));
    assert!(!Selector::exact("North").matches("north"));
    assert_eq!(Selector::Any.to_string(), "All");
}

#[test]
fn selector_serializes_as_label() {
    assert_eq!(serde_json::to_value(Selector::Any).unwrap(), json!("All"));
    assert_eq!(serde_json::to_value(Selector::exact("East")).unwrap(), json!("East"));

    let parsed: Selector = serde_json::from_value(json!(null)).unwrap();
    assert_eq!(parsed, Selector::Any);
    let parsed: Selector = serde_json::from_value(json!("Clothing")).unwrap();
    assert_eq!(parsed, Selector::exact("Clothing"));
}

#[test]
fn criteria_deserializes_with_defaults() {
    let criteria: FilterCriteria =
        serde_json::from_value(json!({ "region": "South" })).unwrap();
    assert_eq!(criteria, FilterCriteria::new(0.0, "South", "All"));
}

// ---------------------------------------------------------------------------
// SalesRecord
// ---------------------------------------------------------------------------

#[test]
fn record_parses_api_shape() {
    let value = json!({
        "id": 3,
        "year": 2024,
        "month": "Mar",
        "sales": 21000,
        "revenue": 84000,
        "region": "East",
        "product": "Clothing",
        "profit": 5000,
        "customers": 410
    });
    let rec: SalesRecord = serde_json::from_value(value).unwrap();
    assert_eq!(rec.id, Some(3));
    assert_eq!(rec.month, Month::Mar);
    assert_eq!(rec.sales, 21000.0);
    assert_eq!(rec.profit_or_zero(), 5000.0);
    assert_eq!(rec.customers_or_zero(), 410.0);
}

#[test]
fn record_optional_fields_default_to_absent() {
    let value = json!({
        "year": 2023,
        "month": "Jan",
        "sales": 15000,
        "revenue": 60000,
        "region": "North",
        "product": "Electronics"
    });
    let rec: SalesRecord = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(rec.id, None);
    assert_eq!(rec.profit_or_zero(), 0.0);
    assert_eq!(serde_json::to_value(&rec).unwrap()["year"], value["year"]);
    assert!(serde_json::to_value(&rec).unwrap().get("customers").is_none());
}

#[test]
fn malformed_optional_amounts_count_as_zero() {
    let rec: SalesRecord = serde_json::from_str(
        r#"{"year":2024,"month":"Jan","sales":17000,"revenue":68000,"region":"North","product":"Electronics","profit":"n/a","customers":{"n":3}}"#,
    )
    .unwrap();
    assert_eq!(rec.profit, None);
    assert_eq!(rec.customers, None);
    assert_eq!(rec.profit_or_zero(), 0.0);
    assert_eq!(rec.customers_or_zero(), 0.0);

    let rec: SalesRecord = serde_json::from_value(json!({
        "year": 2024,
        "month": "Feb",
        "sales": 19000,
        "revenue": 76000,
        "region": "South",
        "product": "Furniture",
        "profit": " 2500.5 ",
        "customers": null
    }))
    .unwrap();
    assert_eq!(rec.profit, Some(2500.5));
    assert_eq!(rec.customers, None);
}

#[test]
fn patch_serializes_only_set_fields() {
    let patch = SalesRecordPatch {
        sales: Some(9000.0),
        region: Some("West".into()),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({ "sales": 9000.0, "region": "West" })
    );
}

#[test]
fn catalog_product_parses() {
    let product: Product = serde_json::from_value(json!({
        "id": 1,
        "name": "Laptop",
        "category": "Electronics"
    }))
    .unwrap();
    assert_eq!(product.category, "Electronics");
}

#[test]
fn sample_data_shape() {
    let pool = common::sample_pool();
    assert_eq!(pool.len(), 36);
    assert!(pool.iter().all(|r| r.revenue == r.sales * 4.0));
    assert_eq!(pool[0].region, "North");
    assert_eq!(pool[1].product, "Furniture");
}

// ---------------------------------------------------------------------------
// ChartKind / DashboardParams
// ---------------------------------------------------------------------------

#[test]
fn chart_kind_round_trips_through_text() {
    for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Pie] {
        assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), kind);
    }
    assert_eq!("PIE".parse::<ChartKind>().unwrap(), ChartKind::Pie);
    assert!("donut".parse::<ChartKind>().is_err());
    assert_eq!(ChartKind::default(), ChartKind::Bar);
}

#[test]
fn dashboard_params_deserialize_with_defaults() {
    let params: DashboardParams = serde_json::from_value(json!({
        "year": 2023,
        "chart": "line",
        "filters": { "threshold": 12000, "product": "Furniture" }
    }))
    .unwrap();

    assert_eq!(params.year, 2023);
    assert_eq!(params.chart, ChartKind::Line);
    assert_eq!(params.filters, FilterCriteria::new(12000.0, "All", "Furniture"));
    assert_eq!(params.comparison, ComparisonSpec::default());
    assert_eq!(params.forecast_horizon, 3);
}
