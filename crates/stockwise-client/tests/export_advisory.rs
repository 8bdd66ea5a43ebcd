//! Report export and AI advisory calls.

mod common;

use chrono::NaiveDate;
use common::*;
use stockwise_client::{ClientConfig, ClientError};
use stockwise_core::{ReorderRequest, ReportFormat, ValidationError};

fn export_config(dir: &std::path::Path) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.export.directory = dir.to_path_buf();
    config
}

#[tokio::test]
async fn csv_export_writes_file_and_leaves_report_state_alone() {
    let backend = healthy();
    let dir = tempfile::tempdir().unwrap();
    let client = client_with(&backend, export_config(dir.path()));

    client.report.mount().await;
    let before = client.report.state();

    let date = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
    let path = client
        .exporter
        .export_on(ReportFormat::Csv, date)
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("stockwise_report_2025-11-09.csv"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Metric,Value\ntotal_active_skus,2\n"
    );
    assert_eq!(client.report.state(), before);
    assert_eq!(backend.count("GET /reports/summary"), 2);
}

#[tokio::test]
async fn text_export_writes_summary() {
    let backend = healthy();
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("exports");
    let client = client_with(&backend, export_config(&nested));

    let date = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
    let path = client
        .exporter
        .export_on(ReportFormat::Text, date)
        .await
        .unwrap();

    assert!(path.starts_with(&nested));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "STOCKWISE AI INVENTORY SUMMARY REPORT"
    );
}

#[tokio::test]
async fn failed_export_writes_nothing() {
    let backend = healthy();
    backend.on("GET /reports/summary?format=csv", 503, r#"{"error":"Report unavailable"}"#);
    let dir = tempfile::tempdir().unwrap();
    let client = client_with(&backend, export_config(dir.path()));

    let err = client.exporter.export(ReportFormat::Csv).await.unwrap_err();
    assert_eq!(err.user_message(), "Report unavailable");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn reorder_recommendation_posts_defaults() {
    let backend = healthy();
    backend.on(
        &format!("POST /skus/{}/recommendation", SKU_ID),
        200,
        r#"{"sku_name":"Hex Bolt M6","ai_recommendation":"Reorder 140 units."}"#,
    );
    let client = client(&backend);

    let advice = client
        .advisor
        .reorder_recommendation(SKU_ID, ReorderRequest::default())
        .await
        .unwrap();
    assert_eq!(advice, "Reorder 140 units.");

    let body = backend.requests()[0].body.clone().unwrap();
    assert_eq!(body, serde_json::json!({"lead_time": 7, "safety_stock": 50}));
    assert_eq!(backend.total(), 1);
}

#[tokio::test]
async fn scenario_analysis_trims_description() {
    let backend = healthy();
    backend.on(
        &format!("POST /skus/{}/whatif", SKU_ID),
        200,
        r#"{"ai_analysis":"Scenario Analysis Report: demand rises."}"#,
    );
    let client = client(&backend);

    let analysis = client
        .advisor
        .scenario_analysis(SKU_ID, "  Competitor closes nearby  ")
        .await
        .unwrap();
    assert!(analysis.starts_with("Scenario Analysis Report:"));

    let body = backend.requests()[0].body.clone().unwrap();
    assert_eq!(body["scenario_description"], "Competitor closes nearby");
}

#[tokio::test]
async fn advisory_validation_sends_nothing() {
    let backend = healthy();
    let client = client(&backend);

    assert!(client
        .advisor
        .reorder_recommendation("  ", ReorderRequest::default())
        .await
        .unwrap_err()
        .is_validation());
    assert!(client
        .advisor
        .scenario_analysis(SKU_ID, "")
        .await
        .unwrap_err()
        .is_validation());
    assert_eq!(backend.total(), 0);
}

#[tokio::test]
async fn advisory_rejects_ids_that_would_change_the_path() {
    let backend = healthy();
    let client = client(&backend);

    for skuid in [
        format!("{SKU_ID}/../../reports/summary"),
        format!("{SKU_ID}?force=1"),
        format!("{SKU_ID}#top"),
    ] {
        let err = client
            .advisor
            .reorder_recommendation(&skuid, ReorderRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::CorruptReference)
        ));
        assert!(client
            .advisor
            .scenario_analysis(&skuid, "Supplier strike")
            .await
            .unwrap_err()
            .is_validation());
    }
    assert_eq!(backend.total(), 0);
}

#[tokio::test]
async fn advisory_error_mapping() {
    let backend = healthy();
    let route = format!("POST /skus/{}/recommendation", SKU_ID);
    let client = client(&backend);

    backend.on(&route, 503, r#"{"error":"AI service temporarily unavailable."}"#);
    let err = client
        .advisor
        .reorder_recommendation(SKU_ID, ReorderRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "AI service temporarily unavailable.");

    backend.on(&route, 500, "");
    let err = client
        .advisor
        .reorder_recommendation(SKU_ID, ReorderRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Unknown error occurred.");

    backend.on(&route, 200, r#"{"sku_name":"Hex Bolt M6"}"#);
    let err = client
        .advisor
        .reorder_recommendation(SKU_ID, ReorderRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(err.user_message(), "Failed to get recommendation.");

    backend.offline(&route);
    let err = client
        .advisor
        .reorder_recommendation(SKU_ID, ReorderRequest::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "Network error or API server issue: connection refused"
    );
}
