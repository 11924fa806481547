//! Integration tests for the marketplace analysis.
//!
//! These tests run the whole pipeline against CSV fixtures shaped like a
//! real app-store export.

use app_market::{
    AnalysisConfig, AnalysisError, AnalysisPipeline, AppCleaner, ChartKind,
    derive_revenue_estimate, load_apps_csv,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_fixture(
    filename: &str,
    output_dir: &std::path::Path,
) -> Result<app_market::AnalysisResult, AnalysisError> {
    let config = AnalysisConfig::builder()
        .input_path(fixtures_path().join(filename))
        .output_dir(output_dir)
        .write_html(true)
        .build()
        .unwrap();

    AnalysisPipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_sample() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_fixture("apps_sample.csv", dir.path()).unwrap();
    let report = &result.report;

    assert_eq!(report.total_apps, 16);
    assert_eq!(report.top_grossing.len(), 10);

    let ranked: Vec<&str> = report.top_grossing.iter().map(|a| a.app.as_str()).collect();
    assert_eq!(
        ranked,
        vec![
            "Minecraft",
            "Weather Pro",
            "Hitman Sniper",
            "Grand Theft Auto: San Andreas",
            "Facetune - For Free",
            "Nova Launcher Prime",
            "Bloons TD 5",
            "Card Wars - Adventure Time",
            "Threema",
            "Where's My Water?",
        ]
    );

    assert_eq!(
        report.games_in_top,
        vec![
            "Hitman Sniper".to_string(),
            "Grand Theft Auto: San Andreas".to_string()
        ]
    );
    assert_eq!(report.unique_genres, 16);

    let median = report.median_paid_price.unwrap();
    assert!((median - 3.99).abs() < 1e-9, "median was {}", median);
}

#[test]
fn test_ranking_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_fixture("apps_sample.csv", dir.path()).unwrap();
    let top = &result.report.top_grossing;

    assert!(top.len() <= 10);
    assert!(
        top.windows(2)
            .all(|w| w[0].revenue_estimate >= w[1].revenue_estimate)
    );

    // every ranked app must be paid in the cleaned table
    let apps = result.data.column("App").unwrap().as_materialized_series().clone();
    let prices = result.data.column("Price").unwrap().as_materialized_series().clone();
    for ranked in top {
        let idx = apps
            .str()
            .unwrap()
            .into_iter()
            .position(|a| a == Some(ranked.app.as_str()))
            .unwrap();
        assert!(prices.f64().unwrap().get(idx).unwrap() > 0.0);
    }
}

#[test]
fn test_category_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_fixture("apps_sample.csv", dir.path()).unwrap().report;

    assert_eq!(report.category_counts[0].label, "FAMILY");
    assert_eq!(report.category_counts[0].count, 5);
    assert_eq!(report.category_counts[1].label, "GAME");
    assert_eq!(report.category_counts[1].count, 4);
    assert_eq!(report.category_counts.len(), 9);

    let totals = &report.installs_by_category;
    assert_eq!(totals[0].category, "ART_AND_DESIGN");
    assert_eq!(totals[0].total_installs, 10_000.0);
    assert_eq!(totals[1].category, "WEATHER");
    assert_eq!(totals[1].total_installs, 50_000.0);

    // three categories tie at 1,000,000 and stay in name order
    let tied: Vec<&str> = totals[4..7].iter().map(|c| c.category.as_str()).collect();
    assert_eq!(tied, vec!["COMMUNICATION", "PERSONALIZATION", "PHOTOGRAPHY"]);
    assert!(totals[4..7].iter().all(|c| c.total_installs == 1_000_000.0));

    let last = totals.last().unwrap();
    assert_eq!(last.category, "GAME");
    assert_eq!(last.total_installs, 1_011_000_000.0);
}

#[test]
fn test_chart_files_written() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_fixture("apps_sample.csv", dir.path()).unwrap();

    assert_eq!(result.charts.len(), 6);
    assert_eq!(result.chart_files.len(), 12);
    assert!(result.chart_files.iter().all(|p| p.exists()));

    let scatter = result
        .charts
        .iter()
        .find(|c| c.kind == ChartKind::Scatter)
        .unwrap();
    assert_eq!(scatter.traces.len(), 9);

    let revenue_json = dir.path().join("charts/05_revenue_by_category.json");
    let figure: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(revenue_json).unwrap()).unwrap();
    assert_eq!(figure["layout"]["yaxis"]["type"], "log");
    assert_eq!(figure["layout"]["xaxis"]["categoryorder"], "min ascending");
}

// ============================================================================
// Stage Tests on Loaded Data
// ============================================================================

#[test]
fn test_cleaning_is_idempotent_on_loaded_data() {
    let mut df = load_apps_csv(fixtures_path().join("apps_sample.csv")).unwrap();

    AppCleaner.clean(&mut df).unwrap();
    derive_revenue_estimate(&mut df).unwrap();
    let once = df.clone();

    AppCleaner.clean(&mut df).unwrap();
    derive_revenue_estimate(&mut df).unwrap();

    assert!(df.equals_missing(&once));
    assert_eq!(df.column("Installs").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_weather_price_with_thousands_separator() {
    let mut df = load_apps_csv(fixtures_path().join("apps_sample.csv")).unwrap();
    AppCleaner.clean(&mut df).unwrap();

    let prices: Vec<Option<f64>> = df
        .column("Price")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert!(prices.contains(&Some(1234.56)));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_malformed_installs_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_fixture("apps_malformed.csv", dir.path()).unwrap_err();

    assert_eq!(err.error_code(), "TYPE_CONVERSION_FAILED");
    assert!(err.to_string().contains("Installs"));
    assert!(err.to_string().contains("Free"));
}

#[test]
fn test_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_fixture("apps_missing_column.csv", dir.path()).unwrap_err();
    assert!(matches!(err, AnalysisError::ColumnNotFound(ref name) if name == "Price"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_fixture("no_such_file.csv", dir.path()).unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}
