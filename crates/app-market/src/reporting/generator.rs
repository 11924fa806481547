use crate::error::Result;
use crate::reporting::analysis;
use crate::types::{CategoryInstalls, ColumnCleaning, LabelCount, TopGrossingApp};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Market Report Types
// ============================================================================

/// Every summary the analysis produces, in one serializable value.
///
/// Use this for the human-readable stdout summary, the `--json` output and
/// the report file written by `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Rows in the analyzed table
    pub total_apps: usize,

    // Cleaning
    /// What the cleaner did per column
    pub cleaning: Vec<ColumnCleaning>,

    // Rankings
    /// Requested ranking size
    pub top_n: usize,
    /// Paid apps with the highest revenue estimate
    pub top_grossing: Vec<TopGrossingApp>,
    /// Category matched inside the ranking
    pub game_category: String,
    /// Names of ranked apps in that category
    pub games_in_top: Vec<String>,

    // Aggregates
    /// Apps per category, most frequent first
    pub category_counts: Vec<LabelCount>,
    /// Installs per category, smallest first
    pub installs_by_category: Vec<CategoryInstalls>,
    /// Genre label frequencies, most frequent first
    pub genre_counts: Vec<LabelCount>,
    /// Distinct genre labels
    pub unique_genres: usize,
    /// Median price of paid apps
    pub median_paid_price: Option<f64>,
}

impl MarketReport {
    /// Number of ranked apps in the configured category.
    pub fn games_in_top_count(&self) -> usize {
        self.games_in_top.len()
    }
}

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    /// Create a new ReportGenerator writing into `output_dir`.
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Compute every summary over a cleaned table with `Revenue_Estimate`.
    pub fn build_report(
        input_file: &str,
        df: &DataFrame,
        cleaning: Vec<ColumnCleaning>,
        top_n: usize,
        game_category: &str,
    ) -> Result<MarketReport> {
        let top_grossing = analysis::top_grossing(df, top_n)?;
        let games_in_top = analysis::apps_in_category(&top_grossing, game_category);
        let genre_counts = analysis::genre_counts(df)?;

        Ok(MarketReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            total_apps: df.height(),
            cleaning,
            top_n,
            top_grossing,
            game_category: game_category.to_string(),
            games_in_top,
            category_counts: analysis::category_counts(df)?,
            installs_by_category: analysis::installs_by_category(df)?,
            unique_genres: analysis::unique_genre_count(df)?,
            genre_counts,
            median_paid_price: analysis::median_paid_price(df)?,
        })
    }

    /// Write the report as pretty JSON to `<output_dir>/<stem>_report.json`.
    pub fn write_report_to_file(&self, report: &MarketReport, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.json", stem));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}

// ============================================================================
// Text Rendering
// ============================================================================

/// Render the report as the plain-text summary printed on stdout.
pub fn render_text(report: &MarketReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Top {} Highest Grossing Paid Apps:\n",
        report.top_n
    ));
    out.push_str(&format!(
        "{:>4}  {:<40} {:<20} {:>18}\n",
        "#", "App", "Category", "Revenue_Estimate"
    ));
    for (rank, app) in report.top_grossing.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<40} {:<20} {:>18.2}\n",
            rank + 1,
            truncate_str(&app.app, 40),
            truncate_str(&app.category, 20),
            app.revenue_estimate
        ));
    }

    out.push_str(&format!(
        "Number of games among the top {} highest-grossing paid apps: {}\n",
        report.top_n,
        report.games_in_top_count()
    ));
    out.push_str(&format!(
        "Names of games in top {}: {:?}\n",
        report.top_n,
        report.games_in_top
    ));
    out.push('\n');

    out.push_str("Apps per Category:\n");
    for entry in &report.category_counts {
        out.push_str(&format!("  {:<30} {:>8}\n", entry.label, entry.count));
    }
    out.push('\n');

    out.push_str("Installs per Category:\n");
    for entry in &report.installs_by_category {
        out.push_str(&format!(
            "  {:<30} {:>16.0}\n",
            entry.category, entry.total_installs
        ));
    }
    out.push('\n');

    out.push_str("Genre Frequencies:\n");
    for entry in &report.genre_counts {
        out.push_str(&format!("  {:<30} {:>8}\n", entry.label, entry.count));
    }
    out.push_str(&format!("Total unique genres: {}\n", report.unique_genres));

    match report.median_paid_price {
        Some(price) => out.push_str(&format!("Median price for a paid app: ${:.2}\n", price)),
        None => out.push_str("Median price for a paid app: n/a\n"),
    }

    out
}

/// Truncate a string to max chars with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
