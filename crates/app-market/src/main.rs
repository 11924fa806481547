//! CLI entry point for the marketplace analysis.

use anyhow::Result;
use app_market::{AnalysisConfig, AnalysisPipeline, AnalysisResult, ReportGenerator, render_text};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Mobile-App Marketplace Analysis",
    long_about = "Cleans an app-store CSV export, estimates revenue, ranks the top-grossing \
                  paid apps and assembles six charts as Plotly figures.\n\n\
                  EXAMPLES:\n  \
                  # Analyze ./apps.csv with defaults\n  \
                  app-market\n\n  \
                  # Another file, HTML chart pages and a JSON report\n  \
                  app-market -i data/store.csv --html --emit-report\n\n  \
                  # Machine-readable output only\n  \
                  app-market --json --no-charts"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long, default_value = "apps.csv")]
    input: PathBuf,

    /// Output directory for charts and reports
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Number of apps in the top-grossing ranking
    #[arg(long, default_value = "10")]
    top: usize,

    /// Category counted inside the ranking (exact match)
    #[arg(long, default_value = "GAME")]
    game_category: String,

    /// Skip writing chart files
    #[arg(long)]
    no_charts: bool,

    /// Also write a standalone HTML page per chart
    #[arg(long)]
    html: bool,

    /// Output the JSON report to stdout instead of the text summary
    ///
    /// Disables all logging so stdout only carries the JSON document.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output)
        .top_n(args.top)
        .game_category(&args.game_category)
        .write_charts(!args.no_charts)
        .write_html(args.html)
        .build()?;

    let mut builder = AnalysisPipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    let result = builder.build()?.run()?;

    handle_output(&result, &args)
}

/// Handle analysis output based on CLI flags.
///
/// Output behavior:
/// - Default: Print the text summary to stdout
/// - `--json`: Print the JSON report to stdout only
/// - `--emit-report`: Also write the JSON report to a file
fn handle_output(result: &AnalysisResult, args: &Args) -> Result<()> {
    if args.emit_report {
        let generator = ReportGenerator::new(args.output.clone());
        let report_path =
            generator.write_report_to_file(&result.report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
        return Ok(());
    }

    print!("{}", render_text(&result.report));

    if !result.chart_files.is_empty() {
        println!();
        println!("Charts:");
        for path in &result.chart_files {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
