//! Writing chart specifications to disk for an external renderer.

use crate::charts::spec::ChartSpec;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Plotly bundle loaded by the generated HTML pages.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Writes each chart as Plotly JSON, optionally with an HTML viewer page.
pub struct ChartWriter {
    charts_dir: PathBuf,
    write_html: bool,
}

impl ChartWriter {
    /// Charts land in `<output_dir>/charts`.
    pub fn new(output_dir: &Path, write_html: bool) -> Self {
        Self {
            charts_dir: output_dir.join("charts"),
            write_html,
        }
    }

    pub fn charts_dir(&self) -> &Path {
        &self.charts_dir
    }

    /// Write every chart in order; returns the paths written.
    pub fn write_all(&self, charts: &[ChartSpec]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.charts_dir)?;

        let mut written = Vec::with_capacity(charts.len() * 2);
        for (idx, chart) in charts.iter().enumerate() {
            let stem = format!("{:02}_{}", idx + 1, chart.slug);
            let figure = serde_json::to_string_pretty(&chart.to_plotly())?;

            let json_path = self.charts_dir.join(format!("{}.json", stem));
            fs::write(&json_path, &figure)?;
            debug!("Chart spec written: {}", json_path.display());
            written.push(json_path);

            if self.write_html {
                let html_path = self.charts_dir.join(format!("{}.html", stem));
                fs::write(&html_path, render_html(&chart.title, &figure))?;
                written.push(html_path);
            }

            info!("Chart ready: {}", chart.title);
        }

        Ok(written)
    }
}

/// Standalone page that draws one Plotly figure.
fn render_html(title: &str, figure_json: &str) -> String {
    // a literal "</" inside the script body would close the tag early
    let figure_json = figure_json.replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        title = escape_html(title),
        cdn = PLOTLY_CDN,
        figure = figure_json,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
