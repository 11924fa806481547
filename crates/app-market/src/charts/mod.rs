//! Chart assembly for the marketplace analysis.
//!
//! Drawing is left to an external renderer. This module assembles the data
//! series, titles, axis labels and ordering directives of six charts:
//!
//! 1. Apps per category (bar)
//! 2. Installs per category (horizontal bar)
//! 3. Installs per app by category (bubble scatter, log scale)
//! 4. Installs of free vs paid apps (box, log scale)
//! 5. Revenue estimate per category for paid apps (box, log scale)
//! 6. Price per category for paid apps (box, log scale)
//!
//! [`ChartSpec::to_plotly`] turns a spec into a Plotly figure and
//! [`ChartWriter`] writes the figures to disk.

mod builder;
mod spec;
mod writer;

pub use builder::{
    build_charts, competition_chart, concentration_chart, paid_installs_box, popularity_chart,
    pricing_box, revenue_box,
};
pub use spec::{AxisData, BUBBLE_SIZE_MAX, BoxPoints, CategoryOrder, ChartKind, ChartSpec, Trace};
pub use writer::{ChartWriter, PLOTLY_CDN};
