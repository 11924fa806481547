//! Assembly of the six marketplace charts from the cleaned table.

use crate::charts::spec::{AxisData, BoxPoints, CategoryOrder, ChartKind, ChartSpec, Trace};
use crate::error::Result;
use crate::reporting::analysis;
use crate::types::{COL_CATEGORY, COL_INSTALLS, COL_PRICE, COL_REVENUE, COL_TYPE};
use crate::utils::{float_values, string_values};
use polars::prelude::*;
use std::collections::HashMap;

/// Build all six charts, in presentation order.
pub fn build_charts(df: &DataFrame) -> Result<Vec<ChartSpec>> {
    Ok(vec![
        competition_chart(df)?,
        popularity_chart(df)?,
        concentration_chart(df)?,
        paid_installs_box(df)?,
        revenue_box(df)?,
        pricing_box(df)?,
    ])
}

/// Bar chart of the number of apps per category.
pub fn competition_chart(df: &DataFrame) -> Result<ChartSpec> {
    let counts = analysis::category_counts(df)?;
    let (labels, values) = counts
        .into_iter()
        .map(|c| (c.label, c.count as f64))
        .unzip();

    Ok(ChartSpec {
        slug: "competition_by_category".into(),
        kind: ChartKind::Bar,
        title: "Highest Competition (Number of Apps per Category)".into(),
        x_label: "Category".into(),
        y_label: "Number of Apps".into(),
        log_y: false,
        points: None,
        category_order: None,
        traces: vec![Trace {
            name: None,
            x: AxisData::Labels(labels),
            y: AxisData::Numbers(values),
            size: None,
        }],
    })
}

/// Horizontal bar chart of total installs per category, ascending.
pub fn popularity_chart(df: &DataFrame) -> Result<ChartSpec> {
    let totals = analysis::installs_by_category(df)?;
    let (labels, values) = totals
        .into_iter()
        .map(|c| (c.category, c.total_installs))
        .unzip();

    Ok(ChartSpec {
        slug: "downloads_by_category".into(),
        kind: ChartKind::HorizontalBar,
        title: "Most Popular Categories (Highest Downloads)".into(),
        x_label: "Total Installs".into(),
        y_label: "Category".into(),
        log_y: false,
        points: None,
        category_order: None,
        traces: vec![Trace {
            name: None,
            x: AxisData::Numbers(values),
            y: AxisData::Labels(labels),
            size: None,
        }],
    })
}

/// Bubble scatter of installs per app, one colored trace per category.
pub fn concentration_chart(df: &DataFrame) -> Result<ChartSpec> {
    let categories = string_values(df, COL_CATEGORY)?;
    let installs = float_values(df, COL_INSTALLS)?;

    let mut order: Vec<String> = Vec::new();
    let mut by_category: HashMap<String, Vec<f64>> = HashMap::new();
    for (category, value) in categories.into_iter().zip(installs) {
        if let (Some(category), Some(value)) = (category, value) {
            by_category
                .entry(category.clone())
                .or_insert_with(|| {
                    order.push(category);
                    Vec::new()
                })
                .push(value);
        }
    }

    let traces = order
        .into_iter()
        .map(|category| {
            let values = by_category.remove(&category).unwrap_or_default();
            Trace {
                x: AxisData::Labels(vec![category.clone(); values.len()]),
                size: Some(values.clone()),
                y: AxisData::Numbers(values),
                name: Some(category),
            }
        })
        .collect();

    Ok(ChartSpec {
        slug: "downloads_vs_competition".into(),
        kind: ChartKind::Scatter,
        title: "Downloads vs. Competition by Category".into(),
        x_label: COL_CATEGORY.into(),
        y_label: COL_INSTALLS.into(),
        log_y: true,
        points: None,
        category_order: None,
        traces,
    })
}

/// Box plot of installs for free versus paid apps.
pub fn paid_installs_box(df: &DataFrame) -> Result<ChartSpec> {
    let (labels, values) = grouped_values(df, COL_TYPE, COL_INSTALLS, false)?;

    Ok(box_chart(
        "lost_downloads_paid_apps",
        "Lost Downloads for Paid Apps",
        COL_TYPE,
        COL_INSTALLS,
        None,
        None,
        labels,
        values,
    ))
}

/// Box plot of revenue estimates per category for paid apps.
pub fn revenue_box(df: &DataFrame) -> Result<ChartSpec> {
    let (labels, values) = grouped_values(df, COL_CATEGORY, COL_REVENUE, true)?;

    Ok(box_chart(
        "revenue_by_category",
        "Revenue by App Category",
        COL_CATEGORY,
        COL_REVENUE,
        Some(BoxPoints::Outliers),
        Some(CategoryOrder::MinAscending),
        labels,
        values,
    ))
}

/// Box plot of list prices per category for paid apps.
pub fn pricing_box(df: &DataFrame) -> Result<ChartSpec> {
    let (labels, values) = grouped_values(df, COL_CATEGORY, COL_PRICE, true)?;

    Ok(box_chart(
        "pricing_by_category",
        "Paid App Pricing Strategies by Category",
        COL_CATEGORY,
        COL_PRICE,
        Some(BoxPoints::Outliers),
        Some(CategoryOrder::MaxDescending),
        labels,
        values,
    ))
}

#[allow(clippy::too_many_arguments)]
fn box_chart(
    slug: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
    points: Option<BoxPoints>,
    category_order: Option<CategoryOrder>,
    labels: Vec<String>,
    values: Vec<f64>,
) -> ChartSpec {
    ChartSpec {
        slug: slug.into(),
        kind: ChartKind::Box,
        title: title.into(),
        x_label: x_label.into(),
        y_label: y_label.into(),
        log_y: true,
        points,
        category_order,
        traces: vec![Trace {
            name: None,
            x: AxisData::Labels(labels),
            y: AxisData::Numbers(values),
            size: None,
        }],
    }
}

/// Row-aligned (group label, value) pairs, skipping nulls.
///
/// With `paid_only` set, rows with `Price <= 0` are dropped first.
fn grouped_values(
    df: &DataFrame,
    group_col: &str,
    value_col: &str,
    paid_only: bool,
) -> Result<(Vec<String>, Vec<f64>)> {
    let groups = string_values(df, group_col)?;
    let values = float_values(df, value_col)?;
    let prices = if paid_only {
        float_values(df, COL_PRICE)?
    } else {
        vec![None; df.height()]
    };

    Ok(groups
        .into_iter()
        .zip(values)
        .zip(prices)
        .filter(|(_, price)| !paid_only || price.is_some_and(|p| p > 0.0))
        .filter_map(|((group, value), _)| Some((group?, value?)))
        .unzip())
}
