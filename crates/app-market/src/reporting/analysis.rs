//! Summary statistics over the cleaned and derived table.

use crate::error::Result;
use crate::types::{
    COL_APP, COL_CATEGORY, COL_GENRES, COL_INSTALLS, COL_PRICE, COL_REVENUE, CategoryInstalls,
    LabelCount, TopGrossingApp,
};
use crate::utils::{count_labels, float_values, median, string_values};
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Separator between labels in the `Genres` column.
pub const GENRE_SEPARATOR: char = ';';

/// The `n` paid apps with the highest revenue estimate, descending.
///
/// Only rows with `Price > 0` and a known revenue qualify. Equal estimates
/// keep their input order.
pub fn top_grossing(df: &DataFrame, n: usize) -> Result<Vec<TopGrossingApp>> {
    let apps = string_values(df, COL_APP)?;
    let categories = string_values(df, COL_CATEGORY)?;
    let prices = float_values(df, COL_PRICE)?;
    let revenues = float_values(df, COL_REVENUE)?;

    let mut paid: Vec<TopGrossingApp> = apps
        .into_iter()
        .zip(categories)
        .zip(prices.into_iter().zip(revenues))
        .filter_map(|((app, category), (price, revenue))| match (price, revenue) {
            (Some(p), Some(r)) if p > 0.0 => Some(TopGrossingApp {
                app: app.unwrap_or_default(),
                category: category.unwrap_or_default(),
                revenue_estimate: r,
            }),
            _ => None,
        })
        .collect();

    paid.sort_by(|a, b| {
        b.revenue_estimate
            .partial_cmp(&a.revenue_estimate)
            .unwrap_or(Ordering::Equal)
    });
    paid.truncate(n);

    Ok(paid)
}

/// Names of ranked apps whose category matches exactly.
pub fn apps_in_category(ranking: &[TopGrossingApp], category: &str) -> Vec<String> {
    ranking
        .iter()
        .filter(|app| app.category == category)
        .map(|app| app.app.clone())
        .collect()
}

/// Number of apps per category, most frequent first.
pub fn category_counts(df: &DataFrame) -> Result<Vec<LabelCount>> {
    let categories = string_values(df, COL_CATEGORY)?;
    Ok(to_label_counts(count_labels(categories.into_iter().flatten())))
}

/// Total installs per category, smallest total first.
///
/// Categories with equal totals are ordered by name.
pub fn installs_by_category(df: &DataFrame) -> Result<Vec<CategoryInstalls>> {
    let categories = string_values(df, COL_CATEGORY)?;
    let installs = float_values(df, COL_INSTALLS)?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (category, value) in categories.into_iter().zip(installs) {
        if let Some(category) = category {
            *totals.entry(category).or_insert(0.0) += value.unwrap_or(0.0);
        }
    }

    let mut result: Vec<CategoryInstalls> = totals
        .into_iter()
        .map(|(category, total_installs)| CategoryInstalls {
            category,
            total_installs,
        })
        .collect();
    result.sort_by(|a, b| {
        a.total_installs
            .partial_cmp(&b.total_installs)
            .unwrap_or(Ordering::Equal)
    });

    Ok(result)
}

/// Split every `Genres` value on `;` and count each label.
pub fn genre_counts(df: &DataFrame) -> Result<Vec<LabelCount>> {
    let genres = string_values(df, COL_GENRES)?;
    let labels = genres
        .iter()
        .flatten()
        .flat_map(|value| value.split(GENRE_SEPARATOR));

    Ok(to_label_counts(count_labels(labels)))
}

/// Number of distinct genre labels after splitting.
pub fn unique_genre_count(df: &DataFrame) -> Result<usize> {
    let genres = string_values(df, COL_GENRES)?;
    let distinct: HashSet<&str> = genres
        .iter()
        .flatten()
        .flat_map(|value| value.split(GENRE_SEPARATOR))
        .collect();
    Ok(distinct.len())
}

/// Median list price among paid apps, `None` if there are none.
pub fn median_paid_price(df: &DataFrame) -> Result<Option<f64>> {
    Ok(median(&paid_prices(df)?))
}

/// Prices greater than zero, in input order.
pub fn paid_prices(df: &DataFrame) -> Result<Vec<f64>> {
    Ok(float_values(df, COL_PRICE)?
        .into_iter()
        .flatten()
        .filter(|p| *p > 0.0)
        .collect())
}

fn to_label_counts(counts: Vec<(String, usize)>) -> Vec<LabelCount> {
    counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cleaned() -> DataFrame {
        df!(
            "App" => &["Free Game", "Pro Tool", "Big Game", "Tie A", "Tie B", "Cheap"],
            "Category" => &["GAME", "TOOLS", "GAME", "FAMILY", "FAMILY", "TOOLS"],
            "Installs" => &[1_000_000.0f64, 1_000.0, 100_000.0, 100.0, 100.0, 10.0],
            "Price" => &[0.0f64, 4.0, 2.0, 1.0, 1.0, 0.5],
            "Type" => &["Free", "Paid", "Paid", "Paid", "Paid", "Paid"],
            "Genres" => &[
                "Action;Adventure",
                "Tools",
                "Action",
                "Puzzle;Brain Games",
                "Puzzle",
                "Tools"
            ],
            "Revenue_Estimate" => &[0.0f64, 4_000.0, 200_000.0, 100.0, 100.0, 5.0]
        )
        .unwrap()
    }

    #[test]
    fn test_top_grossing_excludes_free_and_sorts_descending() {
        let top = top_grossing(&cleaned(), 10).unwrap();

        let names: Vec<&str> = top.iter().map(|a| a.app.as_str()).collect();
        assert_eq!(names, vec!["Big Game", "Pro Tool", "Tie A", "Tie B", "Cheap"]);
        assert!(
            top.windows(2)
                .all(|w| w[0].revenue_estimate >= w[1].revenue_estimate)
        );
    }

    #[test]
    fn test_top_grossing_truncates_and_keeps_tie_order() {
        let top = top_grossing(&cleaned(), 3).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[2].app, "Tie A");
    }

    #[test]
    fn test_apps_in_category_is_case_sensitive() {
        let mut top = top_grossing(&cleaned(), 10).unwrap();
        top[1].category = "game".to_string();

        assert_eq!(apps_in_category(&top, "GAME"), vec!["Big Game".to_string()]);
    }

    #[test]
    fn test_category_counts() {
        let counts = category_counts(&cleaned()).unwrap();
        assert_eq!(
            counts,
            vec![
                LabelCount {
                    label: "GAME".into(),
                    count: 2
                },
                LabelCount {
                    label: "TOOLS".into(),
                    count: 2
                },
                LabelCount {
                    label: "FAMILY".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_installs_by_category_ascending() {
        let totals = installs_by_category(&cleaned()).unwrap();
        let order: Vec<(&str, f64)> = totals
            .iter()
            .map(|c| (c.category.as_str(), c.total_installs))
            .collect();
        assert_eq!(
            order,
            vec![("FAMILY", 200.0), ("TOOLS", 1_010.0), ("GAME", 1_100_000.0)]
        );
    }

    #[test]
    fn test_installs_by_category_ties_by_name() {
        let df = df!(
            "Category" => &["ZOO", "ALPHA", "MID", "ALPHA"],
            "Installs" => &[100.0f64, 60.0, 50.0, 40.0]
        )
        .unwrap();

        let order: Vec<String> = installs_by_category(&df)
            .unwrap()
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(order, vec!["MID", "ALPHA", "ZOO"]);
    }

    #[test]
    fn test_nulls_are_skipped() {
        let df = df!(
            "App" => &[Some("Alpha"), Some("Beta"), Some("Gamma"), Some("Delta")],
            "Category" => &[Some("GAME"), None, Some("TOOLS"), Some("GAME")],
            "Installs" => &[Some(100.0f64), Some(50.0), None, Some(10.0)],
            "Price" => &[Some(1.0f64), Some(2.0), Some(3.0), Some(0.0)],
            "Type" => &[Some("Paid"), Some("Paid"), Some("Paid"), Some("Free")],
            "Genres" => &[Some("Action;Puzzle"), None, Some("Tools"), Some("Action")],
            "Revenue_Estimate" => &[Some(100.0f64), Some(100.0), None, Some(0.0)]
        )
        .unwrap();

        // Gamma is paid but has no revenue estimate
        let names: Vec<String> = top_grossing(&df, 10)
            .unwrap()
            .into_iter()
            .map(|a| a.app)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);

        let categories: Vec<(String, usize)> = category_counts(&df)
            .unwrap()
            .into_iter()
            .map(|c| (c.label, c.count))
            .collect();
        assert_eq!(
            categories,
            vec![("GAME".to_string(), 2), ("TOOLS".to_string(), 1)]
        );

        let totals: Vec<(String, f64)> = installs_by_category(&df)
            .unwrap()
            .into_iter()
            .map(|c| (c.category, c.total_installs))
            .collect();
        assert_eq!(
            totals,
            vec![("TOOLS".to_string(), 0.0), ("GAME".to_string(), 110.0)]
        );

        let genres: Vec<(String, usize)> = genre_counts(&df)
            .unwrap()
            .into_iter()
            .map(|c| (c.label, c.count))
            .collect();
        assert_eq!(
            genres,
            vec![
                ("Action".to_string(), 2),
                ("Puzzle".to_string(), 1),
                ("Tools".to_string(), 1)
            ]
        );
        assert_eq!(unique_genre_count(&df).unwrap(), 3);
    }

    #[test]
    fn test_genre_split_counts_each_label() {
        let counts = genre_counts(&cleaned()).unwrap();
        let lookup = |label: &str| counts.iter().find(|c| c.label == label).map(|c| c.count);

        assert_eq!(lookup("Action"), Some(2));
        assert_eq!(lookup("Adventure"), Some(1));
        assert_eq!(lookup("Puzzle"), Some(2));
        assert_eq!(lookup("Brain Games"), Some(1));
        assert_eq!(unique_genre_count(&cleaned()).unwrap(), counts.len());
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_median_paid_price() {
        let df = df!("Price" => &[0.0f64, 1.0, 2.0, 3.0, 0.0]).unwrap();
        assert_eq!(median_paid_price(&df).unwrap(), Some(2.0));
    }

    #[test]
    fn test_median_without_paid_apps() {
        let df = df!("Price" => &[0.0f64, 0.0]).unwrap();
        assert_eq!(median_paid_price(&df).unwrap(), None);
    }
}
