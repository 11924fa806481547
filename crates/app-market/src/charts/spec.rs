//! Typed chart specifications and their Plotly representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Largest bubble diameter in pixels for sized scatter markers.
pub const BUBBLE_SIZE_MAX: f64 = 20.0;

/// Kind of chart a spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Scatter,
    Box,
}

/// Ordering directive for a categorical x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Categories sorted by their smallest value, ascending
    MinAscending,
    /// Categories sorted by their largest value, descending
    MaxDescending,
}

impl CategoryOrder {
    /// Plotly `categoryorder` value.
    pub fn as_plotly(&self) -> &'static str {
        match self {
            Self::MinAscending => "min ascending",
            Self::MaxDescending => "max descending",
        }
    }
}

/// Which individual points a box plot draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxPoints {
    Outliers,
}

impl BoxPoints {
    pub fn as_plotly(&self) -> &'static str {
        match self {
            Self::Outliers => "outliers",
        }
    }
}

/// Values along one axis: category labels or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisData {
    Labels(Vec<String>),
    Numbers(Vec<f64>),
}

/// One data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend entry; `None` for single-series charts
    pub name: Option<String>,
    pub x: AxisData,
    pub y: AxisData,
    /// Marker sizes for bubble charts
    pub size: Option<Vec<f64>>,
}

/// Everything an external renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// File-name friendly identifier
    pub slug: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Logarithmic value axis
    pub log_y: bool,
    pub points: Option<BoxPoints>,
    pub category_order: Option<CategoryOrder>,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    /// Convert to a Plotly figure (`{"data": [...], "layout": {...}}`).
    pub fn to_plotly(&self) -> Value {
        let size_ref = self.bubble_size_ref();
        let data: Vec<Value> = self
            .traces
            .iter()
            .map(|trace| self.trace_to_plotly(trace, size_ref))
            .collect();

        json!({
            "data": data,
            "layout": self.layout_to_plotly(),
        })
    }

    fn trace_to_plotly(&self, trace: &Trace, size_ref: Option<f64>) -> Value {
        let mut obj = Map::new();
        obj.insert("x".into(), json!(trace.x));
        obj.insert("y".into(), json!(trace.y));
        if let Some(name) = &trace.name {
            obj.insert("name".into(), json!(name));
        }

        match self.kind {
            ChartKind::Bar => {
                obj.insert("type".into(), json!("bar"));
            }
            ChartKind::HorizontalBar => {
                obj.insert("type".into(), json!("bar"));
                obj.insert("orientation".into(), json!("h"));
            }
            ChartKind::Scatter => {
                obj.insert("type".into(), json!("scatter"));
                obj.insert("mode".into(), json!("markers"));
                if let (Some(sizes), Some(size_ref)) = (&trace.size, size_ref) {
                    obj.insert(
                        "marker".into(),
                        json!({
                            "size": sizes,
                            "sizemode": "area",
                            "sizeref": size_ref,
                        }),
                    );
                }
            }
            ChartKind::Box => {
                obj.insert("type".into(), json!("box"));
                if let Some(points) = self.points {
                    obj.insert("boxpoints".into(), json!(points.as_plotly()));
                }
            }
        }

        Value::Object(obj)
    }

    fn layout_to_plotly(&self) -> Value {
        let mut xaxis = json!({ "title": { "text": self.x_label } });
        if let Some(order) = self.category_order {
            xaxis["categoryorder"] = json!(order.as_plotly());
        }

        let mut yaxis = json!({ "title": { "text": self.y_label } });
        if self.log_y {
            yaxis["type"] = json!("log");
        }

        json!({
            "title": { "text": self.title },
            "xaxis": xaxis,
            "yaxis": yaxis,
            "showlegend": self.traces.len() > 1,
        })
    }

    /// Shared `sizeref` so bubble areas are comparable across traces.
    fn bubble_size_ref(&self) -> Option<f64> {
        let max = self
            .traces
            .iter()
            .filter_map(|t| t.size.as_ref())
            .flatten()
            .copied()
            .fold(f64::NAN, f64::max);

        if max.is_finite() && max > 0.0 {
            Some(max / BUBBLE_SIZE_MAX.powi(2))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: ChartKind) -> ChartSpec {
        ChartSpec {
            slug: "test".into(),
            kind,
            title: "Title".into(),
            x_label: "X".into(),
            y_label: "Y".into(),
            log_y: false,
            points: None,
            category_order: None,
            traces: vec![Trace {
                name: None,
                x: AxisData::Labels(vec!["a".into(), "b".into()]),
                y: AxisData::Numbers(vec![1.0, 2.0]),
                size: None,
            }],
        }
    }

    #[test]
    fn test_horizontal_bar_orientation() {
        let fig = spec(ChartKind::HorizontalBar).to_plotly();
        assert_eq!(fig["data"][0]["type"], "bar");
        assert_eq!(fig["data"][0]["orientation"], "h");
    }

    #[test]
    fn test_log_axis_and_category_order() {
        let mut box_spec = spec(ChartKind::Box);
        box_spec.log_y = true;
        box_spec.points = Some(BoxPoints::Outliers);
        box_spec.category_order = Some(CategoryOrder::MinAscending);

        let fig = box_spec.to_plotly();
        assert_eq!(fig["layout"]["yaxis"]["type"], "log");
        assert_eq!(fig["layout"]["xaxis"]["categoryorder"], "min ascending");
        assert_eq!(fig["data"][0]["boxpoints"], "outliers");
        assert_eq!(fig["layout"]["title"]["text"], "Title");
    }

    #[test]
    fn test_linear_axis_has_no_type() {
        let fig = spec(ChartKind::Bar).to_plotly();
        assert!(fig["layout"]["yaxis"].get("type").is_none());
    }

    #[test]
    fn test_bubble_size_ref_uses_global_max() {
        let mut scatter = spec(ChartKind::Scatter);
        scatter.traces[0].size = Some(vec![100.0, 800.0]);

        let fig = scatter.to_plotly();
        assert_eq!(fig["data"][0]["mode"], "markers");
        assert_eq!(fig["data"][0]["marker"]["sizemode"], "area");
        assert_eq!(fig["data"][0]["marker"]["sizeref"], 2.0);
    }

    #[test]
    fn test_axis_data_serializes_untagged() {
        let labels = serde_json::to_value(AxisData::Labels(vec!["GAME".into()])).unwrap();
        assert_eq!(labels, json!(["GAME"]));
    }
}
