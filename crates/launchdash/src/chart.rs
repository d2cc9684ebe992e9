//! Declarative chart specifications.
//!
//! A [`ChartSpec`] describes what to draw (data, visual encoding, title)
//! without drawing it. The dashboard page hands the plotly form of a spec to
//! plotly.js; the CLI prints specs directly.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A chart ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// A pie chart.
    Pie(PieChart),
    /// A scatter plot.
    Scatter(ScatterChart),
}

/// A pie chart: one slice per label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    /// Chart title.
    pub title: String,
    /// Slices in drawing order.
    pub slices: Vec<PieSlice>,
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Slice label.
    pub label: String,
    /// Slice value.
    pub value: u64,
    /// Fixed slice color, if the chart pins one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A scatter plot grouped into colored series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    /// Chart title.
    pub title: String,
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// One series per color group.
    pub series: Vec<ScatterSeries>,
}

/// Points sharing a color group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    /// Group name, shown in the legend.
    pub name: String,
    /// Points in source order.
    pub points: Vec<ScatterPoint>,
}

/// One point of a scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Launch site, shown on hover.
    pub site: String,
}

impl PieSlice {
    /// Create a slice without a pinned color.
    #[must_use]
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    /// Pin the slice color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl PieChart {
    /// Sum of all slice values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Find a slice by label.
    #[must_use]
    pub fn slice(&self, label: &str) -> Option<&PieSlice> {
        self.slices.iter().find(|s| s.label == label)
    }

    fn to_plotly(&self) -> Value {
        let labels: Vec<&str> = self.slices.iter().map(|s| s.label.as_str()).collect();
        let values: Vec<u64> = self.slices.iter().map(|s| s.value).collect();

        let mut trace = json!({
            "type": "pie",
            "labels": labels,
            "values": values,
        });

        let colors: Option<Vec<&str>> = self.slices.iter().map(|s| s.color.as_deref()).collect();
        if let Some(colors) = colors.filter(|c| !c.is_empty()) {
            trace["marker"] = json!({ "colors": colors });
        }

        json!({
            "data": [trace],
            "layout": { "title": { "text": self.title } },
        })
    }
}

impl ScatterChart {
    /// Total number of points across all series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Find a series by name.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&ScatterSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    fn to_plotly(&self) -> Value {
        let data: Vec<Value> = self
            .series
            .iter()
            .map(|series| {
                json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": series.name,
                    "x": series.points.iter().map(|p| p.x).collect::<Vec<_>>(),
                    "y": series.points.iter().map(|p| p.y).collect::<Vec<_>>(),
                    "text": series.points.iter().map(|p| p.site.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();

        json!({
            "data": data,
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_title } },
                "yaxis": { "title": { "text": self.y_title } },
                "legend": { "title": { "text": "Booster Version Category" } },
            },
        })
    }
}

impl ChartSpec {
    /// Chart title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Pie(pie) => &pie.title,
            Self::Scatter(scatter) => &scatter.title,
        }
    }

    /// The pie chart, if this is one.
    #[must_use]
    pub fn as_pie(&self) -> Option<&PieChart> {
        match self {
            Self::Pie(pie) => Some(pie),
            Self::Scatter(_) => None,
        }
    }

    /// The scatter plot, if this is one.
    #[must_use]
    pub fn as_scatter(&self) -> Option<&ScatterChart> {
        match self {
            Self::Scatter(scatter) => Some(scatter),
            Self::Pie(_) => None,
        }
    }

    /// Convert to a plotly figure (`{"data": [...], "layout": {...}}`).
    #[must_use]
    pub fn to_plotly(&self) -> Value {
        match self {
            Self::Pie(pie) => pie.to_plotly(),
            Self::Scatter(scatter) => scatter.to_plotly(),
        }
    }
}
