use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Line,
    Scatter,
    ScatterGeo,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: XValue,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub name: String,
    pub axis: Axis,
    pub points: Vec<PlotPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_label: Option<String>,
    pub series: Vec<PlotSeries>,
}

impl PlotSpec {
    pub fn new(kind: PlotKind, title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            y2_label: None,
            color_label: None,
            series: Vec::new(),
        }
    }

    pub fn colored_by(mut self, label: &str) -> Self {
        self.color_label = Some(label.to_string());
        self
    }

    pub fn with_secondary_axis(mut self, label: &str) -> Self {
        self.y2_label = Some(label.to_string());
        self
    }

    pub fn with_series(mut self, series: PlotSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }
}
