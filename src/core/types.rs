use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One sample of a dataset: either a bare value or an `{x, y}` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    Value(f64),
    Point { x: f64, y: f64 },
}

impl DataPoint {
    #[must_use]
    pub fn value(value: f64) -> Self {
        Self::Value(value)
    }

    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point { x, y }
    }
}

impl From<f64> for DataPoint {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

/// Chart type identifier understood by the chart engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    HorizontalBar,
    Radar,
    Doughnut,
    PolarArea,
    Bubble,
    Pie,
    Scatter,
}

impl ChartKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::HorizontalBar => "horizontalBar",
            Self::Radar => "radar",
            Self::Doughnut => "doughnut",
            Self::PolarArea => "polarArea",
            Self::Bubble => "bubble",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category label: a single line or several lines rendered stacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Single(String),
    MultiLine(Vec<String>),
}

impl Label {
    /// Single-line form, multi-line labels joined with a space.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(text) => text.clone(),
            Self::MultiLine(lines) => lines.join(" "),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for Label {
    fn from(value: Vec<String>) -> Self {
        Self::MultiLine(value)
    }
}
