use serde_json::Value;

use crate::core::{ChartKind, StyleSpec};
use crate::style::Color;

/// Base colors handed out by dataset (or point) index before generation kicks in.
pub const BASE_PALETTE: [Color; 12] = [
    Color::rgb(255, 99, 132),
    Color::rgb(54, 162, 235),
    Color::rgb(255, 206, 86),
    Color::rgb(231, 233, 237),
    Color::rgb(75, 192, 192),
    Color::rgb(151, 187, 205),
    Color::rgb(220, 220, 220),
    Color::rgb(247, 70, 74),
    Color::rgb(70, 191, 189),
    Color::rgb(253, 180, 92),
    Color::rgb(148, 159, 177),
    Color::rgb(77, 83, 96),
];

const GOLDEN_ANGLE_DEG: f64 = 137.507_764;
const WHITE: &str = "#fff";

/// Attribute layout a chart kind expects for its datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    /// One color per dataset, stroked with point markers.
    Line,
    /// One color per dataset, filled bars.
    Bar,
    /// One color per data point, white separators.
    Pie,
    /// One color per data point, colored separators.
    PolarArea,
}

impl StyleFamily {
    #[must_use]
    pub const fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Bar | ChartKind::HorizontalBar => Self::Bar,
            ChartKind::Pie | ChartKind::Doughnut => Self::Pie,
            ChartKind::PolarArea => Self::PolarArea,
            ChartKind::Line | ChartKind::Radar | ChartKind::Bubble | ChartKind::Scatter => {
                Self::Line
            }
        }
    }
}

/// Color for `index`: the base palette first, then golden-angle hue rotation.
#[must_use]
pub fn palette_color(index: usize) -> Color {
    if let Some(color) = BASE_PALETTE.get(index) {
        return *color;
    }
    let step = (index - BASE_PALETTE.len()) as f64;
    Color::from_hsl(step * GOLDEN_ANGLE_DEG, 0.65, 0.55).unwrap_or(BASE_PALETTE[0])
}

/// Default style for dataset `index` of a `kind` chart holding `point_count` points.
#[must_use]
pub fn assign_style(kind: ChartKind, index: usize, point_count: usize) -> StyleSpec {
    match StyleFamily::for_kind(kind) {
        StyleFamily::Line => line_style(palette_color(index)),
        StyleFamily::Bar => bar_style(palette_color(index)),
        StyleFamily::Pie => pie_style(point_colors(point_count)),
        StyleFamily::PolarArea => polar_area_style(point_colors(point_count)),
    }
}

fn point_colors(point_count: usize) -> Vec<Color> {
    (0..point_count).map(palette_color).collect()
}

fn rgba_list(colors: &[Color], alpha: f64) -> Value {
    Value::Array(
        colors
            .iter()
            .map(|color| Value::String(color.css_rgba(alpha)))
            .collect(),
    )
}

fn white_list(len: usize) -> Value {
    Value::Array(vec![Value::String(WHITE.to_owned()); len])
}

fn style(entries: Vec<(&str, Value)>) -> StyleSpec {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

fn line_style(color: Color) -> StyleSpec {
    style(vec![
        ("backgroundColor", Value::from(color.css_rgba(0.4))),
        ("borderColor", Value::from(color.css_rgba(1.0))),
        ("pointBackgroundColor", Value::from(color.css_rgba(1.0))),
        ("pointBorderColor", Value::from(WHITE)),
        ("pointHoverBackgroundColor", Value::from(WHITE)),
        ("pointHoverBorderColor", Value::from(color.css_rgba(0.8))),
    ])
}

fn bar_style(color: Color) -> StyleSpec {
    style(vec![
        ("backgroundColor", Value::from(color.css_rgba(0.6))),
        ("borderColor", Value::from(color.css_rgba(1.0))),
        ("hoverBackgroundColor", Value::from(color.css_rgba(0.8))),
        ("hoverBorderColor", Value::from(color.css_rgba(1.0))),
    ])
}

fn pie_style(colors: Vec<Color>) -> StyleSpec {
    style(vec![
        ("backgroundColor", rgba_list(&colors, 0.6)),
        ("borderColor", white_list(colors.len())),
        ("pointBackgroundColor", rgba_list(&colors, 1.0)),
        ("pointBorderColor", white_list(colors.len())),
        ("pointHoverBackgroundColor", rgba_list(&colors, 1.0)),
        ("pointHoverBorderColor", rgba_list(&colors, 0.8)),
    ])
}

fn polar_area_style(colors: Vec<Color>) -> StyleSpec {
    style(vec![
        ("backgroundColor", rgba_list(&colors, 0.6)),
        ("borderColor", rgba_list(&colors, 1.0)),
        ("hoverBackgroundColor", rgba_list(&colors, 0.8)),
        ("hoverBorderColor", rgba_list(&colors, 1.0)),
    ])
}
