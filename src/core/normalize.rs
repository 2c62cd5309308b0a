use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartKind, DataPoint, Dataset, Label, StyleSpec};
use crate::error::{ChartError, ChartResult};
use crate::style::assign_style;

/// Host-declared raw series: one flat series or several.
///
/// JSON decoding probes the shape once: an array whose elements are arrays is
/// multi-series, anything else is a single series. An empty array decodes as
/// an empty single series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawSeriesInput")]
pub enum SeriesInput {
    Multi(Vec<Vec<DataPoint>>),
    Single(Vec<DataPoint>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeriesInput {
    Multi(Vec<Vec<DataPoint>>),
    Single(Vec<DataPoint>),
}

impl From<RawSeriesInput> for SeriesInput {
    fn from(raw: RawSeriesInput) -> Self {
        match raw {
            RawSeriesInput::Multi(series) if series.is_empty() => Self::Single(Vec::new()),
            RawSeriesInput::Multi(series) => Self::Multi(series),
            RawSeriesInput::Single(points) => Self::Single(points),
        }
    }
}

impl SeriesInput {
    #[must_use]
    pub fn as_source(&self) -> DataSource<'_> {
        match self {
            Self::Multi(series) => DataSource::MultiSeries(series),
            Self::Single(points) => DataSource::Single(points),
        }
    }
}

/// Borrowed view of whichever input feeds normalization this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataSource<'a> {
    Single(&'a [DataPoint]),
    MultiSeries(&'a [Vec<DataPoint>]),
    Datasets(&'a [Dataset]),
}

/// Reconciles `source` into the canonical dataset list `existing`.
///
/// Same-length inputs patch `existing` in place; explicit datasets replace
/// `data` and (when non-empty) `label`, flat series replace only `data`.
/// Length mismatches rebuild the list. A single series only ever writes the
/// first dataset. Color entries are applied afterwards on every call; a
/// non-empty color list replaces generated styles entirely, so datasets past
/// its end keep only their own style fields.
pub fn normalize_datasets(
    kind: ChartKind,
    source: Option<DataSource<'_>>,
    mut existing: Vec<Dataset>,
    labels: &[Label],
    colors: Option<&[StyleSpec]>,
) -> ChartResult<Vec<Dataset>> {
    let Some(source) = source else {
        return Err(ChartError::Configuration { kind });
    };

    match source {
        DataSource::Datasets(incoming) if incoming.len() == existing.len() => {
            debug!(kind = %kind, count = incoming.len(), "patch explicit datasets in place");
            for (current, update) in existing.iter_mut().zip(incoming) {
                current.data = update.data.clone();
                if let Some(label) = update.label_text() {
                    current.label = Some(label.to_owned());
                }
            }
        }
        DataSource::Datasets(incoming) => {
            debug!(
                kind = %kind,
                previous = existing.len(),
                count = incoming.len(),
                "adopt explicit datasets"
            );
            existing = incoming.to_vec();
        }
        DataSource::MultiSeries(series) if series.len() == existing.len() => {
            debug!(kind = %kind, count = series.len(), "patch series data in place");
            for (current, points) in existing.iter_mut().zip(series) {
                current.data = points.clone();
            }
        }
        DataSource::MultiSeries(series) => {
            debug!(
                kind = %kind,
                previous = existing.len(),
                count = series.len(),
                "rebuild datasets from series"
            );
            existing = series
                .iter()
                .enumerate()
                .map(|(index, points)| {
                    Dataset::new(points.clone()).with_label(default_label(index, labels))
                })
                .collect();
        }
        DataSource::Single(points) => match existing.first_mut() {
            Some(first) => first.data = points.to_vec(),
            None => existing.push(Dataset::new(points.to_vec())),
        },
    }

    if existing.is_empty() {
        return Err(ChartError::Configuration { kind });
    }

    let colors = colors.filter(|colors| !colors.is_empty());
    for (index, dataset) in existing.iter_mut().enumerate() {
        if dataset.label_text().is_none() {
            dataset.label = Some(default_label(index, labels));
        }
        match colors {
            Some(colors) => {
                if let Some(style) = colors.get(index) {
                    dataset.overlay_style(style);
                }
            }
            None => dataset.fill_style(assign_style(kind, index, dataset.data.len())),
        }
    }

    Ok(existing)
}

/// Positional label (joined if multi-line) or `Label {index}`.
#[must_use]
pub fn default_label(index: usize, labels: &[Label]) -> String {
    labels
        .get(index)
        .map(Label::joined)
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| format!("Label {index}"))
}
