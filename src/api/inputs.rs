use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, DataSource, Dataset, Label, OptionsTree, SeriesInput, StyleSpec};
use crate::error::{ChartError, ChartResult};

use super::PluginDescriptor;

/// Declarative chart inputs as provided by the host component.
///
/// Serializable so a host can keep chart declarations in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInputs {
    #[serde(rename = "chartType", default)]
    pub kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SeriesInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<Dataset>>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub options: OptionsTree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<StyleSpec>>,
    #[serde(default = "default_legend")]
    pub legend: bool,
    #[serde(default)]
    pub plugins: Vec<PluginDescriptor>,
}

fn default_legend() -> bool {
    true
}

impl Default for ChartInputs {
    fn default() -> Self {
        Self::new(ChartKind::default())
    }
}

impl ChartInputs {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            data: None,
            datasets: None,
            labels: Vec::new(),
            options: OptionsTree::new(),
            colors: None,
            legend: default_legend(),
            plugins: Vec::new(),
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart inputs: {e}")))
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: SeriesInput) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_datasets(mut self, datasets: Vec<Dataset>) -> Self {
        self.datasets = Some(datasets);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: OptionsTree) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<StyleSpec>) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: Vec<PluginDescriptor>) -> Self {
        self.plugins = plugins;
        self
    }

    /// Explicit datasets, unless the list is absent or empty.
    #[must_use]
    pub fn explicit_datasets(&self) -> Option<&[Dataset]> {
        self.datasets
            .as_deref()
            .filter(|datasets| !datasets.is_empty())
    }

    /// Source used by a full build: non-empty explicit datasets win over raw data.
    #[must_use]
    pub fn build_source(&self) -> Option<DataSource<'_>> {
        self.explicit_datasets()
            .map(DataSource::Datasets)
            .or_else(|| self.data.as_ref().map(SeriesInput::as_source))
    }

    /// Source used by an incremental patch: raw data wins when it changed.
    #[must_use]
    pub fn patch_source(&self, data_changed: bool) -> Option<DataSource<'_>> {
        match &self.data {
            Some(data) if data_changed => Some(data.as_source()),
            _ => self.build_source(),
        }
    }

    #[must_use]
    pub fn colors(&self) -> Option<&[StyleSpec]> {
        self.colors.as_deref()
    }
}

/// Top-level input tracked for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Kind,
    Data,
    Datasets,
    Labels,
    Options,
    Colors,
    Legend,
    Plugins,
}

impl InputField {
    pub const ALL: [Self; 8] = [
        Self::Kind,
        Self::Data,
        Self::Datasets,
        Self::Labels,
        Self::Options,
        Self::Colors,
        Self::Legend,
        Self::Plugins,
    ];

    fn differs(self, previous: &ChartInputs, current: &ChartInputs) -> bool {
        match self {
            Self::Kind => previous.kind != current.kind,
            Self::Data => previous.data != current.data,
            Self::Datasets => previous.datasets != current.datasets,
            Self::Labels => previous.labels != current.labels,
            Self::Options => previous.options != current.options,
            Self::Colors => previous.colors != current.colors,
            Self::Legend => previous.legend != current.legend,
            Self::Plugins => previous.plugins != current.plugins,
        }
    }
}

/// Fields that changed between two input generations.
///
/// Borrows both generations, so previous and current values stay reachable
/// for exactly one reconciliation cycle.
#[derive(Debug, Clone, Copy)]
pub struct ChangeSet<'a> {
    pub previous: &'a ChartInputs,
    pub current: &'a ChartInputs,
    changed: [bool; InputField::ALL.len()],
}

impl<'a> ChangeSet<'a> {
    #[must_use]
    pub fn between(previous: &'a ChartInputs, current: &'a ChartInputs) -> Self {
        let mut changed = [false; InputField::ALL.len()];
        for (slot, field) in changed.iter_mut().zip(InputField::ALL) {
            *slot = field.differs(previous, current);
        }
        Self {
            previous,
            current,
            changed,
        }
    }

    #[must_use]
    pub fn contains(&self, field: InputField) -> bool {
        self.changed[field as usize]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.changed.iter().any(|changed| *changed)
    }

    pub fn fields(&self) -> impl Iterator<Item = InputField> + '_ {
        InputField::ALL
            .into_iter()
            .filter(|field| self.contains(*field))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeSet, ChartInputs, InputField};
    use crate::core::{ChartKind, DataPoint, DataSource, Label, SeriesInput};

    #[test]
    fn inputs_decode_with_defaults() {
        let inputs = ChartInputs::from_json_str(
            r#"{"chartType": "bar", "data": [[1, 2], [3, 4]], "labels": ["a", ["b", "c"]]}"#,
        )
        .expect("parse inputs");

        assert_eq!(inputs.kind, ChartKind::Bar);
        assert!(inputs.legend);
        assert!(inputs.datasets.is_none());
        assert_eq!(
            inputs.labels,
            vec![
                Label::from("a"),
                Label::MultiLine(vec!["b".to_owned(), "c".to_owned()])
            ]
        );
        assert!(matches!(inputs.data, Some(SeriesInput::Multi(ref series)) if series.len() == 2));
    }

    #[test]
    fn change_set_lists_changed_fields_in_order() {
        let previous = ChartInputs::new(ChartKind::Line)
            .with_data(SeriesInput::Single(vec![DataPoint::value(1.0)]));
        let current = previous
            .clone()
            .with_legend(false)
            .with_kind(ChartKind::Bar);

        let changes = ChangeSet::between(&previous, &current);
        let fields: Vec<InputField> = changes.fields().collect();
        assert_eq!(fields, vec![InputField::Kind, InputField::Legend]);
        assert!(!changes.contains(InputField::Data));
        assert!(ChangeSet::between(&previous, &previous).is_empty());
    }

    #[test]
    fn empty_datasets_fall_back_to_raw_data() {
        let points = vec![DataPoint::value(1.0)];
        let inputs = ChartInputs::new(ChartKind::Line)
            .with_data(SeriesInput::Single(points.clone()))
            .with_datasets(Vec::new());

        assert!(inputs.explicit_datasets().is_none());
        assert_eq!(inputs.build_source(), Some(DataSource::Single(&points)));
        assert_eq!(inputs.patch_source(false), Some(DataSource::Single(&points)));
        let without_data = ChartInputs::new(ChartKind::Line).with_datasets(Vec::new());
        assert!(without_data.build_source().is_none());
    }
}
