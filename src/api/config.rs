use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{
    ChartKind, Dataset, Label, OptionsTree, merge_options, normalize_datasets, option_at,
    set_option,
};
use crate::error::ChartResult;

use super::{ChartInputs, PluginDescriptor};

const LEGEND_DISPLAY: [&str; 2] = ["legend", "display"];

/// Canonical configuration handed to the chart engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub options: OptionsTree,
    #[serde(default)]
    pub plugins: Vec<PluginDescriptor>,
}

impl ChartConfig {
    /// Legend visibility recorded in the effective options (visible when unset).
    #[must_use]
    pub fn legend_display(&self) -> bool {
        option_at(&self.options, &LEGEND_DISPLAY)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn set_legend_display(&mut self, display: bool) {
        set_option(&mut self.options, &LEGEND_DISPLAY, Value::Bool(display));
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.datasets.iter().try_for_each(Dataset::validate)
    }
}

/// Builds a fresh canonical configuration from host inputs and theme overrides.
///
/// Datasets are normalized against an empty canonical list; the legend flag is
/// written into a copy of the host options before theme overrides are merged.
pub fn build_chart_config(
    inputs: &ChartInputs,
    theme_overrides: &OptionsTree,
) -> ChartResult<ChartConfig> {
    let datasets = normalize_datasets(
        inputs.kind,
        inputs.build_source(),
        Vec::new(),
        &inputs.labels,
        inputs.colors(),
    )?;

    let mut options = inputs.options.clone();
    set_option(&mut options, &LEGEND_DISPLAY, Value::Bool(inputs.legend));
    let options = merge_options(&options, theme_overrides);

    debug!(
        kind = %inputs.kind,
        datasets = datasets.len(),
        labels = inputs.labels.len(),
        "built chart config"
    );
    Ok(ChartConfig {
        kind: inputs.kind,
        datasets,
        labels: inputs.labels.clone(),
        options,
        plugins: inputs.plugins.clone(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::build_chart_config;
    use crate::api::ChartInputs;
    use crate::core::{ChartKind, DataPoint, Dataset, OptionsTree, SeriesInput};
    use crate::error::ChartError;

    fn tree(value: Value) -> OptionsTree {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn explicit_datasets_win_over_raw_data() {
        let inputs = ChartInputs::new(ChartKind::Bar)
            .with_data(SeriesInput::Single(vec![DataPoint::value(1.0)]))
            .with_datasets(vec![
                Dataset::new(vec![DataPoint::value(2.0)]).with_label("a"),
                Dataset::new(vec![DataPoint::value(3.0)]),
            ]);

        let config = build_chart_config(&inputs, &OptionsTree::new()).expect("build");
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.datasets[0].label.as_deref(), Some("a"));
        assert_eq!(config.datasets[1].label.as_deref(), Some("Label 1"));
    }

    #[test]
    fn legend_flag_and_theme_land_in_effective_options() {
        let inputs = ChartInputs::new(ChartKind::Line)
            .with_data(SeriesInput::Single(vec![DataPoint::value(1.0)]))
            .with_options(tree(json!({"legend": {"position": "top"}, "responsive": true})))
            .with_legend(false);
        let theme = tree(json!({"legend": {"labels": {"fontColor": "white"}}}));

        let config = build_chart_config(&inputs, &theme).expect("build");

        assert!(!config.legend_display());
        assert_eq!(
            Value::Object(config.options),
            json!({
                "legend": {"position": "top", "display": false, "labels": {"fontColor": "white"}},
                "responsive": true
            })
        );
        assert!(!inputs.options.contains_key("display"));
        assert_eq!(inputs.options["legend"], json!({"position": "top"}));
    }

    #[test]
    fn missing_series_fails_with_configuration_error() {
        let inputs = ChartInputs::new(ChartKind::Doughnut);
        let err = build_chart_config(&inputs, &OptionsTree::new()).expect_err("must fail");
        assert!(matches!(err, ChartError::Configuration { kind: ChartKind::Doughnut }));
    }
}
