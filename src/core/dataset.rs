use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Visual attribute name to value, e.g. `backgroundColor` → `"rgba(...)"`.
pub type StyleSpec = IndexMap<String, Value>;

/// One series as handed to the chart engine.
///
/// Style attributes are flattened next to `data` and `label` on the wire, the
/// same shape chart engines expect for dataset objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub data: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub style: StyleSpec,
}

impl Dataset {
    #[must_use]
    pub fn new(data: Vec<DataPoint>) -> Self {
        Self {
            data,
            label: None,
            style: StyleSpec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Label if present and non-empty.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// Overlays `style` on top of the current style fields.
    pub fn overlay_style(&mut self, style: &StyleSpec) {
        for (key, value) in style {
            self.style.insert(key.clone(), value.clone());
        }
    }

    /// Fills style fields that are not set yet; existing fields win.
    pub fn fill_style(&mut self, defaults: StyleSpec) {
        for (key, value) in defaults {
            self.style.entry(key).or_insert(value);
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.label_text().is_none() {
            return Err(ChartError::InvalidData(
                "dataset label must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
