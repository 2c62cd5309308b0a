use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::normalize_datasets;
use crate::error::ChartResult;

use super::{ChangeSet, ChartConfig, InputField};

/// In-place edit applied to a live configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Patch {
    /// Renormalize datasets from `data` or `datasets`.
    Datasets,
    /// Replace the category label sequence.
    Labels,
    /// Toggle legend visibility and regenerate the legend.
    Legend,
}

/// Outcome of classifying one change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcilePlan {
    /// Patch the live configuration and redraw once.
    Incremental(Vec<Patch>),
    /// Destroy the live instance and build a new one.
    Rebuild,
}

/// Decides whether `changes` can be patched into the live chart.
///
/// Any patchable field makes the whole cycle incremental, even when other
/// fields changed too; changes to kind, options, colors or plugins alone
/// always rebuild.
#[must_use]
pub fn classify(changes: &ChangeSet<'_>) -> ReconcilePlan {
    let mut patches = Vec::new();
    if changes.contains(InputField::Data) || changes.contains(InputField::Datasets) {
        patches.push(Patch::Datasets);
    }
    if changes.contains(InputField::Labels) {
        patches.push(Patch::Labels);
    }
    if changes.contains(InputField::Legend) {
        patches.push(Patch::Legend);
    }

    if patches.is_empty() {
        ReconcilePlan::Rebuild
    } else {
        ReconcilePlan::Incremental(patches)
    }
}

/// Applies one patch to `config`.
///
/// Dataset patches normalize a copy, so `config` is untouched on error.
pub fn apply_patch(
    config: &mut ChartConfig,
    patch: Patch,
    changes: &ChangeSet<'_>,
) -> ChartResult<()> {
    let inputs = changes.current;
    match patch {
        Patch::Datasets => {
            let source = inputs.patch_source(changes.contains(InputField::Data));
            config.datasets = normalize_datasets(
                inputs.kind,
                source,
                config.datasets.clone(),
                &inputs.labels,
                inputs.colors(),
            )?;
        }
        Patch::Labels => config.labels = inputs.labels.clone(),
        Patch::Legend => config.set_legend_display(inputs.legend),
    }
    trace!(?patch, datasets = config.datasets.len(), "applied patch");
    Ok(())
}
