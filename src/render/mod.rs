mod null_backend;

pub use null_backend::{NullBackend, NullBackendStats, NullChart};

use serde::{Deserialize, Serialize};

use crate::api::{ChartConfig, PluginRegistry};
use crate::error::ChartResult;

/// Per-dataset runtime state owned by a live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub hidden: bool,
}

/// Contract implemented by any chart engine the binding drives.
///
/// Construction receives a fully reconciled `ChartConfig`; the backend never
/// sees raw host inputs.
pub trait ChartBackend {
    type Surface;
    type Instance: ChartInstance;

    fn create(
        &mut self,
        surface: &Self::Surface,
        config: &ChartConfig,
        plugins: &PluginRegistry,
    ) -> ChartResult<Self::Instance>;
}

/// A live, rendered chart.
pub trait ChartInstance {
    /// Redraws using the (possibly patched) configuration.
    fn update(&mut self, config: &ChartConfig) -> ChartResult<()>;

    /// Releases the instance. Called exactly once, before any replacement is built.
    fn destroy(&mut self);

    fn dataset_meta(&self, index: usize) -> Option<DatasetMeta>;

    fn set_dataset_hidden(&mut self, index: usize, hidden: bool) -> ChartResult<()>;

    fn generate_legend(&mut self, config: &ChartConfig) -> String;

    fn to_base64_image(&self) -> ChartResult<String>;
}
