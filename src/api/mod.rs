//! Reconciliation between host inputs and a live chart engine instance.

mod binding;
mod change_classifier;
mod config;
mod inputs;
mod json_contract;
mod plugin_registry;
mod theme;

pub use binding::{ChartBinding, Reconciliation};
pub use change_classifier::{Patch, ReconcilePlan, apply_patch, classify};
pub use config::{ChartConfig, build_chart_config};
pub use inputs::{ChangeSet, ChartInputs, InputField};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
pub use plugin_registry::{PluginDescriptor, PluginRegistry};
pub use theme::{ThemeService, ThemeSubscription};
