//! chart-bind: reconciles declarative chart inputs with a stateful chart engine.
//!
//! Host inputs (raw series, explicit datasets, labels, colors, options) are
//! normalized into one canonical `ChartConfig`, merged with theme overrides,
//! and either patched into the live engine instance or used to rebuild it.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{ChartBinding, ChartConfig, ChartInputs};
pub use error::{ChartError, ChartResult};
