pub mod dataset;
pub mod normalize;
pub mod options;
pub mod types;

pub use dataset::{Dataset, StyleSpec};
pub use normalize::{DataSource, SeriesInput, default_label, normalize_datasets};
pub use options::{OptionsTree, merge_options, option_at, set_option};
pub use types::{ChartKind, DataPoint, Label, Viewport};
