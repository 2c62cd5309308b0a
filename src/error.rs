use thiserror::Error;

use crate::core::ChartKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("configuration error: data or datasets field are required to render chart {kind}")]
    Configuration { kind: ChartKind },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no live chart instance")]
    NotReady,

    #[error("drawing surface already attached")]
    AlreadyAttached,

    #[error("chart backend failure: {0}")]
    Backend(String),
}
