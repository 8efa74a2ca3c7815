use thiserror::Error;

use crate::model::ModelError;
use crate::navigation::{NavigationError, ObserverError};

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("dimensions cannot be greater than 3 or fewer than 2, got {ndim}")]
    UnsupportedRank { ndim: usize },

    #[error("invalid display range [{min}, {max}]")]
    InvalidDisplayRange { min: f64, max: f64 },

    #[error("color range fractions must be numbers, got ({low}, {high})")]
    InvalidFraction { low: f64, high: f64 },

    #[error("no image stack loaded")]
    NoStack,

    #[error("frame index {index} out of range for {frame_count} frame(s)")]
    FrameOutOfRange { index: isize, frame_count: usize },

    #[error("display surface failure: {0}")]
    Surface(#[source] ObserverError),

    #[error("image data error: {0}")]
    Model(#[from] ModelError),

    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),
}
