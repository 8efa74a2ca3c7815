use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("image data must have 2 or 3 dimensions, got {ndim}")]
    UnsupportedRank { ndim: usize },

    #[error("image stack contains no frames")]
    EmptyStack,

    #[error("array shape failure: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
