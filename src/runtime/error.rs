use crate::session::SessionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session service error: {0}")]
    Session(#[from] SessionError),
}
