mod context;
mod error;
mod session_service;


pub use context::AppContext;
pub use error::{AppError, Result};
pub use session_service::SessionService;
