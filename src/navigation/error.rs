use thiserror::Error;

use super::SubscriptionId;

pub type Result<T> = std::result::Result<T, NavigationError>;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid time bounds: min_time {min_time} is greater than max_time {max_time}")]
    InvalidBounds { min_time: i64, max_time: i64 },

    #[error("time step must be positive, got {0}")]
    InvalidStep(i64),

    #[error("unknown subscription id {0}")]
    UnknownSubscription(SubscriptionId),

    #[error("position observer {id} failed: {source}")]
    Observer {
        id: SubscriptionId,
        #[source]
        source: ObserverError,
    },
}

/// Failure reported by a position observer or display surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
