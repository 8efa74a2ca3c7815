mod controller;
mod error;
mod registry;


pub use controller::SequencePositionController;
pub use error::{NavigationError, ObserverError, Result};
pub use registry::{Observer, SubscriptionId, SubscriptionRegistry};
