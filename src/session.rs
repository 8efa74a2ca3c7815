mod error;
mod execute;
mod io;
mod report;
mod spec;
mod surface;


pub use error::{Result, SessionError};
pub use execute::run_session;
pub use io::{load_session, save_report};
pub use report::{SessionReport, StepReport};
pub use spec::{Action, DisplayBounds, Fill, NavigationSettings, SessionSpec, StackSource};
pub use surface::RecordingSurface;
