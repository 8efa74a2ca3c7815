mod color;
mod coords;
mod error;
mod state;
mod surface;

#[cfg(test)]
mod tests;

pub use color::ColorRange;
pub use coords::{format_readout, pixel_index};
pub use error::{Result, ViewerError};
pub use state::ViewerState;
pub use surface::DisplaySurface;
