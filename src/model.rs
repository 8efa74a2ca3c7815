mod error;
mod pixel;
mod stack;


pub use error::{ModelError, Result};
pub use pixel::{Pixel, PixelType};
pub use stack::{ImageStack, StackData};
