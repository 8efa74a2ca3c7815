use ndarray::Array2;

use crate::navigation::ObserverError;

use super::ColorRange;

/// Seam to the host toolkit: whatever draws the image and its color bar.
pub trait DisplaySurface {
    fn show_frame(&self, frame: Array2<f64>) -> Result<(), ObserverError>;

    fn set_color_range(&self, range: ColorRange) -> Result<(), ObserverError>;
}
