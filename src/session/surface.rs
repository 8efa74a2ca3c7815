use std::cell::Cell;

use ndarray::Array2;

use crate::navigation::ObserverError;
use crate::viewer::{ColorRange, DisplaySurface};

/// Headless display that only counts what a real canvas would draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frames_shown: Cell<usize>,
    last_range: Cell<Option<ColorRange>>,
}

impl RecordingSurface {
    pub fn frames_shown(&self) -> usize {
        self.frames_shown.get()
    }

    pub fn last_range(&self) -> Option<ColorRange> {
        self.last_range.get()
    }
}

impl DisplaySurface for RecordingSurface {
    fn show_frame(&self, _frame: Array2<f64>) -> Result<(), ObserverError> {
        self.frames_shown.set(self.frames_shown.get() + 1);
        Ok(())
    }

    fn set_color_range(&self, range: ColorRange) -> Result<(), ObserverError> {
        self.last_range.set(Some(range));
        Ok(())
    }
}
