use std::fmt;
use std::rc::{Rc, Weak};

use ndarray::{Array2, ArrayD, ArrayView2};

use crate::model::{ImageStack, Pixel, PixelType, StackData};
use crate::navigation::{
    NavigationError, ObserverError, SequencePositionController, SubscriptionId,
};

use super::{ColorRange, DisplaySurface, Result, ViewerError, format_readout, pixel_index};

/// Image stack, display range and color selection of one viewer, composed
/// with the position controller that drives stack navigation.
pub struct ViewerState {
    stack: Option<Rc<ImageStack>>,
    display_range: ColorRange,
    selected_range: ColorRange,
    navigator: Option<Rc<SequencePositionController>>,
    time_step: i64,
    surface: Option<Rc<dyn DisplaySurface>>,
    refresh_subscription: Option<SubscriptionId>,
}

impl fmt::Debug for ViewerState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ViewerState")
            .field("stack", &self.stack.as_ref().map(|stack| stack.frame_count()))
            .field("display_range", &self.display_range)
            .field("selected_range", &self.selected_range)
            .field("navigator", &self.navigator)
            .field("time_step", &self.time_step)
            .field("surface_attached", &self.surface.is_some())
            .finish()
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        let unit = ColorRange::new(0.0, 1.0);
        Self {
            stack: None,
            display_range: unit,
            selected_range: unit,
            navigator: None,
            time_step: 1,
            surface: None,
            refresh_subscription: None,
        }
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step size used by the controller of every stack loaded afterwards.
    pub fn with_time_step(time_step: i64) -> Result<Self> {
        if time_step <= 0 {
            return Err(NavigationError::InvalidStep(time_step).into());
        }
        Ok(Self {
            time_step,
            ..Self::default()
        })
    }

    /// Replaces the viewed data. Missing display bounds default to the
    /// element type's representable range. Nothing changes on failure.
    pub fn load_stack<T: Pixel>(
        &mut self,
        data: ArrayD<T>,
        display_min: Option<f64>,
        display_max: Option<f64>,
    ) -> Result<()> {
        let ndim = data.ndim();
        if !(2..=3).contains(&ndim) {
            return Err(ViewerError::UnsupportedRank { ndim });
        }

        let (natural_min, natural_max) = T::PIXEL_TYPE.natural_range();
        let display = ColorRange::new(
            display_min.unwrap_or(natural_min),
            display_max.unwrap_or(natural_max),
        );
        if !display.min.is_finite() || !display.max.is_finite() || display.min > display.max {
            return Err(ViewerError::InvalidDisplayRange {
                min: display.min,
                max: display.max,
            });
        }

        let stack = Rc::new(ImageStack::from_array(data)?);
        let navigator = if stack.is_sequence() {
            let max_time = stack.frame_count() as i64 - 1;
            Some(Rc::new(SequencePositionController::new(
                0,
                max_time,
                self.time_step,
            )?))
        } else {
            None
        };

        log::debug!(
            "loaded {}-D {:?} stack with {} frame(s), display range [{}, {}]",
            stack.ndim(),
            stack.pixel_type(),
            stack.frame_count(),
            display.min,
            display.max
        );

        if let (Some(previous), Some(id)) = (&self.navigator, self.refresh_subscription.take()) {
            previous.unsubscribe(id)?;
        }
        self.stack = Some(stack);
        self.display_range = display;
        self.selected_range = display;
        self.navigator = navigator;
        self.connect_surface()
    }

    pub fn stack(&self) -> Option<&ImageStack> {
        self.stack.as_deref()
    }

    pub fn pixel_type(&self) -> Option<PixelType> {
        self.stack.as_ref().map(|stack| stack.pixel_type())
    }

    pub fn frame_count(&self) -> usize {
        self.stack.as_ref().map_or(0, |stack| stack.frame_count())
    }

    pub fn frame_shape(&self) -> Option<(usize, usize)> {
        self.stack.as_ref().map(|stack| stack.frame_shape())
    }

    /// Shared handle to the controller; present only for 3-D stacks.
    pub fn navigator(&self) -> Option<Rc<SequencePositionController>> {
        self.navigator.clone()
    }

    pub fn position(&self) -> Option<i64> {
        self.navigator.as_ref().map(|navigator| navigator.position())
    }

    pub fn display_range(&self) -> ColorRange {
        self.display_range
    }

    pub fn selected_range(&self) -> ColorRange {
        self.selected_range
    }

    /// Owned floating-point copy of a frame. Sequences use `index` (negative
    /// values count from the end) or the current position; a single frame
    /// ignores `index`.
    pub fn current_frame(&self, index: Option<isize>) -> Result<Array2<f64>> {
        let stack = self.stack.as_ref().ok_or(ViewerError::NoStack)?;
        let frame = match (stack.data(), index) {
            (StackData::Single(frame), _) => frame.view(),
            (StackData::Sequence(_), Some(index)) => {
                let resolved = resolve_index(index, stack.frame_count())?;
                stack
                    .frame(resolved)
                    .ok_or(ViewerError::FrameOutOfRange {
                        index,
                        frame_count: stack.frame_count(),
                    })?
            }
            (StackData::Sequence(_), None) => {
                self.displayed_frame().ok_or(ViewerError::NoStack)?
            }
        };
        Ok(frame.to_owned())
    }

    fn displayed_frame(&self) -> Option<ArrayView2<'_, f64>> {
        let stack = self.stack.as_ref()?;
        let position = self.position().unwrap_or(0);
        stack.frame(usize::try_from(position).ok()?)
    }

    /// Narrows the selected range to the fractional sub-interval
    /// `[low, high]` of the current selection. Fractions are clamped to
    /// `[0, 1]` first; equal fractions restore the full display range.
    pub fn update_color_range(&mut self, low: f64, high: f64) -> Result<()> {
        if low.is_nan() || high.is_nan() {
            return Err(ViewerError::InvalidFraction { low, high });
        }
        let low = low.clamp(0.0, 1.0);
        let high = high.clamp(0.0, 1.0);
        if low == high {
            self.selected_range = self.display_range;
        } else {
            let (low, high) = if low <= high { (low, high) } else { (high, low) };
            self.selected_range = self.selected_range.narrow(low, high);
        }
        log::debug!(
            "selected color range [{}, {}]",
            self.selected_range.min,
            self.selected_range.max
        );
        if let Some(surface) = &self.surface {
            surface
                .set_color_range(self.selected_range)
                .map_err(ViewerError::Surface)?;
        }
        Ok(())
    }

    /// Intensity under the cursor, or `None` when it is off the image.
    pub fn frame_value_at(&self, x: f64, y: f64) -> Option<f64> {
        let (row, column) = pixel_index(x, y)?;
        self.displayed_frame()?.get((row, column)).copied()
    }

    pub fn format_coord(&self, x: f64, y: f64) -> String {
        format_readout(x, y, self.frame_value_at(x, y))
    }

    /// Attaches the host display. It immediately receives the current frame
    /// and color range, then a new frame after every effective move.
    pub fn attach_surface(&mut self, surface: Rc<dyn DisplaySurface>) -> Result<()> {
        self.detach_surface()?;
        self.surface = Some(surface);
        self.connect_surface()
    }

    pub fn detach_surface(&mut self) -> Result<Option<Rc<dyn DisplaySurface>>> {
        if let (Some(navigator), Some(id)) = (&self.navigator, self.refresh_subscription.take()) {
            navigator.unsubscribe(id)?;
        }
        Ok(self.surface.take())
    }

    fn connect_surface(&mut self) -> Result<()> {
        let (Some(surface), Some(stack)) = (self.surface.clone(), self.stack.clone()) else {
            return Ok(());
        };

        if let Some(navigator) = self.navigator.clone() {
            let refresh = frame_refresh(stack, Rc::downgrade(&navigator), Rc::clone(&surface));
            self.refresh_subscription = Some(navigator.subscribe(refresh));
        }

        if let Some(frame) = self.displayed_frame() {
            surface
                .show_frame(frame.to_owned())
                .map_err(ViewerError::Surface)?;
        }
        surface
            .set_color_range(self.selected_range)
            .map_err(ViewerError::Surface)
    }
}

fn resolve_index(index: isize, frame_count: usize) -> Result<usize> {
    let count = frame_count as isize;
    let resolved = if index < 0 { count + index } else { index };
    if (0..count).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(ViewerError::FrameOutOfRange { index, frame_count })
    }
}

fn frame_refresh(
    stack: Rc<ImageStack>,
    navigator: Weak<SequencePositionController>,
    surface: Rc<dyn DisplaySurface>,
) -> impl Fn() -> std::result::Result<(), ObserverError> + 'static {
    move || {
        let Some(navigator) = navigator.upgrade() else {
            return Ok(());
        };
        let position = navigator.position();
        let frame = usize::try_from(position)
            .ok()
            .and_then(|index| stack.frame(index))
            .ok_or_else(|| ObserverError::new(format!("no frame at position {position}")))?;
        surface.show_frame(frame.to_owned())
    }
}
