use std::fmt;

use ndarray::{Array, ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::model::{Pixel, PixelType};

use super::{Result, SessionError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSpec {
    pub name: Option<String>,
    pub stack: StackSource,
    #[serde(default)]
    pub display: DisplayBounds,
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Synthetic image data; sessions never read image files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackSource {
    pub shape: Vec<usize>,
    #[serde(default)]
    pub pixel_type: PixelType,
    #[serde(default)]
    pub fill: Fill,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    /// `0, 1, 2, ...` in row-major order, saturating at the type bounds.
    #[default]
    Ramp,
    Zeros,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DisplayBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NavigationSettings {
    #[serde(default = "default_time_step")]
    pub time_step: i64,
}

fn default_time_step() -> i64 {
    1
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            time_step: default_time_step(),
        }
    }
}

/// One user interaction, as the UI adapter would report it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    MoveTo { value: f64 },
    Begin,
    End,
    StepForward,
    StepBackward,
    ColorRange { low: f64, high: f64 },
    Probe { x: f64, y: f64 },
}

impl fmt::Display for Action {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo { value } => write!(formatter, "move_to({value})"),
            Self::Begin => formatter.write_str("begin"),
            Self::End => formatter.write_str("end"),
            Self::StepForward => formatter.write_str("step_forward"),
            Self::StepBackward => formatter.write_str("step_backward"),
            Self::ColorRange { low, high } => write!(formatter, "color_range({low}, {high})"),
            Self::Probe { x, y } => write!(formatter, "probe({x}, {y})"),
        }
    }
}

impl StackSource {
    /// Total element count, or a parse error when it does not fit in `usize`.
    pub fn element_count(&self) -> Result<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |count, &len| count.checked_mul(len))
            .ok_or_else(|| {
                SessionError::Parse(format!("stack shape {:?} is too large", self.shape))
            })
    }

    pub fn build<T: Pixel>(&self) -> Result<ArrayD<T>> {
        let len = self.element_count()?;
        let values = match self.fill {
            Fill::Ramp => (0..len).map(|value| T::from_f64(value as f64)).collect(),
            Fill::Zeros => vec![T::from_f64(0.0); len],
        };
        Ok(Array::from_shape_vec(IxDyn(&self.shape), values)?)
    }
}

impl SessionSpec {
    pub fn validate(&self) -> Result<()> {
        let rank = self.stack.shape.len();
        if !(2..=3).contains(&rank) {
            return Err(SessionError::Parse(format!(
                "stack shape must have 2 or 3 dimensions, got {rank}"
            )));
        }
        self.stack.element_count()?;
        if self.navigation.time_step <= 0 {
            return Err(SessionError::Parse(format!(
                "time step must be positive, got {}",
                self.navigation.time_step
            )));
        }
        if self.actions.is_empty() {
            return Err(SessionError::Parse(
                "session must include at least one action".to_string(),
            ));
        }
        for (index, action) in self.actions.iter().enumerate() {
            let finite = match action {
                Action::MoveTo { value } => !value.is_nan(),
                Action::ColorRange { low, high } => !low.is_nan() && !high.is_nan(),
                Action::Probe { x, y } => x.is_finite() && y.is_finite(),
                Action::Begin | Action::End | Action::StepForward | Action::StepBackward => true,
            };
            if !finite {
                return Err(SessionError::Parse(format!(
                    "action `{action}` at index {index} has a non-numeric argument"
                )));
            }
        }
        Ok(())
    }
}
