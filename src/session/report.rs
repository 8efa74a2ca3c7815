use serde::{Deserialize, Serialize};

use crate::model::PixelType;
use crate::viewer::ColorRange;

use super::Action;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    pub action: Action,
    pub position: Option<i64>,
    pub selected_range: ColorRange,
    pub readout: Option<String>,
    pub redraws: usize,
    pub duration_us: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionReport {
    pub session_name: Option<String>,
    pub shape: Vec<usize>,
    pub pixel_type: PixelType,
    pub frame_count: usize,
    pub display_range: ColorRange,
    pub data_range: Option<ColorRange>,
    pub steps: Vec<StepReport>,
    pub final_position: Option<i64>,
    pub final_selected_range: ColorRange,
}
