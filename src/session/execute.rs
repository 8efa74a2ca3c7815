use std::rc::Rc;
use std::time::Instant;

use crate::model::PixelType;
use crate::viewer::{ColorRange, ViewerState};

use super::{
    Action, DisplayBounds, RecordingSurface, Result, SessionReport, SessionSpec, StackSource,
    StepReport,
};

pub fn run_session(spec: &SessionSpec) -> Result<SessionReport> {
    spec.validate()?;

    let mut viewer = ViewerState::with_time_step(spec.navigation.time_step)?;
    let surface = Rc::new(RecordingSurface::default());
    viewer.attach_surface(surface.clone())?;
    load_source(&mut viewer, &spec.stack, spec.display)?;

    log::info!(
        "session {} started: {:?} {:?} stack, {} action(s)",
        spec.name.as_deref().unwrap_or("<unnamed>"),
        spec.stack.shape,
        spec.stack.pixel_type,
        spec.actions.len()
    );

    let mut steps = Vec::with_capacity(spec.actions.len());
    for action in &spec.actions {
        let started = Instant::now();
        let frames_before = surface.frames_shown();
        let readout = apply_action(&mut viewer, action)?;
        steps.push(StepReport {
            action: action.clone(),
            position: viewer.position(),
            selected_range: viewer.selected_range(),
            readout,
            redraws: surface.frames_shown() - frames_before,
            duration_us: started.elapsed().as_micros() as u64,
        });
    }

    let report = SessionReport {
        session_name: spec.name.clone(),
        shape: spec.stack.shape.clone(),
        pixel_type: spec.stack.pixel_type,
        frame_count: viewer.frame_count(),
        display_range: viewer.display_range(),
        data_range: viewer
            .stack()
            .and_then(|stack| stack.min_max())
            .map(|(min, max)| ColorRange::new(min, max)),
        steps,
        final_position: viewer.position(),
        final_selected_range: viewer.selected_range(),
    };
    log::info!(
        "session finished at position {:?}, {} redraw(s)",
        report.final_position,
        surface.frames_shown()
    );
    Ok(report)
}

fn load_source(
    viewer: &mut ViewerState,
    source: &StackSource,
    display: DisplayBounds,
) -> Result<()> {
    let (min, max) = (display.min, display.max);
    match source.pixel_type {
        PixelType::U8 => viewer.load_stack(source.build::<u8>()?, min, max)?,
        PixelType::U16 => viewer.load_stack(source.build::<u16>()?, min, max)?,
        PixelType::U32 => viewer.load_stack(source.build::<u32>()?, min, max)?,
        PixelType::I8 => viewer.load_stack(source.build::<i8>()?, min, max)?,
        PixelType::I16 => viewer.load_stack(source.build::<i16>()?, min, max)?,
        PixelType::I32 => viewer.load_stack(source.build::<i32>()?, min, max)?,
        PixelType::F32 => viewer.load_stack(source.build::<f32>()?, min, max)?,
        PixelType::F64 => viewer.load_stack(source.build::<f64>()?, min, max)?,
    }
    Ok(())
}

/// Returns the coordinate readout for probes.
fn apply_action(viewer: &mut ViewerState, action: &Action) -> Result<Option<String>> {
    match action {
        Action::ColorRange { low, high } => viewer.update_color_range(*low, *high)?,
        Action::Probe { x, y } => return Ok(Some(viewer.format_coord(*x, *y))),
        navigation => match viewer.navigator() {
            Some(navigator) => {
                match navigation {
                    Action::MoveTo { value } => navigator.move_to(*value)?,
                    Action::Begin => navigator.begin()?,
                    Action::End => navigator.end()?,
                    Action::StepForward => navigator.step_forward()?,
                    Action::StepBackward => navigator.step_backward()?,
                    Action::ColorRange { .. } | Action::Probe { .. } => false,
                };
            }
            None => log::debug!("ignoring {navigation}: single frame has no time axis"),
        },
    }
    Ok(None)
}
