use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ndarray::{Array, Array2, ArrayD, Axis, IxDyn};

use crate::model::PixelType;
use crate::navigation::{NavigationError, ObserverError};

use super::{ColorRange, DisplaySurface, ViewerError, ViewerState, format_readout};

fn ramp(shape: &[usize]) -> ArrayD<f64> {
    let len = shape.iter().product::<usize>();
    Array::from_shape_vec(IxDyn(shape), (0..len).map(|v| v as f64).collect()).expect("shape")
}

fn stack_viewer() -> (ViewerState, ArrayD<f64>) {
    let data = ramp(&[5, 3, 4]);
    let mut viewer = ViewerState::new();
    viewer.load_stack(data.clone(), None, None).expect("load");
    (viewer, data)
}

fn frame_of(data: &ArrayD<f64>, index: usize) -> Array2<f64> {
    data.index_axis(Axis(0), index)
        .to_owned()
        .into_dimensionality()
        .expect("2-D frame")
}

#[derive(Default)]
struct RecordingSurface {
    frames: RefCell<Vec<Array2<f64>>>,
    ranges: RefCell<Vec<ColorRange>>,
    fail_frames: Cell<bool>,
}

impl DisplaySurface for RecordingSurface {
    fn show_frame(&self, frame: Array2<f64>) -> Result<(), ObserverError> {
        if self.fail_frames.get() {
            return Err(ObserverError::new("canvas gone"));
        }
        self.frames.borrow_mut().push(frame);
        Ok(())
    }

    fn set_color_range(&self, range: ColorRange) -> Result<(), ObserverError> {
        self.ranges.borrow_mut().push(range);
        Ok(())
    }
}

#[test]
fn stack_navigation_selects_frames() {
    let (viewer, data) = stack_viewer();
    let navigator = viewer.navigator().expect("navigator");
    assert_eq!(navigator.max_time(), 4);
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 0));

    navigator.move_to(2.0).expect("move");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 2));

    navigator.move_to(-1.0).expect("move");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 0));

    navigator.move_to(10.0).expect("move");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 4));
}

#[test]
fn explicit_index_overrides_position() {
    let (viewer, data) = stack_viewer();
    assert_eq!(viewer.current_frame(Some(1)).expect("frame"), frame_of(&data, 1));
    assert_eq!(viewer.current_frame(Some(-1)).expect("frame"), frame_of(&data, 4));
    assert_eq!(viewer.current_frame(Some(-5)).expect("frame"), frame_of(&data, 0));
    assert!(matches!(
        viewer.current_frame(Some(5)),
        Err(ViewerError::FrameOutOfRange {
            index: 5,
            frame_count: 5
        })
    ));
    assert!(matches!(
        viewer.current_frame(Some(-6)),
        Err(ViewerError::FrameOutOfRange { .. })
    ));
}

#[test]
fn transport_controls_walk_the_stack() {
    let (viewer, data) = stack_viewer();
    let navigator = viewer.navigator().expect("navigator");

    navigator.begin().expect("begin");
    navigator.step_backward().expect("back");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 0));

    navigator.step_forward().expect("forward");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 1));

    navigator.end().expect("end");
    navigator.step_forward().expect("forward");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 4));

    navigator.step_backward().expect("back");
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 3));
}

#[test]
fn configured_time_step_is_used_for_new_stacks() {
    let mut viewer = ViewerState::with_time_step(2).expect("viewer");
    viewer.load_stack(ramp(&[5, 3, 4]), None, None).expect("load");
    let navigator = viewer.navigator().expect("navigator");
    navigator.step_forward().expect("forward");
    assert_eq!(viewer.position(), Some(2));
    navigator.move_to(2.9).expect("move");
    assert_eq!(viewer.position(), Some(2));

    assert!(matches!(
        ViewerState::with_time_step(0),
        Err(ViewerError::Navigation(NavigationError::InvalidStep(0)))
    ));
}

#[test]
fn single_frame_ignores_index() {
    let data = ramp(&[3, 4]);
    let mut viewer = ViewerState::new();
    viewer.load_stack(data.clone(), None, None).expect("load");
    let expected = data.into_dimensionality::<ndarray::Ix2>().expect("2-D");
    assert!(viewer.navigator().is_none());
    assert_eq!(viewer.current_frame(None).expect("frame"), expected);
    assert_eq!(viewer.current_frame(Some(3)).expect("frame"), expected);
    assert_eq!(viewer.frame_shape(), Some((3, 4)));
}

#[test]
fn frames_are_float_copies() {
    let data = Array::from_shape_vec(IxDyn(&[2, 2]), vec![1_u8, 2, 3, 250]).expect("shape");
    let mut viewer = ViewerState::new();
    viewer.load_stack(data, None, None).expect("load");
    let mut frame = viewer.current_frame(None).expect("frame");
    assert_eq!(frame[[1, 1]], 250.0);
    frame[[1, 1]] = 0.5;
    assert_eq!(viewer.current_frame(None).expect("frame")[[1, 1]], 250.0);
}

#[test]
fn missing_stack_is_reported() {
    let viewer = ViewerState::new();
    assert!(matches!(viewer.current_frame(None), Err(ViewerError::NoStack)));
    assert_eq!(viewer.frame_value_at(0.0, 0.0), None);
    assert_eq!(viewer.frame_count(), 0);
}

#[test]
fn rank_four_is_rejected_without_side_effects() {
    let (mut viewer, data) = stack_viewer();
    viewer
        .navigator()
        .expect("navigator")
        .move_to(3.0)
        .expect("move");

    let error = viewer
        .load_stack(ramp(&[1, 5, 3, 4]), Some(0.0), Some(1.0))
        .expect_err("rank 4");
    assert!(matches!(error, ViewerError::UnsupportedRank { ndim: 4 }));
    assert_eq!(viewer.position(), Some(3));
    assert_eq!(viewer.current_frame(None).expect("frame"), frame_of(&data, 3));
    assert_eq!(viewer.display_range(), ColorRange::new(f64::MIN, f64::MAX));
}

#[test]
fn display_range_defaults_to_pixel_type() {
    let mut viewer = ViewerState::new();
    let bytes = Array::from_shape_vec(IxDyn(&[2, 2]), vec![0_u8; 4]).expect("shape");
    viewer.load_stack(bytes, None, None).expect("load");
    assert_eq!(viewer.pixel_type(), Some(PixelType::U8));
    assert_eq!(viewer.display_range(), ColorRange::new(0.0, 255.0));
    assert_eq!(viewer.selected_range(), ColorRange::new(0.0, 255.0));

    let words = Array::from_shape_vec(IxDyn(&[1, 2, 2]), vec![0_i16; 4]).expect("shape");
    viewer.load_stack(words, Some(-100.0), None).expect("load");
    assert_eq!(viewer.display_range(), ColorRange::new(-100.0, 32_767.0));
}

#[test]
fn inverted_display_range_is_rejected() {
    let mut viewer = ViewerState::new();
    let error = viewer
        .load_stack(ramp(&[3, 4]), Some(2.0), Some(1.0))
        .expect_err("inverted");
    assert!(matches!(error, ViewerError::InvalidDisplayRange { .. }));
    assert!(viewer.stack().is_none());
}

#[test]
fn color_range_selection_compounds() {
    let mut viewer = ViewerState::new();
    viewer.load_stack(ramp(&[3, 4]), Some(0.0), Some(1.0)).expect("load");

    viewer.update_color_range(0.0, 1.0).expect("no-op");
    assert_eq!(viewer.selected_range(), ColorRange::new(0.0, 1.0));

    viewer.update_color_range(0.25, 0.75).expect("narrow");
    let selected = viewer.selected_range();
    assert!((selected.min - 0.25).abs() < 1e-12);
    assert!((selected.max - 0.75).abs() < 1e-12);

    viewer.update_color_range(0.25, 0.75).expect("narrow again");
    let selected = viewer.selected_range();
    assert!((selected.min - 0.375).abs() < 1e-12);
    assert!((selected.max - 0.625).abs() < 1e-12);

    viewer.update_color_range(0.5, 0.5).expect("reset");
    assert_eq!(viewer.selected_range(), ColorRange::new(0.0, 1.0));
}

#[test]
fn color_range_narrows_relative_to_selection() {
    let mut viewer = ViewerState::new();
    let data = Array::from_shape_vec(
        IxDyn(&[3, 4]),
        (0..12).map(|v| v as f64 / 11.0).collect(),
    )
    .expect("shape");
    viewer.load_stack(data, Some(0.0), Some(1.0)).expect("load");

    viewer.update_color_range(0.1, 0.9).expect("narrow");
    assert_eq!(viewer.selected_range(), ColorRange::new(0.1, 0.9));

    viewer.update_color_range(0.0, 1.0).expect("no-op");
    assert_eq!(viewer.selected_range(), ColorRange::new(0.1, 0.9));

    viewer.update_color_range(0.25, 0.75).expect("narrow");
    let selected = viewer.selected_range();
    assert!((selected.min - 0.3).abs() < 1e-9);
    assert!((selected.max - 0.7).abs() < 1e-9);
}

#[test]
fn color_range_fractions_are_clamped_and_ordered() {
    let mut viewer = ViewerState::new();
    viewer.load_stack(ramp(&[3, 4]), Some(0.0), Some(100.0)).expect("load");

    viewer.update_color_range(0.8, 0.2).expect("reversed");
    assert_eq!(viewer.selected_range(), ColorRange::new(20.0, 80.0));

    viewer.update_color_range(-0.5, 1.5).expect("overshoot");
    assert_eq!(viewer.selected_range(), ColorRange::new(20.0, 80.0));

    viewer.update_color_range(1.5, 2.0).expect("both above one");
    assert_eq!(viewer.selected_range(), ColorRange::new(0.0, 100.0));

    viewer.update_color_range(0.8, 0.2).expect("reversed");
    viewer.update_color_range(-1.0, -0.1).expect("both below zero");
    assert_eq!(viewer.selected_range(), ColorRange::new(0.0, 100.0));

    assert!(matches!(
        viewer.update_color_range(f64::NAN, 0.5),
        Err(ViewerError::InvalidFraction { .. })
    ));
}

#[test]
fn unbounded_float_range_narrows_without_overflow() {
    let (mut viewer, _) = stack_viewer();
    viewer.update_color_range(0.25, 0.75).expect("narrow");
    let selected = viewer.selected_range();
    assert!(selected.min.is_finite() && selected.max.is_finite());
    assert!(selected.min < 0.0 && selected.max > 0.0);
    assert!(viewer.display_range().min < selected.min);
    assert!(selected.max < viewer.display_range().max);
}

#[test]
fn frame_value_rounds_to_nearest_pixel() {
    let mut viewer = ViewerState::new();
    viewer.load_stack(ramp(&[3, 4]), None, None).expect("load");
    assert_eq!(viewer.frame_value_at(0.2, 0.2), Some(0.0));
    assert_eq!(viewer.frame_value_at(0.8, 0.2), Some(1.0));
    assert_eq!(viewer.frame_value_at(0.2, 0.8), Some(4.0));
    assert_eq!(viewer.frame_value_at(3.0, 2.0), Some(11.0));
    assert_eq!(viewer.frame_value_at(4.0, 5.0), None);
    assert_eq!(viewer.frame_value_at(-1.0, 0.0), None);
    assert_eq!(viewer.frame_value_at(f64::NAN, 0.0), None);
}

#[test]
fn frame_value_follows_position() {
    let (viewer, _) = stack_viewer();
    viewer
        .navigator()
        .expect("navigator")
        .move_to(2.0)
        .expect("move");
    assert_eq!(viewer.frame_value_at(0.0, 0.0), Some(24.0));
}

#[test]
fn coordinate_readout_formatting() {
    let mut viewer = ViewerState::new();
    viewer.load_stack(ramp(&[3, 4]), None, None).expect("load");
    let cases = [
        ((0.0, 0.0), "x=0.0000, y=0.0000, z=0.0000"),
        ((0.2, 0.0), "x=0.2000, y=0.0000, z=0.0000"),
        ((0.0, 0.2), "x=0.0000, y=0.2000, z=0.0000"),
        ((0.2, 0.2), "x=0.2000, y=0.2000, z=0.0000"),
        ((0.8, 0.2), "x=0.8000, y=0.2000, z=1.0000"),
        ((0.2, 0.8), "x=0.2000, y=0.8000, z=4.0000"),
        ((0.8, 0.8), "x=0.8000, y=0.8000, z=5.0000"),
        ((4.0, 5.0), "x=4.0000, y=5.0000"),
    ];
    for ((x, y), expected) in cases {
        assert_eq!(viewer.format_coord(x, y), expected);
    }
    assert_eq!(format_readout(1.5, 2.25, Some(0.125)), "x=1.5000, y=2.2500, z=0.1250");
}

#[test]
fn surface_receives_frames_and_ranges() {
    let surface = Rc::new(RecordingSurface::default());
    let mut viewer = ViewerState::new();
    viewer.attach_surface(surface.clone()).expect("attach");
    assert!(surface.frames.borrow().is_empty());

    let data = ramp(&[5, 3, 4]);
    viewer.load_stack(data.clone(), Some(0.0), Some(59.0)).expect("load");
    assert_eq!(*surface.frames.borrow(), vec![frame_of(&data, 0)]);
    assert_eq!(*surface.ranges.borrow(), vec![ColorRange::new(0.0, 59.0)]);

    let navigator = viewer.navigator().expect("navigator");
    navigator.move_to(2.0).expect("move");
    navigator.move_to(2.0).expect("same position");
    assert_eq!(surface.frames.borrow().len(), 2);
    assert_eq!(surface.frames.borrow()[1], frame_of(&data, 2));

    viewer.update_color_range(0.5, 0.5).expect("reset");
    assert_eq!(surface.ranges.borrow().len(), 2);
}

#[test]
fn reload_disconnects_previous_controller() {
    let surface = Rc::new(RecordingSurface::default());
    let (mut viewer, _) = stack_viewer();
    viewer.attach_surface(surface.clone()).expect("attach");
    let previous = viewer.navigator().expect("navigator");
    assert_eq!(previous.subscriber_count(), 1);

    viewer.load_stack(ramp(&[2, 3, 4]), None, None).expect("reload");
    assert_eq!(previous.subscriber_count(), 0);
    let frames_after_reload = surface.frames.borrow().len();
    previous.move_to(3.0).expect("stale move");
    assert_eq!(surface.frames.borrow().len(), frames_after_reload);
    assert_eq!(viewer.navigator().expect("navigator").max_time(), 1);
}

#[test]
fn detached_surface_stops_refreshing() {
    let surface = Rc::new(RecordingSurface::default());
    let (mut viewer, _) = stack_viewer();
    viewer.attach_surface(surface.clone()).expect("attach");
    assert!(viewer.detach_surface().expect("detach").is_some());
    viewer
        .navigator()
        .expect("navigator")
        .move_to(1.0)
        .expect("move");
    assert_eq!(surface.frames.borrow().len(), 1);
}

#[test]
fn surface_failure_reaches_mover() {
    let surface = Rc::new(RecordingSurface::default());
    let (mut viewer, _) = stack_viewer();
    viewer.attach_surface(surface.clone()).expect("attach");
    surface.fail_frames.set(true);
    let error = viewer
        .navigator()
        .expect("navigator")
        .move_to(1.0)
        .expect_err("surface failure");
    assert!(matches!(error, NavigationError::Observer { .. }));
    assert_eq!(viewer.position(), Some(1));
}
