use std::path::Path;

use crate::model::PixelType;
use crate::session::{
    Action, DisplayBounds, Fill, NavigationSettings, SessionReport, SessionSpec, StackSource,
    load_session, run_session, save_report,
};

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct SessionService;

impl SessionService {
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SessionSpec> {
        Ok(load_session(path)?)
    }

    pub fn run(&self, spec: &SessionSpec) -> Result<SessionReport> {
        Ok(run_session(spec)?)
    }

    pub fn save_report(&self, path: impl AsRef<Path>, report: &SessionReport) -> Result<()> {
        save_report(path, report)?;
        Ok(())
    }

    /// Readout at `(x, y)` of a synthetic ramp stack, after moving to
    /// `index` when the stack has a time axis.
    pub fn probe(
        &self,
        shape: Vec<usize>,
        pixel_type: PixelType,
        index: Option<f64>,
        x: f64,
        y: f64,
    ) -> Result<String> {
        let mut actions = Vec::with_capacity(2);
        if let Some(value) = index {
            actions.push(Action::MoveTo { value });
        }
        actions.push(Action::Probe { x, y });
        let spec = SessionSpec {
            name: Some("probe".to_string()),
            stack: StackSource {
                shape,
                pixel_type,
                fill: Fill::Ramp,
            },
            display: DisplayBounds::default(),
            navigation: NavigationSettings::default(),
            actions,
        };
        let report = run_session(&spec)?;
        Ok(report
            .steps
            .last()
            .and_then(|step| step.readout.clone())
            .unwrap_or_default())
    }
}
