use std::fs;
use std::path::Path;

use super::{Result, SessionReport, SessionSpec};

/// Serialization picked from the file extension; anything that is not
/// `.yaml`/`.yml` is treated as JSON.
#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Reads and validates a session file.
pub fn load_session(path: impl AsRef<Path>) -> Result<SessionSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let format = FileFormat::of(path);
    let session: SessionSpec = match format {
        FileFormat::Yaml => serde_yaml::from_str(&raw)?,
        FileFormat::Json => serde_json::from_str(&raw)?,
    };
    session.validate()?;
    log::debug!(
        "loaded {format:?} session {} with {} action(s)",
        path.display(),
        session.actions.len()
    );
    Ok(session)
}

pub fn save_report(path: impl AsRef<Path>, report: &SessionReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = match FileFormat::of(path) {
        FileFormat::Yaml => serde_yaml::to_string(report)?,
        FileFormat::Json => serde_json::to_string_pretty(report)?,
    };
    fs::write(path, serialized)?;
    Ok(())
}

