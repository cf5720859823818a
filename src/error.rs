use std::fmt;
use std::path::PathBuf;

/// Error types for an export run
#[derive(Debug)]
pub enum ExportError {
    /// Missing or invalid settings; raised before any API call
    Configuration(String),

    /// Route53 API call failed for one zone
    Fetch { zone_id: String, message: String },

    /// Route53 returned data the renderer cannot represent
    Render { zone_id: String, message: String },

    /// Writing an output file failed
    Write { path: PathBuf, message: String },
}

impl ExportError {
    /// Whether the error ends the whole run rather than a single zone
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExportError::Configuration(_) | ExportError::Write { .. }
        )
    }

    /// Zone the error is attributed to, if any
    pub fn zone_id(&self) -> Option<&str> {
        match self {
            ExportError::Fetch { zone_id, .. } | ExportError::Render { zone_id, .. } => {
                Some(zone_id)
            }
            _ => None,
        }
    }

    pub(crate) fn fetch(zone_id: &str, err: anyhow::Error) -> Self {
        ExportError::Fetch {
            zone_id: zone_id.to_string(),
            message: format!("{:#}", err),
        }
    }

    pub(crate) fn write(path: &std::path::Path, err: anyhow::Error) -> Self {
        ExportError::Write {
            path: path.to_path_buf(),
            message: format!("{:#}", err),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Configuration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            ExportError::Fetch { zone_id, message } => {
                write!(f, "Failed to export data for {}: {}", zone_id, message)
            }
            ExportError::Render { zone_id, message } => {
                write!(f, "Failed to render data for {}: {}", zone_id, message)
            }
            ExportError::Write { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ExportError {}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Configuration(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Configuration(err.to_string())
    }
}

impl From<regex::Error> for ExportError {
    fn from(err: regex::Error) -> Self {
        ExportError::Configuration(format!("invalid hostname pattern: {}", err))
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
