//! Domain error types.

/// Top-level error type for retaildash.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file} row {row}: invalid {column} value '{value}': {reason}")]
    InvalidValue {
        file: String,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("{file}: CSV parse error: {reason}")]
    Csv { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("template render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. } => 2,
            DashboardError::MissingColumn { .. }
            | DashboardError::InvalidValue { .. }
            | DashboardError::Csv { .. } => 3,
            DashboardError::Render { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
