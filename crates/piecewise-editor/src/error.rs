use piecewise_core::RangeError;

/// Errors delivering state-change events.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("state service is closed, dropped {event}")]
    ServiceClosed { event: &'static str },
}

/// Errors loading [`crate::config::EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an integer number of milliseconds, got {value:?}")]
    InvalidDelay { var: &'static str, value: String },
    #[error("{var} must be \"min,max\", got {value:?}")]
    MalformedRange { var: &'static str, value: String },
    #[error("invalid fallback range: {0}")]
    Range(#[from] RangeError),
}

/// Errors constructing an editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no tokio runtime available to schedule updates: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
