use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid profile endpoint '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Failures while wiring the client stack at startup.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
