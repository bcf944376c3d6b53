use thiserror::Error;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Error)]
#[error("{hour:02}:{minute:02} is not a valid time of day")]
pub struct InvalidTimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unable to write preferences to disk: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to serialize preference `{key}`: {source}")]
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },
}

#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum SettingsError {
    #[error(transparent)]
    InvalidTimeOfDay(#[from] InvalidTimeOfDay),
    #[error("Malformed destination url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The preference writer has stopped, either because a write failed or because the
    /// application is shutting down. This is not recoverable.
    #[error("The preference store is unavailable")]
    StoreUnavailable,
}
