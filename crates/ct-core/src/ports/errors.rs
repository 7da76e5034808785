use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("missing API key for {0}")]
    InvalidCredentials(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("no translation result returned")]
    NoResult,

    #[error("provider error: {0}")]
    Provider(String),

    #[error("failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ProviderError>,
    },

    #[error("translation cancelled")]
    Cancelled,

    #[error("failed to close provider: {0}")]
    Close(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history store is not initialized")]
    NotInitialized,

    #[error("failed to open history store: {0}")]
    Open(String),

    #[error("history write failed: {0}")]
    Write(String),

    #[error("history read failed: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(String),

    #[error("malformed config: {0}")]
    Malformed(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard read failed: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("notification push failed: {0}")]
    Push(String),
}
