//! Error types for Relay

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Event errors
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("malformed event payload: {0}")]
    MalformedEvent(String),

    // Manual-send API errors
    #[error("Invalid notification type")]
    InvalidNotificationType,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // Audit store errors
    #[error("audit store error: {0}")]
    Store(String),

    // Stream transport errors
    #[error("kafka error: {0}")]
    Kafka(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidNotificationType => 400,
            _ => 500,
        }
    }
}
