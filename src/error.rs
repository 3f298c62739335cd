use thiserror::Error;

#[derive(Error, Debug)]
pub enum EosSignerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    #[error("Unexpected response: expected {expected}, got {got}")]
    UnexpectedResponse {
        expected: &'static str,
        got: &'static str,
    },

    #[error("Device failure: {0}")]
    Device(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, EosSignerError>;
