use thiserror::Error;
use ync_client::ClientError;

/// Errors produced while talking to a receiver or reading its answers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure before the receiver answered
    #[error("Network error: {0}")]
    Network(String),

    /// The receiver did not answer within the client timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The receiver answered with a non-success HTTP status
    ///
    /// The body of such an answer is never treated as device state.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// A status response lacked the element for the requested field, or
    /// the element held a value that field cannot take
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A `yamaha_cmd` value outside the known command kinds
    #[error("Unrecognized command kind: {0}")]
    UnrecognizedCommand(String),

    /// An item value that cannot be turned into the requested command
    #[error("Invalid value '{value}' for {kind}: {reason}")]
    InvalidValue {
        kind: String,
        value: String,
        reason: String,
    },

    /// The XML writer failed to serialize a document
    #[error("Encode error: {0}")]
    Encode(String),
}

impl ApiError {
    /// True for failures of the HTTP exchange itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::Timeout(_) | ApiError::HttpStatus(_)
        )
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Network(msg) => ApiError::Network(msg),
            ClientError::Timeout(msg) => ApiError::Timeout(msg),
            ClientError::Status(code) => ApiError::HttpStatus(code),
            ClientError::Body(msg) => ApiError::Network(msg),
        }
    }
}
