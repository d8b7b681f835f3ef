//! Error types for the YNC client

use thiserror::Error;

/// Errors that can occur while talking to a receiver
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection or DNS failure before a response arrived
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The receiver answered with a non-success HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body could not be read as text
    #[error("Unreadable response body: {0}")]
    Body(String),
}

impl From<ureq::Error> for ClientError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, _) => ClientError::Status(code),
            ureq::Error::Transport(transport) => {
                let timed_out = std::error::Error::source(&transport)
                    .and_then(|source| source.downcast_ref::<std::io::Error>())
                    .map(|io| {
                        matches!(
                            io.kind(),
                            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
                        )
                    })
                    .unwrap_or(false);

                if timed_out {
                    ClientError::Timeout(transport.to_string())
                } else {
                    ClientError::Network(transport.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ClientError::Status(404).to_string(), "HTTP status 404");
        assert_eq!(
            ClientError::Network("connection refused".to_string()).to_string(),
            "Network/HTTP error: connection refused"
        );
    }
}
