//! Private HTTP client for Yamaha network receivers
//!
//! Yamaha AV receivers expose a single control endpoint
//! (`/YamahaRemoteControl/ctrl`) that accepts an XML document in the body of
//! a POST request and answers with another XML document. This crate only moves
//! bytes: building and reading those documents lives in `yamaha-api`.

mod error;

pub use error::ClientError;

use std::time::Duration;

use tracing::debug;

/// Default control path on the receiver
pub const CONTROL_PATH: &str = "/YamahaRemoteControl/ctrl";

/// Connection settings for [`YncClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound for a whole request, connect through body read
    pub timeout: Duration,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
    /// Control path appended to the host
    pub path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(4),
            user_agent: "yamaha-bridge".to_string(),
            path: CONTROL_PATH.to_string(),
        }
    }
}

/// Something that can deliver a control document to a receiver
///
/// `host` is the network address of the receiver as configured by the user
/// (`192.168.1.20` or `receiver.local:8080`). The returned string is the raw
/// response body.
pub trait Transport {
    fn send(&self, host: &str, body: &str) -> Result<String, ClientError>;
}

/// Blocking HTTP client for the YNC control endpoint
#[derive(Debug, Clone)]
pub struct YncClient {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl YncClient {
    /// Create a new client with the default 4 second timeout
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom settings
    pub fn with_config(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Self { agent, config }
    }

    /// Settings this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full control URL for a host
    pub fn control_url(&self, host: &str) -> String {
        format!("http://{}{}", host, self.config.path)
    }

    /// POST a document to the receiver and return the response body
    pub fn post(&self, host: &str, body: &str) -> Result<String, ClientError> {
        let url = self.control_url(host);
        debug!("Sending payload to {}: {}", url, body);

        let response = self
            .agent
            .post(&url)
            .set("Accept", "text/xml")
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .send_string(body)?;

        // ureq already rejects 4xx/5xx; anything else outside 2xx is not a usable answer
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(ClientError::Status(status));
        }

        let text = response
            .into_string()
            .map_err(|e| ClientError::Body(e.to_string()))?;

        debug!("Received {} bytes from {}", text.len(), host);
        Ok(text)
    }
}

impl Default for YncClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for YncClient {
    fn send(&self, host: &str, body: &str) -> Result<String, ClientError> {
        self.post(host, body)
    }
}
