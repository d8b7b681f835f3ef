use tracing::{debug, warn};
use ync_client::{Transport, YncClient};

use crate::command::Command;
use crate::decode::{self, BasicStatus};
use crate::encode::{self, Document};
use crate::error::Result;

/// A client for sending typed commands to receivers
///
/// This bridges the encoder and decoder to an actual [`Transport`]. The
/// default transport is the blocking [`YncClient`]; tests substitute their
/// own.
///
/// ```rust,ignore
/// use yamaha_api::{Command, YamahaClient};
///
/// let client = YamahaClient::new();
/// client.execute("192.168.1.20", &Command::Volume(-350))?;
/// let status = client.basic_status("192.168.1.20")?;
/// ```
#[derive(Debug, Clone)]
pub struct YamahaClient<T = YncClient> {
    transport: T,
}

impl YamahaClient<YncClient> {
    /// Create a client with the default HTTP transport
    pub fn new() -> Self {
        Self {
            transport: YncClient::new(),
        }
    }
}

impl Default for YamahaClient<YncClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> YamahaClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serialize and send a document, returning the raw response body
    pub fn send(&self, host: &str, document: &Document) -> Result<String> {
        let payload = document.to_xml()?;
        Ok(self.transport.send(host, &payload)?)
    }

    /// Send a setter command
    ///
    /// A non-zero `RC` in the answer means the receiver refused the command.
    /// That is logged and the body still returned; the following status
    /// query shows what the receiver actually did.
    pub fn execute(&self, host: &str, command: &Command) -> Result<String> {
        debug!("Executing {:?} on {}", command, host);
        let response = self.send(host, &command.encode())?;

        match decode::response_code(&response).as_deref() {
            Some("0") | None => {}
            Some(code) => warn!(
                "Receiver {} rejected {} command with response code {}",
                host,
                command.kind(),
                code
            ),
        }

        Ok(response)
    }

    /// Fetch the raw basic status document
    pub fn query_state(&self, host: &str) -> Result<String> {
        self.send(host, &encode::state_query())
    }

    /// Fetch and decode the basic status
    pub fn basic_status(&self, host: &str) -> Result<BasicStatus> {
        BasicStatus::parse(&self.query_state(host)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;
    use std::cell::RefCell;
    use ync_client::ClientError;

    /// Records payloads and answers from a canned list
    struct ScriptedTransport {
        sent: RefCell<Vec<(String, String)>>,
        replies: RefCell<Vec<std::result::Result<String, ClientError>>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<std::result::Result<String, ClientError>>) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                replies: RefCell::new(replies),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&self, host: &str, body: &str) -> std::result::Result<String, ClientError> {
            self.sent.borrow_mut().push((host.to_string(), body.to_string()));
            self.replies.borrow_mut().remove(0)
        }
    }

    #[test]
    fn test_execute_sends_encoded_command() {
        let client = YamahaClient::with_transport(ScriptedTransport::new(vec![Ok(
            r#"<YAMAHA_AV rsp="PUT" RC="0"/>"#.to_string(),
        )]));

        client.execute("10.0.0.5", &Command::Mute(true)).unwrap();

        let sent = client.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "10.0.0.5");
        assert!(sent[0].1.contains("<Mute>On</Mute>"));
    }

    #[test]
    fn test_execute_tolerates_rejection_code() {
        let client = YamahaClient::with_transport(ScriptedTransport::new(vec![Ok(
            r#"<YAMAHA_AV rsp="PUT" RC="4"/>"#.to_string(),
        )]));

        let body = client.execute("10.0.0.5", &Command::Input("BOGUS".to_string())).unwrap();
        assert!(body.contains(r#"RC="4""#));
    }

    #[test]
    fn test_transport_failure_is_propagated() {
        let client = YamahaClient::with_transport(ScriptedTransport::new(vec![Err(
            ClientError::Status(500),
        )]));

        match client.query_state("10.0.0.5") {
            Err(ApiError::HttpStatus(500)) => {}
            other => panic!("Expected HttpStatus(500), got {:?}", other),
        }
    }

    #[test]
    fn test_basic_status_queries_with_get() {
        let client = YamahaClient::with_transport(ScriptedTransport::new(vec![Ok(
            r#"<YAMAHA_AV rsp="GET" RC="0"><Main_Zone><Basic_Status><Volume><Lvl><Val>-205</Val><Exp>1</Exp><Unit>dB</Unit></Lvl><Mute>On</Mute></Volume></Basic_Status></Main_Zone></YAMAHA_AV>"#.to_string(),
        )]));

        let status = client.basic_status("receiver.local").unwrap();
        assert_eq!(status.volume, Some(-205));
        assert_eq!(status.mute, Some(true));

        let sent = client.transport().sent.borrow();
        assert!(sent[0].1.contains(r#"cmd="GET""#));
        assert!(sent[0].1.contains("<Basic_Status>GetParam</Basic_Status>"));
    }
}
