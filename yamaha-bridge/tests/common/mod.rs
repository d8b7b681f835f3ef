//! Shared fixtures for bridge tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use yamaha_api::{ClientError, Transport};
use yamaha_bridge::{Item, MemoryItem, CONF_CMD, CONF_HOST};

pub const HOST: &str = "10.0.0.5";

pub const STATUS_ON: &str = r#"<YAMAHA_AV rsp="GET" RC="0"><Main_Zone><Basic_Status><Power_Control><Power>On</Power></Power_Control><Volume><Lvl><Val>-400</Val><Exp>1</Exp><Unit>dB</Unit></Lvl><Mute>Off</Mute></Volume><Input><Input_Sel>HDMI1</Input_Sel></Input></Basic_Status></Main_Zone></YAMAHA_AV>"#;

pub const PUT_OK: &str = r#"<YAMAHA_AV rsp="PUT" RC="0"></YAMAHA_AV>"#;

/// A fake receiver that records every request
///
/// GET requests are answered with the configured status, PUT requests with
/// an acknowledgement. Either direction can be made to fail.
pub struct MockReceiver {
    pub requests: RefCell<Vec<(String, String)>>,
    pub status: RefCell<String>,
    pub fail_puts: Cell<bool>,
    pub fail_gets: Cell<bool>,
}

impl MockReceiver {
    pub fn new(status: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            status: RefCell::new(status.to_string()),
            fail_puts: Cell::new(false),
            fail_gets: Cell::new(false),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn body(&self, index: usize) -> String {
        self.requests.borrow()[index].1.clone()
    }

    pub fn host(&self, index: usize) -> String {
        self.requests.borrow()[index].0.clone()
    }
}

impl Transport for MockReceiver {
    fn send(&self, host: &str, body: &str) -> Result<String, ClientError> {
        self.requests
            .borrow_mut()
            .push((host.to_string(), body.to_string()));

        if body.contains(r#"cmd="GET""#) {
            if self.fail_gets.get() {
                return Err(ClientError::Timeout("timed out reading response".to_string()));
            }
            Ok(self.status.borrow().clone())
        } else {
            if self.fail_puts.get() {
                return Err(ClientError::Network("connection refused".to_string()));
            }
            Ok(PUT_OK.to_string())
        }
    }
}

/// A zone item carrying the receiver address
pub fn zone(host: &str) -> Arc<dyn Item> {
    Arc::new(MemoryItem::new("living_room").with_config(CONF_HOST, host))
}

/// A child item of `zone` bound to `cmd`
pub fn item(zone: &Arc<dyn Item>, name: &str, cmd: &str) -> Arc<MemoryItem> {
    Arc::new(
        MemoryItem::new(name)
            .with_config(CONF_CMD, cmd)
            .with_parent(Arc::clone(zone)),
    )
}

/// View a concrete item as the trait object the bridge registers
pub fn as_dyn(item: &Arc<MemoryItem>) -> Arc<dyn Item> {
    item.clone()
}

/// Log sink collecting formatted tracing output in memory
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Run `f` with a subscriber writing into this sink
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
