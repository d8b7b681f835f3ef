//! Typed control API for Yamaha network receivers
//!
//! Receivers of the RX-V family accept XML control documents over HTTP. This
//! crate builds those documents from typed commands, decodes the basic status
//! answer, and sends both through the private `ync-client` transport.
//!
//! ```rust,ignore
//! use yamaha_api::{decode, CommandKind, YamahaClient};
//!
//! let client = YamahaClient::new();
//! let state = client.query_state("192.168.1.20")?;
//! let volume = decode(&state, CommandKind::Volume)?;
//! ```

pub mod client;
pub mod command;
pub mod decode;
pub mod encode;
pub mod error;
pub mod value;

pub use client::YamahaClient;
pub use command::{Command, CommandKind};
pub use decode::{decode, BasicStatus};
pub use encode::{Document, Method};
pub use error::{ApiError, Result};
pub use value::Value;

pub use ync_client::{ClientConfig, ClientError, Transport, YncClient};
