//! Item bridge for Yamaha network receivers
//!
//! Maps host-framework items onto receiver controls. Each item names one
//! control (`yamaha_cmd`: state, power, input, volume or mute) and inherits
//! the receiver address from its parent (`yamaha_host`).
//!
//! When an item changes from outside, the matching command is sent and the
//! receiver's full status is fetched again into the `state` item. Writes made
//! by the bridge carry [`Provenance::SelfOriginated`] so they never trigger
//! another command.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yamaha_bridge::{Item, MemoryItem, Provenance, YamahaBridge, CONF_CMD, CONF_HOST};
//!
//! let zone: Arc<dyn Item> =
//!     Arc::new(MemoryItem::new("living_room").with_config(CONF_HOST, "192.168.1.20"));
//! let state: Arc<dyn Item> = Arc::new(
//!     MemoryItem::new("state")
//!         .with_config(CONF_CMD, "state")
//!         .with_parent(zone.clone()),
//! );
//! let power: Arc<dyn Item> = Arc::new(
//!     MemoryItem::new("power")
//!         .with_config(CONF_CMD, "power")
//!         .with_parent(zone),
//! );
//!
//! let mut bridge = YamahaBridge::new();
//! bridge.register(&state)?;
//! bridge.register(&power)?;
//! bridge.start();
//!
//! power.set_value(true.into(), Provenance::External);
//! bridge.update_item(power.as_ref(), Provenance::External);
//! ```

mod bridge;
mod error;
pub mod item;
pub mod routing;

pub use bridge::{lookup_host, YamahaBridge};
pub use error::{BridgeError, Result};
pub use item::{Item, MemoryItem, Provenance, CONF_CMD, CONF_HOST, PROVENANCE_TAG};
pub use routing::{Binding, RoutingTable};

// Re-export the API types items carry
pub use yamaha_api::{ClientConfig, CommandKind, Value};
