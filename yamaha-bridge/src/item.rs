//! The item abstraction supplied by the host framework
//!
//! An item is a named value with a configuration mapping and an optional
//! parent. Receivers are configured on the parent (`yamaha_host`), the
//! control dimension on the item itself (`yamaha_cmd`):
//!
//! ```text
//! living_room            yamaha_host = 192.168.1.20
//! ├── power              yamaha_cmd  = power
//! ├── volume             yamaha_cmd  = volume
//! └── state              yamaha_cmd  = state
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use yamaha_api::Value;

/// Item configuration key naming the command kind
pub const CONF_CMD: &str = "yamaha_cmd";

/// Parent configuration key naming the receiver address
pub const CONF_HOST: &str = "yamaha_host";

/// Caller tag used by hosts that identify writers by string
pub const PROVENANCE_TAG: &str = "Yamaha";

/// Who caused a value change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// A user, a rule or another plugin
    External,
    /// This bridge, pushing receiver state into the item
    SelfOriginated,
}

impl Provenance {
    /// Map a string caller tag onto a provenance
    pub fn from_caller(caller: Option<&str>) -> Self {
        match caller {
            Some(PROVENANCE_TAG) => Provenance::SelfOriginated,
            _ => Provenance::External,
        }
    }

    /// String tag for hosts that want one
    pub fn caller(&self) -> Option<&'static str> {
        match self {
            Provenance::External => None,
            Provenance::SelfOriginated => Some(PROVENANCE_TAG),
        }
    }
}

/// A host-framework item
///
/// Implementations are owned by the host; the bridge only keeps weak
/// references to them.
pub trait Item {
    /// Identifier used in log messages
    fn name(&self) -> &str;

    /// Current value, `None` before anything was written
    fn value(&self) -> Option<Value>;

    /// Write a new value
    ///
    /// Hosts are expected to notify [`YamahaBridge::update_item`](crate::YamahaBridge::update_item)
    /// with the same provenance after the write.
    fn set_value(&self, value: Value, provenance: Provenance);

    /// Read one configuration key
    fn config(&self, key: &str) -> Option<String>;

    fn parent(&self) -> Option<Arc<dyn Item>>;
}

/// An in-process item
///
/// Stands in for a host framework in the command-line harness and in tests.
pub struct MemoryItem {
    name: String,
    value: RwLock<Option<Value>>,
    last_provenance: RwLock<Option<Provenance>>,
    writes: RwLock<usize>,
    config: HashMap<String, String>,
    parent: Option<Arc<dyn Item>>,
}

impl MemoryItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: RwLock::new(None),
            last_provenance: RwLock::new(None),
            writes: RwLock::new(0),
            config: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: Arc<dyn Item>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Seed an initial value without counting it as a write
    pub fn with_value(self, value: impl Into<Value>) -> Self {
        *self.value.write() = Some(value.into());
        self
    }

    /// Provenance of the most recent write
    pub fn last_provenance(&self) -> Option<Provenance> {
        *self.last_provenance.read()
    }

    /// Number of writes through [`Item::set_value`]
    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }
}

impl Item for MemoryItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Option<Value> {
        self.value.read().clone()
    }

    fn set_value(&self, value: Value, provenance: Provenance) {
        *self.value.write() = Some(value);
        *self.last_provenance.write() = Some(provenance);
        *self.writes.write() += 1;
    }

    fn config(&self, key: &str) -> Option<String> {
        self.config.get(key).cloned()
    }

    fn parent(&self) -> Option<Arc<dyn Item>> {
        self.parent.clone()
    }
}

impl std::fmt::Debug for MemoryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryItem")
            .field("name", &self.name)
            .field("value", &*self.value.read())
            .field("config", &self.config)
            .finish()
    }
}
