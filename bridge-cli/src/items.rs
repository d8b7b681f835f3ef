//! Item tree files
//!
//! The command-line host reads its items from a JSON file shaped like the
//! zone/item hierarchy of a home-automation config:
//!
//! ```json
//! {
//!   "zones": [
//!     {
//!       "name": "living_room",
//!       "yamaha_host": "192.168.1.20",
//!       "items": [
//!         { "name": "state", "yamaha_cmd": "state" },
//!         { "name": "power", "yamaha_cmd": "power" },
//!         { "name": "volume", "yamaha_cmd": "volume", "value": -400 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use yamaha_bridge::{Item, MemoryItem, Value, CONF_CMD, CONF_HOST};

#[derive(Debug, Clone, Deserialize)]
pub struct ItemTree {
    pub zones: Vec<ZoneConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    #[serde(default)]
    pub yamaha_host: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    #[serde(default)]
    pub yamaha_cmd: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Items built from a tree, kept alive for the lifetime of the bridge
pub struct LoadedItems {
    /// Zone items own nothing but the host address; children hold them
    pub zones: Vec<Arc<dyn Item>>,
    pub items: Vec<Arc<MemoryItem>>,
}

impl ItemTree {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read item file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse item file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the in-memory items, child names prefixed by their zone
    pub fn build(&self) -> LoadedItems {
        let mut zones = Vec::new();
        let mut items = Vec::new();

        for zone_config in &self.zones {
            let mut zone = MemoryItem::new(zone_config.name.clone());
            if let Some(host) = &zone_config.yamaha_host {
                zone = zone.with_config(CONF_HOST, host.clone());
            }
            let zone: Arc<dyn Item> = Arc::new(zone);

            for item_config in &zone_config.items {
                let name = format!("{}.{}", zone_config.name, item_config.name);
                let mut item = MemoryItem::new(name).with_parent(Arc::clone(&zone));
                if let Some(cmd) = &item_config.yamaha_cmd {
                    item = item.with_config(CONF_CMD, cmd.clone());
                }
                if let Some(value) = &item_config.value {
                    item = item.with_value(value.clone());
                }
                items.push(Arc::new(item));
            }

            zones.push(zone);
        }

        LoadedItems { zones, items }
    }
}

impl LoadedItems {
    /// Find an item by `zone` and short `name`
    pub fn find(&self, zone: &str, name: &str) -> Option<&Arc<MemoryItem>> {
        let full = format!("{}.{}", zone, name);
        self.items.iter().find(|item| item.name() == full)
    }
}
