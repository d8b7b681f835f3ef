//! YamahaBridge - the controller between host items and receivers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use yamaha_api::{
    decode, ClientConfig, Command, CommandKind, Transport, Value, YamahaClient, YncClient,
};

use crate::error::{BridgeError, Result};
use crate::item::{Item, Provenance, CONF_CMD, CONF_HOST};
use crate::routing::{Binding, RoutingTable};

/// Routes item changes to receivers and receiver state back into items
///
/// The lifecycle follows the host framework:
///
/// 1. [`register`](Self::register) once per discovered item
/// 2. [`start`](Self::start) once all items are registered
/// 3. [`update_item`](Self::update_item) whenever a registered item changes
/// 4. [`stop`](Self::stop) at shutdown
///
/// Every command is followed by a full state query whose raw answer is
/// written into the host's `state` item. Nothing else updates items after
/// start-up.
///
/// ```rust,ignore
/// let mut bridge = YamahaBridge::new();
/// for item in host.items() {
///     if bridge.register(&item)?.is_some() {
///         host.subscribe(&item);
///     }
/// }
/// bridge.start();
/// ```
pub struct YamahaBridge<T = YncClient> {
    client: YamahaClient<T>,
    routes: RoutingTable,
    alive: AtomicBool,
}

impl YamahaBridge<YncClient> {
    /// Create a bridge using the HTTP client with default settings
    pub fn new() -> Self {
        Self::with_transport(YncClient::new())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(YncClient::with_config(config))
    }
}

impl Default for YamahaBridge<YncClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> YamahaBridge<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            client: YamahaClient::with_transport(transport),
            routes: RoutingTable::new(),
            alive: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &YamahaClient<T> {
        &self.client
    }

    pub fn routing_table(&self) -> &RoutingTable {
        &self.routes
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Register an item if it carries a `yamaha_cmd`
    ///
    /// Returns `Ok(None)` for items the bridge does not track: those without
    /// `yamaha_cmd`, and those whose `yamaha_cmd` is not a known kind (logged
    /// as a warning). On `Ok(Some(_))` the host should route later changes of
    /// the item to [`update_item`](Self::update_item).
    pub fn register(&mut self, item: &Arc<dyn Item>) -> Result<Option<Binding>> {
        let Some(raw_kind) = item.config(CONF_CMD) else {
            return Ok(None);
        };

        let kind = match raw_kind.parse::<CommandKind>() {
            Ok(kind) => kind,
            Err(_) => {
                let valid: Vec<_> = CommandKind::ALL.iter().map(CommandKind::as_str).collect();
                warn!(
                    "{} of item {} not in valid commands: {:?}",
                    raw_kind,
                    item.name(),
                    valid
                );
                return Ok(None);
            }
        };

        let host = lookup_host(&**item)?;
        let binding = Binding { host, kind };

        if self.routes.bind(&binding, item) {
            warn!(
                "Item {} replaces an earlier {} binding on {}",
                item.name(),
                binding.kind,
                binding.host
            );
        }
        debug!("Registered item {} as {} on {}", item.name(), binding.kind, binding.host);

        Ok(Some(binding))
    }

    /// Pull live receiver state into every registered item
    ///
    /// Each host is refreshed once; the fresh status then seeds every
    /// command item of that host. A host that fails is logged and skipped.
    pub fn start(&self) {
        info!("Yamaha items loaded, now initializing.");

        for host in self.routes.hosts() {
            info!("Initializing items for host: {}", host);
            if let Err(e) = self.initialize_host(host) {
                error!("Failed to initialize host {}: {}", host, e);
            }
        }

        self.alive.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        info!("Stopping Yamaha bridge");
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Host hook for item changes
    ///
    /// Changes written by the bridge itself are ignored. Failures are
    /// logged; the host gets no result.
    pub fn update_item(&self, item: &dyn Item, provenance: Provenance) {
        if provenance == Provenance::SelfOriginated {
            return;
        }

        if let Err(e) = self.apply_update(item) {
            error!("Failed to update item {}: {}", item.name(), e);
        }
    }

    /// Send the item's value to its receiver and refresh that receiver's state
    ///
    /// A change of the `state` item sends no command and only refreshes. If
    /// sending the command fails, no refresh is attempted.
    pub fn apply_update(&self, item: &dyn Item) -> Result<()> {
        let raw_kind = item
            .config(CONF_CMD)
            .ok_or_else(|| BridgeError::MissingCommand {
                item: item.name().to_string(),
            })?;
        let kind: CommandKind = raw_kind.parse()?;
        let host = lookup_host(item)?;

        if !self.routes.contains(&host, CommandKind::State) {
            return Err(BridgeError::NoStateItem { host });
        }

        if kind.is_command() {
            let value = item.value().ok_or_else(|| BridgeError::MissingValue {
                item: item.name().to_string(),
            })?;
            let command = Command::from_value(kind, &value)?;
            self.client.execute(&host, &command)?;
        }

        self.refresh(&host)?;
        Ok(())
    }

    /// Query the receiver and store the raw answer in the host's `state` item
    ///
    /// Returns the raw status document.
    pub fn refresh(&self, host: &str) -> Result<String> {
        let state_item = self.bound_item(host, CommandKind::State)?;
        let state = self.client.query_state(host)?;
        state_item.set_value(Value::Text(state.clone()), Provenance::SelfOriginated);
        Ok(state)
    }

    fn initialize_host(&self, host: &str) -> Result<()> {
        let state = self.refresh(host)?;

        for kind in self.routes.kinds(host) {
            if !kind.is_command() {
                continue;
            }

            let item = match self.bound_item(host, kind) {
                Ok(item) => item,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            info!("Initializing cmd {} for item {}", kind, item.name());
            match decode(&state, kind) {
                Ok(value) => item.set_value(value, Provenance::SelfOriginated),
                Err(e) => warn!("Could not read {} from {}: {}", kind, host, e),
            }
        }

        Ok(())
    }

    fn bound_item(&self, host: &str, kind: CommandKind) -> Result<Arc<dyn Item>> {
        let weak = self.routes.get(host, kind).ok_or_else(|| {
            if kind == CommandKind::State {
                BridgeError::NoStateItem {
                    host: host.to_string(),
                }
            } else {
                BridgeError::ItemDropped {
                    host: host.to_string(),
                    kind,
                }
            }
        })?;

        weak.upgrade().ok_or_else(|| BridgeError::ItemDropped {
            host: host.to_string(),
            kind,
        })
    }
}

/// Receiver address of an item, read from its parent's `yamaha_host`
pub fn lookup_host(item: &dyn Item) -> Result<String> {
    let parent = item.parent().ok_or_else(|| BridgeError::NoParent {
        item: item.name().to_string(),
    })?;

    parent
        .config(CONF_HOST)
        .ok_or_else(|| BridgeError::MissingHost {
            item: item.name().to_string(),
        })
}
