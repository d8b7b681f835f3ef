use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use yamaha_api::CommandKind;

use crate::item::Item;

/// Where a registered item was bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub host: String,
    pub kind: CommandKind,
}

/// Host → command kind → item
///
/// Filled during registration and only read afterwards. At most one item is
/// bound per (host, kind); binding again replaces the earlier item.
#[derive(Default)]
pub struct RoutingTable {
    hosts: BTreeMap<String, BTreeMap<CommandKind, Weak<dyn Item>>>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an item, returning whether an earlier binding was replaced
    pub fn bind(&mut self, binding: &Binding, item: &Arc<dyn Item>) -> bool {
        self.hosts
            .entry(binding.host.clone())
            .or_default()
            .insert(binding.kind, Arc::downgrade(item))
            .is_some()
    }

    /// The weak handle bound at (host, kind)
    pub fn get(&self, host: &str, kind: CommandKind) -> Option<&Weak<dyn Item>> {
        self.hosts.get(host)?.get(&kind)
    }

    pub fn contains(&self, host: &str, kind: CommandKind) -> bool {
        self.get(host, kind).is_some()
    }

    /// Registered hosts in address order
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }

    /// Kinds bound on a host, `state` first
    pub fn kinds(&self, host: &str) -> Vec<CommandKind> {
        self.hosts
            .get(host)
            .map(|kinds| kinds.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of bindings
    pub fn len(&self) -> usize {
        self.hosts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary: BTreeMap<_, _> = self
            .hosts
            .iter()
            .map(|(host, kinds)| (host, kinds.keys().collect::<Vec<_>>()))
            .collect();
        f.debug_struct("RoutingTable").field("hosts", &summary).finish()
    }
}
