//! The player's inventory and its persistent store.
//!
//! [`Inventory`] is the plain ordered item set that gates are evaluated
//! against. [`InventoryStore`] wraps it with an [`InventoryBackend`] so every
//! mutation is written through to the durable record, and so a missing or
//! corrupted record degrades to an empty inventory instead of an error.

mod backend;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PersistError;

pub use backend::{FileBackend, InventoryBackend, MemoryBackend};

/// An ordered set of item names, in acquisition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted record (a JSON array of item names).
    ///
    /// Duplicate names in the record are collapsed, keeping the first.
    pub fn from_record(raw: &str) -> Result<Self, PersistError> {
        let names: Vec<String> = serde_json::from_str(raw)?;
        let mut inventory = Self::new();
        for name in names {
            inventory.insert(name);
        }
        Ok(inventory)
    }

    /// Serialize to the persisted record layout.
    pub fn to_record(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Check if the inventory holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Add an item. Returns `false` if it was already held.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.has_item(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item. Returns `false` if it was not held.
    pub fn remove(&mut self, item: &str) -> bool {
        if let Some(pos) = self.items.iter().position(|i| i == item) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }

    /// Items in acquisition order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// An inventory that writes every change through to a persistence backend.
#[derive(Debug)]
pub struct InventoryStore<B: InventoryBackend> {
    inventory: Inventory,
    backend: B,
}

impl<B: InventoryBackend> InventoryStore<B> {
    /// Open a store, loading whatever the backend holds.
    ///
    /// An absent, unreadable, or malformed record yields an empty inventory.
    pub fn open(backend: B) -> Self {
        let inventory = match backend.load() {
            Ok(Some(raw)) => Inventory::from_record(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "discarding malformed inventory record");
                Inventory::new()
            }),
            Ok(None) => Inventory::new(),
            Err(err) => {
                warn!(error = %err, "inventory record unreadable, starting empty");
                Inventory::new()
            }
        };
        debug!(items = ?inventory.items(), "inventory loaded");
        Self { inventory, backend }
    }

    /// Add items, skipping any already held.
    ///
    /// Returns the items that were actually added, in order. Repeats within
    /// one call count once.
    pub fn acquire<I, S>(&mut self, items: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for item in items {
            let item = item.into();
            if self.inventory.insert(item.clone()) {
                info!(item = %item, "item acquired");
                added.push(item);
            }
        }
        if !added.is_empty() {
            self.persist();
        }
        added
    }

    /// Check if an item is held.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.has_item(item)
    }

    /// Remove an item if held. Returns whether anything changed.
    pub fn remove(&mut self, item: &str) -> bool {
        let removed = self.inventory.remove(item);
        if removed {
            info!(item = %item, "item discarded");
            self.persist();
        }
        removed
    }

    /// Empty the inventory and erase the persisted record.
    pub fn clear(&mut self) {
        self.inventory.clear();
        if let Err(err) = self.backend.clear() {
            warn!(error = %err, "failed to clear inventory record");
        }
    }

    /// Items in acquisition order.
    pub fn items(&self) -> &[String] {
        self.inventory.items()
    }

    /// The in-memory inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The persistence backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn persist(&mut self) {
        let result = self
            .inventory
            .to_record()
            .and_then(|record| self.backend.save(&record));
        if let Err(err) = result {
            warn!(error = %err, "failed to persist inventory, keeping it in memory");
        }
    }
}
