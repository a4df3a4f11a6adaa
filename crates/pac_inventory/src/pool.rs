//! Inventory pool
//!
//! Owns every registered inventory. Other components reach inventories and
//! items only through the pool, by id, and never keep references across
//! calls.

use std::collections::HashMap;

use pac_core::{InventoryError, InventoryId, Result};

use crate::inventory::Inventory;

/// Pool entry with registration order
struct PoolEntry {
    inventory: Inventory,
    order: usize,
}

/// Inventory pool - owns all inventories by id
pub struct InventoryPool {
    /// Registered inventories
    inventories: HashMap<InventoryId, PoolEntry>,
    /// Registration counter
    next_order: usize,
}

impl InventoryPool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self {
            inventories: HashMap::new(),
            next_order: 0,
        }
    }

    /// Register an inventory, returning its id
    ///
    /// Re-adding an id that is already registered replaces the old
    /// inventory but keeps its position in the render order.
    pub fn add(&mut self, inventory: Inventory) -> InventoryId {
        let id = inventory.id();
        let order = match self.inventories.get(&id) {
            Some(existing) => {
                log::warn!("Inventory {} registered twice, replacing", id);
                existing.order
            }
            None => {
                self.next_order += 1;
                self.next_order - 1
            }
        };
        self.inventories.insert(id, PoolEntry { inventory, order });
        id
    }

    /// Get an inventory
    pub fn get(&self, id: InventoryId) -> Option<&Inventory> {
        self.inventories.get(&id).map(|e| &e.inventory)
    }

    /// Get a mutable inventory
    pub fn get_mut(&mut self, id: InventoryId) -> Option<&mut Inventory> {
        self.inventories.get_mut(&id).map(|e| &mut e.inventory)
    }

    /// Get a mutable inventory or a NotFound error
    pub fn resolve_mut(&mut self, id: InventoryId) -> Result<&mut Inventory> {
        self.get_mut(id).ok_or(InventoryError::InventoryNotFound(id))
    }

    /// Unregister an inventory and hand it back
    pub fn remove(&mut self, id: InventoryId) -> Option<Inventory> {
        self.inventories.remove(&id).map(|e| e.inventory)
    }

    /// Check if an inventory is registered
    pub fn contains(&self, id: InventoryId) -> bool {
        self.inventories.contains_key(&id)
    }

    /// Number of inventories
    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }

    /// Inventory ids in registration order
    pub fn ids(&self) -> Vec<InventoryId> {
        let mut ordered: Vec<_> = self
            .inventories
            .iter()
            .map(|(id, entry)| (*id, entry.order))
            .collect();
        ordered.sort_by_key(|(_, order)| *order);
        ordered.into_iter().map(|(id, _)| id).collect()
    }

    /// Visit every visible inventory in registration order
    pub fn for_each_visible<F>(&self, mut f: F)
    where
        F: FnMut(&Inventory),
    {
        for id in self.ids() {
            if let Some(inventory) = self.get(id) {
                if inventory.is_visible() {
                    f(inventory);
                }
            }
        }
    }

    /// Drop every inventory and every item they hold
    ///
    /// Item icon references are released along with the items.
    pub fn clear(&mut self) {
        let items: usize = self
            .inventories
            .values_mut()
            .map(|e| e.inventory.clear())
            .sum();
        log::debug!(
            "Cleared inventory pool ({} inventories, {} items)",
            self.inventories.len(),
            items
        );
        self.inventories.clear();
    }
}

impl Default for InventoryPool {
    fn default() -> Self {
        Self::new()
    }
}
