//! Inventory component
//!
//! A fixed number of slots, each empty or holding one [`Item`]. Slot
//! positions are what the UI shows and what drag events refer to, so items
//! never shift on their own: removing an item leaves a gap, and new items
//! fill the lowest free slot.

use pac_core::{InventoryError, InventoryId, ItemId, Result};

use crate::item::Item;

/// Inventory of items
#[derive(Debug)]
pub struct Inventory {
    /// Unique identifier
    id: InventoryId,
    /// Debug name (not unique)
    name: String,
    /// Inventory slots (None = empty)
    slots: Vec<Option<Item>>,
    /// Whether the inventory is drawn
    is_visible: bool,
    /// Size of one item button in pixels
    item_size: (f32, f32),
    /// Slot currently focused by keyboard/controller navigation
    focused_index: Option<usize>,
    /// World point the window is anchored to
    world_position: Option<[f32; 3]>,
}

impl Inventory {
    /// Create a new inventory with given capacity
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            id: InventoryId::new(),
            name: name.into(),
            slots,
            is_visible: false,
            item_size: (128.0, 100.0),
            focused_index: None,
            world_position: None,
        }
    }

    /// Set item button size
    pub fn with_item_size(mut self, width: f32, height: f32) -> Self {
        self.item_size = (width, height);
        self
    }

    /// Get inventory id
    pub fn id(&self) -> InventoryId {
        self.id
    }

    /// Get inventory name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get inventory capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Get number of free slots
    pub fn free_slot_count(&self) -> usize {
        self.capacity() - self.occupied_count()
    }

    /// Check if inventory is full
    pub fn is_full(&self) -> bool {
        self.free_slot_count() == 0
    }

    /// Check if inventory is empty
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Find first empty slot
    fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Find the slot holding an item
    pub fn find_slot(&self, id: ItemId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|item| item.id() == id))
    }

    // ========== Items ==========

    /// Place an item in the lowest free slot
    ///
    /// Returns the slot index it landed in.
    pub fn add_item(&mut self, item: Item) -> Result<usize> {
        if self.contains_item(item.id()) {
            return Err(InventoryError::DuplicateItem(item.id()));
        }
        let slot = self
            .find_empty_slot()
            .ok_or(InventoryError::InventoryFull(self.id))?;
        self.slots[slot] = Some(item);
        Ok(slot)
    }

    /// Detach an item, leaving its slot empty
    pub fn remove_item(&mut self, id: ItemId) -> Result<Item> {
        let slot = self.find_slot(id).ok_or(InventoryError::ItemNotFound(id))?;
        self.take_slot(slot)
    }

    /// Detach every item matching a predicate
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Item>
    where
        F: FnMut(&Item) -> bool,
    {
        let mut removed = Vec::new();
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(&mut predicate) {
                removed.extend(slot.take());
            }
        }
        removed
    }

    /// Get an item by id
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items().map(|(_, item)| item).find(|item| item.id() == id)
    }

    /// Get a mutable item by id
    pub fn get_item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|item| item.id() == id)
    }

    /// Check if an item is in this inventory
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.find_slot(id).is_some()
    }

    /// Check if any item has the given content hash
    pub fn contains_content(&self, content_hash: u32) -> bool {
        self.items().any(|(_, item)| item.content_hash() == content_hash)
    }

    /// Get slot contents
    pub fn slot(&self, index: usize) -> Option<&Item> {
        self.slots.get(index)?.as_ref()
    }

    /// All items with their slot index, in slot order
    pub fn items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|item| (i, item)))
    }

    /// All items, mutable, in slot order
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.slots.iter_mut().flatten()
    }

    /// Ids of all items, in slot order
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items().map(|(_, item)| item.id()).collect()
    }

    /// Drop every item; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.occupied_count();
        for slot in &mut self.slots {
            *slot = None;
        }
        self.focused_index = None;
        count
    }

    fn take_slot(&mut self, index: usize) -> Result<Item> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::SlotOutOfRange { index, capacity })?;
        let item = slot.take().ok_or(InventoryError::EmptySlot(index))?;
        if self.focused_index == Some(index) {
            self.focused_index = None;
        }
        Ok(item)
    }

    // ========== Resize ==========

    /// Change the number of slots
    ///
    /// Shrinking below the occupied count evicts items from the highest
    /// slot indices first; the evicted items are returned in eviction order.
    /// Items that survive but sit beyond the new capacity move into the
    /// lowest free slots. Growing never evicts. Resizing to the current
    /// capacity does nothing.
    pub fn resize(&mut self, capacity: usize) -> Vec<Item> {
        let current = self.capacity();
        if capacity == current {
            return Vec::new();
        }
        if capacity > current {
            self.slots.resize_with(capacity, || None);
            return Vec::new();
        }

        let excess = self.occupied_count().saturating_sub(capacity);
        let mut left_behind = Vec::with_capacity(excess);
        for slot in self.slots.iter_mut().rev() {
            if left_behind.len() == excess {
                break;
            }
            left_behind.extend(slot.take());
        }

        let displaced: Vec<Item> = self.slots.drain(capacity..).flatten().collect();
        for item in displaced {
            if let Some(free) = self.find_empty_slot() {
                self.slots[free] = Some(item);
            }
        }

        if self.focused_index.is_some_and(|i| i >= capacity) {
            self.focused_index = None;
        }

        log::debug!(
            "Inventory '{}' resized {} -> {} ({} left behind)",
            self.name,
            current,
            capacity,
            left_behind.len()
        );
        left_behind
    }

    // ========== UI interaction ==========

    /// An item button was clicked
    pub fn click(&mut self, index: usize) -> Result<ItemId> {
        let id = self
            .slot(index)
            .map(Item::id)
            .ok_or(InventoryError::EmptySlot(index))?;
        self.focused_index = Some(index);
        Ok(id)
    }

    /// An item was dragged out of the window; ownership goes to the caller
    pub fn drag_out(&mut self, index: usize) -> Result<Item> {
        self.take_slot(index)
    }

    /// An item was dragged onto another slot
    ///
    /// Moves into an empty slot, swaps with an occupied one.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<ItemId> {
        let capacity = self.capacity();
        for index in [from, to] {
            if index >= capacity {
                return Err(InventoryError::SlotOutOfRange { index, capacity });
            }
        }
        let id = self
            .slot(from)
            .map(Item::id)
            .ok_or(InventoryError::EmptySlot(from))?;
        if from != to {
            self.slots.swap(from, to);
            if self.focused_index == Some(from) {
                self.focused_index = Some(to);
            }
        }
        Ok(id)
    }

    /// A popup menu entry of an item was clicked
    pub fn popup_click(&self, id: ItemId, entry: &str) -> Result<()> {
        let item = self.get_item(id).ok_or(InventoryError::ItemNotFound(id))?;
        if !item.has_popup_entry(entry) {
            return Err(InventoryError::MissingPopupEntry(entry.to_string()));
        }
        Ok(())
    }

    // ========== Presentation ==========

    /// Check if the inventory is drawn
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Show or hide the inventory
    pub fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
        if !visible {
            self.focused_index = None;
        }
    }

    /// Item button size
    pub fn item_size(&self) -> (f32, f32) {
        self.item_size
    }

    /// Set item button size
    pub fn set_item_size(&mut self, width: f32, height: f32) {
        self.item_size = (width, height);
    }

    /// Focused slot
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    /// Focus a slot (None clears focus)
    pub fn set_focused_index(&mut self, index: Option<usize>) {
        self.focused_index = index.filter(|&i| i < self.capacity());
    }

    /// Item in the focused slot
    pub fn focused_item(&self) -> Option<&Item> {
        self.slot(self.focused_index?)
    }

    /// Anchor the window to a world point; last value wins
    pub fn position_at_world_coordinate(&mut self, point: [f32; 3]) {
        self.world_position = Some(point);
    }

    /// World anchor point
    pub fn world_position(&self) -> Option<[f32; 3]> {
        self.world_position
    }
}
