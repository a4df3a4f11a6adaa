//! Inventory events raised by UI interaction and resizing

use pac_core::{InventoryId, ItemId};

use crate::item::Item;

/// Inventory events
#[derive(Debug)]
pub enum InventoryEvent {
    /// Item button clicked
    ItemClicked {
        inventory: InventoryId,
        item: ItemId,
        index: usize,
    },
    /// Item dragged out of the window; the item has left the inventory
    ItemDraggedOut {
        inventory: InventoryId,
        item: Item,
        index: usize,
    },
    /// Item dragged onto another slot of the same inventory
    ItemDraggedToNewSlot {
        inventory: InventoryId,
        item: ItemId,
        old_index: usize,
        new_index: usize,
    },
    /// Popup menu entry clicked
    PopupItemClicked {
        inventory: InventoryId,
        item: ItemId,
        entry: String,
    },
    /// Capacity changed; carries exactly the items evicted by the resize
    Resized {
        inventory: InventoryId,
        old_capacity: usize,
        new_capacity: usize,
        left_behind: Vec<Item>,
    },
}

impl InventoryEvent {
    /// Inventory the event happened in
    pub fn inventory(&self) -> InventoryId {
        match self {
            Self::ItemClicked { inventory, .. }
            | Self::ItemDraggedOut { inventory, .. }
            | Self::ItemDraggedToNewSlot { inventory, .. }
            | Self::PopupItemClicked { inventory, .. }
            | Self::Resized { inventory, .. } => *inventory,
        }
    }

    /// Item the event is about (None for resizes)
    pub fn item(&self) -> Option<ItemId> {
        match self {
            Self::ItemClicked { item, .. }
            | Self::ItemDraggedToNewSlot { item, .. }
            | Self::PopupItemClicked { item, .. } => Some(*item),
            Self::ItemDraggedOut { item, .. } => Some(item.id()),
            Self::Resized { .. } => None,
        }
    }

    /// Short event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemClicked { .. } => "item_clicked",
            Self::ItemDraggedOut { .. } => "item_dragged_out",
            Self::ItemDraggedToNewSlot { .. } => "item_dragged_to_new_slot",
            Self::PopupItemClicked { .. } => "popup_item_clicked",
            Self::Resized { .. } => "inventory_resized",
        }
    }
}
