//! Error types for inventory operations

use thiserror::Error;

use crate::id::{InventoryId, ItemId};

/// Result type alias
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Broad failure classes reported across the command boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An inventory or item id did not resolve
    NotFound,
    /// Duplicate add, or no room left
    Conflict,
    /// An argument could not be coerced to its expected type
    InvalidArgument,
}

/// Errors produced by items, inventories and the command layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("Inventory {0} not found")]
    InventoryNotFound(InventoryId),

    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    #[error("No item at slot {0}")]
    EmptySlot(usize),

    #[error("Slot {index} out of range (capacity {capacity})")]
    SlotOutOfRange { index: usize, capacity: usize },

    #[error("Inventory {0} has no free slots")]
    InventoryFull(InventoryId),

    #[error("Item {0} is already in the inventory")]
    DuplicateItem(ItemId),

    #[error("Tag '{0}' already present")]
    DuplicateTag(String),

    #[error("Tag '{0}' not present")]
    MissingTag(String),

    #[error("Popup entry '{0}' already present")]
    DuplicatePopupEntry(String),

    #[error("Popup entry '{0}' not present")]
    MissingPopupEntry(String),

    #[error("Argument {index}: expected {expected}, found {found}")]
    InvalidArgument {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl InventoryError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InventoryNotFound(_)
            | Self::ItemNotFound(_)
            | Self::EmptySlot(_)
            | Self::MissingTag(_)
            | Self::MissingPopupEntry(_) => ErrorKind::NotFound,
            Self::InventoryFull(_)
            | Self::DuplicateItem(_)
            | Self::DuplicateTag(_)
            | Self::DuplicatePopupEntry(_) => ErrorKind::Conflict,
            Self::SlotOutOfRange { .. } | Self::InvalidArgument { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }
}
