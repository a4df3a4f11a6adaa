//! Typed event descriptors queued for delivery

use pac_core::{InventoryId, ItemId, Value};

use crate::kind::ItemEventKind;

/// A fired item event, waiting to be sent to its subscriber
#[derive(Debug, Clone, PartialEq)]
pub enum ItemNotification {
    DraggedOut {
        inventory: InventoryId,
        item: ItemId,
        index: usize,
    },
    DraggedToNewSlot {
        inventory: InventoryId,
        item: ItemId,
        old_index: usize,
        new_index: usize,
    },
    Clicked {
        inventory: InventoryId,
        item: ItemId,
        index: usize,
    },
    PopupItemClicked {
        inventory: InventoryId,
        item: ItemId,
        entry: String,
    },
}

impl ItemNotification {
    /// Event kind of this notification
    pub fn kind(&self) -> ItemEventKind {
        match self {
            Self::DraggedOut { .. } => ItemEventKind::DraggedOut,
            Self::DraggedToNewSlot { .. } => ItemEventKind::DraggedToNewSlot,
            Self::Clicked { .. } => ItemEventKind::Click,
            Self::PopupItemClicked { .. } => ItemEventKind::PopupClick,
        }
    }

    /// Item the notification is about
    pub fn item(&self) -> ItemId {
        match self {
            Self::DraggedOut { item, .. }
            | Self::DraggedToNewSlot { item, .. }
            | Self::Clicked { item, .. }
            | Self::PopupItemClicked { item, .. } => *item,
        }
    }

    /// Positional command arguments: inventory id, item id, then the
    /// event-specific values
    pub fn args(&self) -> Vec<Value> {
        match self {
            Self::DraggedOut {
                inventory,
                item,
                index,
            }
            | Self::Clicked {
                inventory,
                item,
                index,
            } => vec![(*inventory).into(), (*item).into(), (*index).into()],
            Self::DraggedToNewSlot {
                inventory,
                item,
                old_index,
                new_index,
            } => vec![
                (*inventory).into(),
                (*item).into(),
                (*old_index).into(),
                (*new_index).into(),
            ],
            Self::PopupItemClicked {
                inventory,
                item,
                entry,
            } => vec![(*inventory).into(), (*item).into(), entry.as_str().into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_layout() {
        let inventory = InventoryId::new();
        let item = ItemId::new();
        let n = ItemNotification::DraggedToNewSlot {
            inventory,
            item,
            old_index: 2,
            new_index: 5,
        };

        assert_eq!(n.kind(), ItemEventKind::DraggedToNewSlot);
        assert_eq!(
            n.args(),
            vec![
                Value::from(inventory),
                Value::from(item),
                Value::Int(2),
                Value::Int(5)
            ]
        );
    }

    #[test]
    fn test_popup_args() {
        let n = ItemNotification::PopupItemClicked {
            inventory: InventoryId::new(),
            item: ItemId::new(),
            entry: "Drop".into(),
        };
        assert_eq!(n.args()[2], Value::from("Drop"));
    }
}
