//! Command catalog

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use pac_core::{InventoryId, Value};
use pac_event::ItemEventKind;

/// Every command the dispatcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Inventory
    GetPlayerInventoryId,
    GetAmountOfFreeSlotsInInventory,

    // Item
    AddNewItemToInventory,
    RemoveItemFromInventory,
    DoesItemExistsInInventory,

    // Tag
    AddTagToItem,
    RemoveTagFromItem,
    DoesItemHaveTag,

    // Popup item
    AddPopupItemToItem,
    RemovePopupItemFromItem,
    DoesItemHavePopupItem,

    // Icon
    AddIconToItem,
    RemoveIconFromItem,

    // Tooltip and flags
    SetItemTooltip,
    SetItemNotRemovedFromInventoryOnModUnload,

    // Events
    Subscribe(ItemEventKind),
    Unsubscribe(ItemEventKind),
}

/// What a command returns when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    False,
    Zero,
    NilId,
}

impl Sentinel {
    /// The failure value itself
    pub fn value(self) -> Value {
        match self {
            Self::False => Value::Bool(false),
            Self::Zero => Value::Int(0),
            Self::NilId => Value::from(InventoryId::nil()),
        }
    }
}

impl Command {
    /// Every command, events expanded per kind
    pub fn all() -> Vec<Command> {
        let mut all = vec![
            Self::GetPlayerInventoryId,
            Self::GetAmountOfFreeSlotsInInventory,
            Self::AddNewItemToInventory,
            Self::RemoveItemFromInventory,
            Self::DoesItemExistsInInventory,
            Self::AddTagToItem,
            Self::RemoveTagFromItem,
            Self::DoesItemHaveTag,
            Self::AddPopupItemToItem,
            Self::RemovePopupItemFromItem,
            Self::DoesItemHavePopupItem,
            Self::AddIconToItem,
            Self::RemoveIconFromItem,
            Self::SetItemTooltip,
            Self::SetItemNotRemovedFromInventoryOnModUnload,
        ];
        for kind in ItemEventKind::ALL {
            all.push(Self::Subscribe(kind));
            all.push(Self::Unsubscribe(kind));
        }
        all
    }

    /// Wire name
    pub fn name(self) -> &'static str {
        use ItemEventKind::*;
        match self {
            Self::GetPlayerInventoryId => "GET_PLAYER_INVENTORY_ID",
            Self::GetAmountOfFreeSlotsInInventory => "GET_AMOUNT_OF_FREE_SLOTS_IN_INVENTORY",
            Self::AddNewItemToInventory => "ADD_NEW_ITEM_TO_INVENTORY",
            Self::RemoveItemFromInventory => "REMOVE_ITEM_FROM_INVENTORY",
            Self::DoesItemExistsInInventory => "DOES_ITEM_EXISTS_IN_INVENTORY",
            Self::AddTagToItem => "ADD_TAG_TO_ITEM",
            Self::RemoveTagFromItem => "REMOVE_TAG_FROM_ITEM",
            Self::DoesItemHaveTag => "DOES_ITEM_HAVE_TAG",
            Self::AddPopupItemToItem => "ADD_POPUP_ITEM_TO_ITEM",
            Self::RemovePopupItemFromItem => "REMOVE_POPUP_ITEM_FROM_ITEM",
            Self::DoesItemHavePopupItem => "DOES_ITEM_HAVE_POPUP_ITEM",
            Self::AddIconToItem => "ADD_ICON_TO_ITEM",
            Self::RemoveIconFromItem => "REMOVE_ICON_FROM_ITEM",
            Self::SetItemTooltip => "SET_ITEM_TOOLTIP",
            Self::SetItemNotRemovedFromInventoryOnModUnload => {
                "SET_ITEM_NOT_REMOVED_FROM_INVENTORY_ON_MOD_UNLOAD"
            }
            Self::Subscribe(DraggedOut) => "SUBSCRIBE_TO_ON_ITEM_DRAGGED_OUT_EVENT_FOR_ITEM",
            Self::Subscribe(DraggedToNewSlot) => {
                "SUBSCRIBE_TO_ON_ITEM_DRAGGED_TO_NEW_SLOT_EVENT_FOR_ITEM"
            }
            Self::Subscribe(Click) => "SUBSCRIBE_TO_ON_ITEM_CLICK_EVENT_FOR_ITEM",
            Self::Subscribe(PopupClick) => "SUBSCRIBE_TO_ON_POPUP_ITEM_CLICK_EVENT_FOR_ITEM",
            Self::Unsubscribe(DraggedOut) => "UNSUBSCRIBE_FROM_ON_ITEM_DRAGGED_OUT_EVENT_FOR_ITEM",
            Self::Unsubscribe(DraggedToNewSlot) => {
                "UNSUBSCRIBE_FROM_ON_ITEM_DRAGGED_TO_NEW_SLOT_EVENT_FOR_ITEM"
            }
            Self::Unsubscribe(Click) => "UNSUBSCRIBE_FROM_ON_ITEM_CLICK_EVENT_FOR_ITEM",
            Self::Unsubscribe(PopupClick) => "UNSUBSCRIBE_FROM_ON_POPUP_ITEM_CLICK_EVENT_FOR_ITEM",
        }
    }

    /// Look up a command by wire name
    ///
    /// Unsubscribe commands are also accepted with `UNSUBSCRIBE_TO_`.
    pub fn from_name(name: &str) -> Option<Command> {
        if let Some(kind) = event_kind(name, "SUBSCRIBE_TO_") {
            return Some(Self::Subscribe(kind));
        }
        if let Some(kind) = event_kind(name, "UNSUBSCRIBE_FROM_")
            .or_else(|| event_kind(name, "UNSUBSCRIBE_TO_"))
        {
            return Some(Self::Unsubscribe(kind));
        }
        Self::all().into_iter().find(|c| c.name() == name)
    }

    /// Result reported when the command fails
    pub fn sentinel(self) -> Sentinel {
        match self {
            Self::GetPlayerInventoryId | Self::AddNewItemToInventory => Sentinel::NilId,
            Self::GetAmountOfFreeSlotsInInventory => Sentinel::Zero,
            _ => Sentinel::False,
        }
    }
}

/// `{prefix}{EVENT}_EVENT_FOR_ITEM` -> event kind
fn event_kind(name: &str, prefix: &str) -> Option<ItemEventKind> {
    let event = name.strip_prefix(prefix)?.strip_suffix("_EVENT_FOR_ITEM")?;
    ItemEventKind::from_event_name(event)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown command name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let all = Command::all();
        assert_eq!(all.len(), 23);
        for command in all {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn test_unsubscribe_aliases() {
        let expected = Some(Command::Unsubscribe(ItemEventKind::Click));
        assert_eq!(
            Command::from_name("UNSUBSCRIBE_FROM_ON_ITEM_CLICK_EVENT_FOR_ITEM"),
            expected
        );
        assert_eq!(
            Command::from_name("UNSUBSCRIBE_TO_ON_ITEM_CLICK_EVENT_FOR_ITEM"),
            expected
        );
    }

    #[test]
    fn test_unknown_names() {
        assert!("DANCE".parse::<Command>().is_err());
        assert!(Command::from_name("SUBSCRIBE_TO_ON_ITEM_EATEN_EVENT_FOR_ITEM").is_none());
        assert!(Command::from_name("get_player_inventory_id").is_none());
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Command::AddNewItemToInventory.sentinel(), Sentinel::NilId);
        assert_eq!(Command::GetAmountOfFreeSlotsInInventory.sentinel().value(), Value::Int(0));
        assert_eq!(Command::AddTagToItem.sentinel().value(), Value::Bool(false));
    }
}
