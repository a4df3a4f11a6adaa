//! Catalog of subscribable item events

use std::fmt;

/// UI event kinds a script can subscribe to per item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemEventKind {
    /// Item dragged out of the inventory window
    DraggedOut,
    /// Item dragged onto another slot
    DraggedToNewSlot,
    /// Item button clicked
    Click,
    /// Popup menu entry clicked
    PopupClick,
}

impl ItemEventKind {
    /// All event kinds
    pub const ALL: [ItemEventKind; 4] = [
        Self::DraggedOut,
        Self::DraggedToNewSlot,
        Self::Click,
        Self::PopupClick,
    ];

    /// Item tag recording the subscriber's script id
    pub const fn subscription_tag(self) -> &'static str {
        match self {
            Self::DraggedOut => "WANTS_ON_ITEM_DRAGGED_OUT_EVENTS",
            Self::DraggedToNewSlot => "WANTS_ON_ITEM_DRAGGED_TO_NEW_SLOT_EVENTS",
            Self::Click => "WANTS_ON_ITEM_CLICK_EVENTS",
            Self::PopupClick => "WANTS_ON_POPUP_ITEM_CLICK_EVENTS",
        }
    }

    /// Name of the command sent to the subscriber (before any prefix)
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::DraggedOut => "ON_ITEM_DRAGGED_OUT",
            Self::DraggedToNewSlot => "ON_ITEM_DRAGGED_TO_NEW_SLOT",
            Self::Click => "ON_ITEM_CLICKED",
            Self::PopupClick => "ON_POPUP_ITEM_CLICKED",
        }
    }

    /// Event name as it appears in SUBSCRIBE/UNSUBSCRIBE command names
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::DraggedOut => "ON_ITEM_DRAGGED_OUT",
            Self::DraggedToNewSlot => "ON_ITEM_DRAGGED_TO_NEW_SLOT",
            Self::Click => "ON_ITEM_CLICK",
            Self::PopupClick => "ON_POPUP_ITEM_CLICK",
        }
    }

    /// Look up a kind by its subscription-command event name
    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.event_name() == name)
    }
}

impl fmt::Display for ItemEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
