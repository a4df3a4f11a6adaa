//! # pac_event - Item Event Routing
//!
//! Delivers UI events on items to the scripts that asked for them:
//! - Subscriptions live as tags on the item, so they die with it
//! - Fired events become typed notifications in a FIFO queue
//! - The queue is drained once per host tick, before any other inventory
//!   logic, so subscribers never run inside the render pass that fired
//!   the event
//!
//! In-process observers can also watch every [`InventoryEvent`] through the
//! synchronous [`InventoryEventBus`].
//!
//! [`InventoryEvent`]: pac_inventory::InventoryEvent

pub mod bus;
pub mod kind;
pub mod notification;
pub mod router;

pub use bus::{InventoryEventBus, InventoryObserver, SubscriberId};
pub use kind::ItemEventKind;
pub use notification::ItemNotification;
pub use router::{
    subscribe, subscriber, unsubscribe, DeliveryError, DrainReport, EventRouter, PendingDelivery,
    ScriptHost,
};

/// Prelude
pub mod prelude {
    pub use crate::{
        DeliveryError, DrainReport, EventRouter, InventoryEventBus, ItemEventKind,
        ItemNotification, ScriptHost, SubscriberId,
    };
}
