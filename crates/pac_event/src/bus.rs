//! Synchronous in-process observers of inventory events

use pac_inventory::InventoryEvent;

/// Observer callback
pub type InventoryObserver = Box<dyn Fn(&InventoryEvent) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Event bus for inventory events
///
/// Unlike [`EventRouter`](crate::EventRouter), observers run immediately
/// inside `publish`, so they must not touch the inventory pool.
pub struct InventoryEventBus {
    /// Observers in subscription order
    observers: Vec<(SubscriberId, InventoryObserver)>,
    /// Next subscriber ID
    next_subscriber_id: u64,
    /// Events published so far
    published: u64,
}

impl InventoryEventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_subscriber_id: 1,
            published: 0,
        }
    }

    /// Subscribe to every inventory event
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Unsubscribe, returning whether the id was known
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub_id, _)| *sub_id != id);
        self.observers.len() != before
    }

    /// Hand an event to every observer, in subscription order
    pub fn publish(&mut self, event: &InventoryEvent) {
        self.published += 1;
        log::trace!(
            "Publishing {} for inventory {} to {} observers",
            event.name(),
            event.inventory(),
            self.observers.len()
        );
        for (_, observer) in &self.observers {
            observer(event);
        }
    }

    /// Number of observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if nobody is listening
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Events published so far
    pub fn published_count(&self) -> u64 {
        self.published
    }
}

impl Default for InventoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pac_core::{InventoryId, ItemId};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn click() -> InventoryEvent {
        InventoryEvent::ItemClicked {
            inventory: InventoryId::new(),
            item: ItemId::new(),
            index: 0,
        }
    }

    #[test]
    fn test_publish_reaches_all_observers() {
        let mut bus = InventoryEventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = seen.clone();
            bus.subscribe(move |e| seen.lock().push((tag, e.name())));
        }

        bus.publish(&click());
        assert_eq!(
            *seen.lock(),
            vec![("a", "item_clicked"), ("b", "item_clicked")]
        );
        assert_eq!(bus.published_count(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = InventoryEventBus::new();
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        let id = bus.subscribe(move |_| *c.lock() += 1);

        bus.publish(&click());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&click());

        assert_eq!(*count.lock(), 1);
        assert!(bus.is_empty());
    }
}
