//! Deferred event router
//!
//! A UI callback may fire while the render pass is still walking the
//! inventory pool. Sending the subscriber its command right away would let
//! it mutate the pool mid-iteration, so notifications are queued instead and
//! the host drains the queue at the very start of its next tick.

use std::collections::VecDeque;
use thiserror::Error;

use pac_core::{Result, ScriptId, Value};
use pac_inventory::Item;

use crate::kind::ItemEventKind;
use crate::notification::ItemNotification;

/// Reasons a queued notification could not be delivered
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeliveryError {
    #[error("Script {0} is not running")]
    ScriptNotRunning(ScriptId),

    #[error("Script {target} rejected '{command}': {reason}")]
    Rejected {
        target: ScriptId,
        command: String,
        reason: String,
    },
}

/// The host's script table, as seen by the inventory subsystem
pub trait ScriptHost {
    /// Send a named command with positional arguments to another script
    fn send_command(
        &mut self,
        target: ScriptId,
        command: &str,
        args: &[Value],
    ) -> std::result::Result<Value, DeliveryError>;

    /// Check if a script is still loaded and running
    fn is_script_running(&self, script: ScriptId) -> bool;
}

/// Record `script` as the subscriber for `kind` events on `item`
///
/// Fails if the item already has a subscriber for that kind.
pub fn subscribe(item: &mut Item, kind: ItemEventKind, script: ScriptId) -> Result<()> {
    item.add_tag(kind.subscription_tag(), script)
}

/// Remove the subscription for `kind` events on `item`
///
/// Fails if there was none.
pub fn unsubscribe(item: &mut Item, kind: ItemEventKind) -> Result<()> {
    item.remove_tag(kind.subscription_tag()).map(|_| ())
}

/// Current subscriber for `kind` events on `item`
pub fn subscriber(item: &Item, kind: ItemEventKind) -> Option<ScriptId> {
    item.tag(kind.subscription_tag())?
        .to_uuid()
        .map(ScriptId::from_uuid)
        .filter(|id| !id.is_nil())
}

/// A notification bound to its target script
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelivery {
    pub target: ScriptId,
    pub command: String,
    pub notification: ItemNotification,
}

/// Outcome of one queue drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Notifications the target accepted
    pub delivered: usize,
    /// Notifications dropped because delivery failed
    pub dropped: usize,
}

impl DrainReport {
    /// Total notifications processed
    pub fn total(&self) -> usize {
        self.delivered + self.dropped
    }
}

/// FIFO router from item events to subscriber scripts
pub struct EventRouter {
    /// Pending deliveries, oldest first
    queue: VecDeque<PendingDelivery>,
    /// Prepended to every outbound command name
    command_prefix: String,
    /// Lifetime counters
    total_delivered: u64,
    total_dropped: u64,
}

impl EventRouter {
    /// Create a router with unprefixed command names
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            command_prefix: String::new(),
            total_delivered: 0,
            total_dropped: 0,
        }
    }

    /// Set the outbound command name prefix
    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    /// Full outbound command name for an event kind
    pub fn command_for(&self, kind: ItemEventKind) -> String {
        format!("{}{}", self.command_prefix, kind.command_name())
    }

    /// Queue `notification` for the item's subscriber, if it has one
    ///
    /// `item` must be the item the notification refers to. Returns whether
    /// anything was queued.
    pub fn notify(&mut self, item: &Item, notification: ItemNotification) -> bool {
        debug_assert_eq!(item.id(), notification.item());

        let kind = notification.kind();
        let Some(target) = subscriber(item, kind) else {
            return false;
        };

        let command = self.command_for(kind);
        log::debug!("Queued '{}' for script {} (item {})", command, target, item.id());
        self.queue.push_back(PendingDelivery {
            target,
            command,
            notification,
        });
        true
    }

    /// Deliver everything queued so far, oldest first
    ///
    /// Failed deliveries are logged and discarded, never retried.
    pub fn drain(&mut self, host: &mut dyn ScriptHost) -> DrainReport {
        let mut report = DrainReport::default();
        let pending = std::mem::take(&mut self.queue);

        for delivery in pending {
            let args = delivery.notification.args();
            match host.send_command(delivery.target, &delivery.command, &args) {
                Ok(_) => {
                    log::debug!(
                        "'{}' was sent to script {} for item {}",
                        delivery.command,
                        delivery.target,
                        delivery.notification.item()
                    );
                    report.delivered += 1;
                }
                Err(e) => {
                    log::warn!("Could not send '{}': {}", delivery.command, e);
                    report.dropped += 1;
                }
            }
        }

        self.total_delivered += report.delivered as u64;
        self.total_dropped += report.dropped as u64;
        report
    }

    /// Pending deliveries, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &PendingDelivery> {
        self.queue.iter()
    }

    /// Number of pending deliveries
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Check if anything is pending
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Discard everything pending
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Lifetime (delivered, dropped) counts
    pub fn totals(&self) -> (u64, u64) {
        (self.total_delivered, self.total_dropped)
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pac_core::InventoryId;

    #[derive(Default)]
    struct RecordingHost {
        sent: Vec<(ScriptId, String, Vec<Value>)>,
        offline: Vec<ScriptId>,
    }

    impl ScriptHost for RecordingHost {
        fn send_command(
            &mut self,
            target: ScriptId,
            command: &str,
            args: &[Value],
        ) -> std::result::Result<Value, DeliveryError> {
            if self.offline.contains(&target) {
                return Err(DeliveryError::ScriptNotRunning(target));
            }
            self.sent.push((target, command.to_string(), args.to_vec()));
            Ok(Value::Null)
        }

        fn is_script_running(&self, script: ScriptId) -> bool {
            !self.offline.contains(&script)
        }
    }

    fn clicked(inventory: InventoryId, item: &Item, index: usize) -> ItemNotification {
        ItemNotification::Clicked {
            inventory,
            item: item.id(),
            index,
        }
    }

    #[test]
    fn test_subscription_state() {
        let mut item = Item::new(0);
        let script = ScriptId::new();

        assert_eq!(subscriber(&item, ItemEventKind::Click), None);
        subscribe(&mut item, ItemEventKind::Click, script).unwrap();
        assert_eq!(subscriber(&item, ItemEventKind::Click), Some(script));

        // Second subscription to the same kind is rejected
        assert!(subscribe(&mut item, ItemEventKind::Click, ScriptId::new()).is_err());
        assert_eq!(subscriber(&item, ItemEventKind::Click), Some(script));

        unsubscribe(&mut item, ItemEventKind::Click).unwrap();
        assert!(unsubscribe(&mut item, ItemEventKind::Click).is_err());
        assert_eq!(subscriber(&item, ItemEventKind::Click), None);
    }

    #[test]
    fn test_notify_without_subscriber() {
        let mut router = EventRouter::new();
        let item = Item::new(0);
        assert!(!router.notify(&item, clicked(InventoryId::new(), &item, 0)));
        assert_eq!(router.pending_count(), 0);
    }

    #[test]
    fn test_delivery_is_deferred_until_drain() {
        let mut router = EventRouter::new();
        let mut host = RecordingHost::default();
        let script = ScriptId::new();
        let inventory = InventoryId::new();

        let mut item = Item::new(0);
        subscribe(&mut item, ItemEventKind::Click, script).unwrap();

        assert!(router.notify(&item, clicked(inventory, &item, 3)));
        assert!(host.sent.is_empty());

        let report = router.drain(&mut host);
        assert_eq!(report.delivered, 1);
        assert_eq!(host.sent.len(), 1);

        let (target, command, args) = &host.sent[0];
        assert_eq!(*target, script);
        assert_eq!(command, "ON_ITEM_CLICKED");
        assert_eq!(args[0], Value::from(inventory));
        assert_eq!(args[1], Value::from(item.id()));
        assert_eq!(args[2], Value::Int(3));

        assert_eq!(router.drain(&mut host).total(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut router = EventRouter::new();
        let mut host = RecordingHost::default();
        let script = ScriptId::new();
        let inventory = InventoryId::new();

        let mut item = Item::new(0);
        subscribe(&mut item, ItemEventKind::Click, script).unwrap();
        for index in 0..5 {
            router.notify(&item, clicked(inventory, &item, index));
        }
        router.drain(&mut host);

        let indices: Vec<_> = host.sent.iter().map(|(_, _, a)| a[2].clone()).collect();
        assert_eq!(indices, (0..5).map(Value::from).collect::<Vec<Value>>());
    }

    #[test]
    fn test_failed_delivery_is_dropped() {
        let mut router = EventRouter::new();
        let script = ScriptId::new();
        let mut host = RecordingHost {
            offline: vec![script],
            ..Default::default()
        };

        let mut item = Item::new(0);
        subscribe(&mut item, ItemEventKind::Click, script).unwrap();
        router.notify(&item, clicked(InventoryId::new(), &item, 0));

        let report = router.drain(&mut host);
        assert_eq!(report, DrainReport { delivered: 0, dropped: 1 });
        assert!(!router.has_pending());
        assert_eq!(router.totals(), (0, 1));
    }

    #[test]
    fn test_command_prefix() {
        let router = EventRouter::new().with_command_prefix("PAC_");
        assert_eq!(router.command_for(ItemEventKind::PopupClick), "PAC_ON_POPUP_ITEM_CLICKED");
    }
}
