//! Command dispatcher
//!
//! Decodes `(name, args)` requests from other scripts into pool operations.
//! Nothing crosses this boundary as a fault: handler errors become the
//! command's failure sentinel and handler panics become `Unhandled`.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use pac_core::{InventoryError, InventoryId, Result, ScriptId, Value};
use pac_inventory::{Inventory, InventoryPool, Item};

use crate::args::Args;
use crate::command::Command;
use crate::handlers;

/// Command handler
pub type Handler = Box<dyn Fn(&mut CommandContext<'_>, &Args<'_>) -> Result<Value> + Send + Sync>;

/// Dispatch outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The command was recognised; carries its result or failure sentinel
    Handled(Value),
    /// Not ours (or the handler blew up); the caller tries its next handler
    Unhandled,
}

impl Response {
    /// Check if the command was handled
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// Result value, if handled
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Handled(value) => Some(value),
            Self::Unhandled => None,
        }
    }
}

/// Everything a handler may touch while serving one request
pub struct CommandContext<'a> {
    /// The inventory pool
    pub pool: &'a mut InventoryPool,
    /// Id of the player inventory, if it exists
    pub player_inventory: Option<InventoryId>,
    /// Script that sent the command
    pub sender: ScriptId,
}

impl<'a> CommandContext<'a> {
    /// Create a context
    pub fn new(pool: &'a mut InventoryPool, sender: ScriptId) -> Self {
        Self {
            pool,
            player_inventory: None,
            sender,
        }
    }

    /// Set the player inventory id
    pub fn with_player_inventory(mut self, id: InventoryId) -> Self {
        self.player_inventory = Some(id);
        self
    }

    /// Resolve the inventory named by argument 0
    pub fn resolve_inventory(&mut self, args: &Args<'_>) -> Result<&mut Inventory> {
        let id = args.inventory_id(0)?;
        self.pool.resolve_mut(id)
    }

    /// Resolve argument 0 through the pool, then argument 1 through that
    /// inventory
    pub fn resolve_item(&mut self, args: &Args<'_>) -> Result<&mut Item> {
        let inventory = self.resolve_inventory(args)?;
        let id = args.item_id(1)?;
        inventory
            .get_item_mut(id)
            .ok_or(InventoryError::ItemNotFound(id))
    }
}

/// Maps command names to handlers
pub struct CommandDispatcher {
    handlers: HashMap<Command, Handler>,
}

impl CommandDispatcher {
    /// Create a dispatcher with every command registered
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        handlers::register_all(&mut dispatcher);
        dispatcher
    }

    /// Create a dispatcher with no commands
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for a command
    pub fn register<F>(&mut self, command: Command, handler: F)
    where
        F: Fn(&mut CommandContext<'_>, &Args<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(command, Box::new(handler));
    }

    /// Check if a command has a handler
    pub fn handles(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Serve one request
    pub fn dispatch(&self, name: &str, args: &[Value], ctx: &mut CommandContext<'_>) -> Response {
        let Some(command) = Command::from_name(name) else {
            return Response::Unhandled;
        };
        let Some(handler) = self.handlers.get(&command) else {
            return Response::Unhandled;
        };

        let args = Args::new(args);
        let sender = ctx.sender;
        match panic::catch_unwind(AssertUnwindSafe(|| handler(ctx, &args))) {
            Ok(Ok(value)) => Response::Handled(value),
            Ok(Err(e)) => {
                log::debug!("Command '{}' from script {} failed: {}", command, sender, e);
                Response::Handled(command.sentinel().value())
            }
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                log::error!(
                    "Command '{}' which was sent by script {} panicked: {}",
                    command,
                    sender,
                    message
                );
                Response::Unhandled
            }
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_registered() {
        let dispatcher = CommandDispatcher::new();
        for command in Command::all() {
            assert!(dispatcher.handles(command), "{} has no handler", command);
        }
        assert_eq!(dispatcher.len(), Command::all().len());
    }

    #[test]
    fn test_unknown_command() {
        let dispatcher = CommandDispatcher::new();
        let mut pool = InventoryPool::new();
        let mut ctx = CommandContext::new(&mut pool, ScriptId::new());
        assert_eq!(dispatcher.dispatch("FLY", &[], &mut ctx), Response::Unhandled);
    }

    #[test]
    fn test_unregistered_command() {
        let dispatcher = CommandDispatcher::empty();
        let mut pool = InventoryPool::new();
        let mut ctx = CommandContext::new(&mut pool, ScriptId::new());
        let response = dispatcher.dispatch("GET_PLAYER_INVENTORY_ID", &[], &mut ctx);
        assert_eq!(response, Response::Unhandled);
    }

    #[test]
    fn test_panic_becomes_unhandled() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register(Command::SetItemTooltip, |_, _| panic!("boom"));

        let mut pool = InventoryPool::new();
        let mut ctx = CommandContext::new(&mut pool, ScriptId::new());
        let response = dispatcher.dispatch("SET_ITEM_TOOLTIP", &[], &mut ctx);
        assert_eq!(response, Response::Unhandled);

        // The dispatcher keeps working afterwards
        let response = dispatcher.dispatch("DOES_ITEM_HAVE_TAG", &[], &mut ctx);
        assert_eq!(response, Response::Handled(Value::Bool(false)));
    }

    #[test]
    fn test_two_stage_resolution() {
        let mut pool = InventoryPool::new();
        let inv = pool.add(Inventory::new("a", 2));
        let item = Item::new(1);
        let item_id = item.id();
        pool.get_mut(inv).unwrap().add_item(item).unwrap();

        let mut ctx = CommandContext::new(&mut pool, ScriptId::new());

        let values = [Value::from(inv), Value::from(item_id)];
        assert_eq!(ctx.resolve_item(&Args::new(&values)).unwrap().id(), item_id);

        let values = [Value::from(InventoryId::new()), Value::from(item_id)];
        assert!(matches!(
            ctx.resolve_item(&Args::new(&values)),
            Err(InventoryError::InventoryNotFound(_))
        ));

        let stray = pac_core::ItemId::new();
        let values = [Value::from(inv), Value::from(stray)];
        assert_eq!(
            ctx.resolve_item(&Args::new(&values)).unwrap_err(),
            InventoryError::ItemNotFound(stray)
        );
    }
}
