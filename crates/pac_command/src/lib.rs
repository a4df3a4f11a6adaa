//! # pac_command - Script Command Protocol
//!
//! Other scripts talk to the inventory subsystem by sending a command name
//! plus a list of loosely-typed positional arguments. This crate owns that
//! boundary:
//!
//! - [`Command`]: the closed catalog of wire names
//! - [`Args`]: positional argument coercion
//! - [`CommandDispatcher`]: one registration table from command to handler,
//!   with uniform inventory-then-item resolution and a panic boundary
//!
//! ```ignore
//! let dispatcher = CommandDispatcher::new();
//! let mut ctx = CommandContext::new(&mut pool, sender).with_player_inventory(player);
//! let free = dispatcher.dispatch("GET_AMOUNT_OF_FREE_SLOTS_IN_INVENTORY", &[player.into()], &mut ctx);
//! ```

pub mod args;
pub mod command;
pub mod dispatcher;
mod handlers;

pub use args::Args;
pub use command::{Command, Sentinel, UnknownCommand};
pub use dispatcher::{CommandContext, CommandDispatcher, Handler, Response};

pub mod prelude {
    pub use crate::{Args, Command, CommandContext, CommandDispatcher, Response};
}
