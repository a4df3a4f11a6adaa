//! # pac_runtime - Pack and Carry
//!
//! Runs the inventory subsystem inside a host game:
//! - Mirrors the player's weapons as inventory items
//! - Removes custom items whose owner script stopped
//! - Grows or shrinks the player inventory with the worn clothing
//! - Drops weapons into the world when they leave the inventory
//! - Slows time while the inventory is open, and slows a heavily loaded
//!   sprinting player
//!
//! The game is reached only through [`GameHost`] and other scripts only
//! through [`ScriptHost`](pac_event::ScriptHost).
//!
//! ```ignore
//! let settings = ModSettings::load("PackAndCarry.toml")?;
//! let data = GameData::load_dir("PackAndCarry");
//! let mut pac = PackAndCarry::new(settings, data);
//!
//! pac.on_game_load(&mut game);
//! loop {
//!     pac.tick(&mut game, &mut scripts);
//! }
//! ```

pub mod data;
pub mod host;
pub mod impacts;
pub mod runtime;
pub mod settings;
pub mod weapons;

pub use data::{DataError, GameData, ItemWeights, SuseSlotTable, SuseSlots};
pub use host::{GameHost, HeldWeapon, Vec3};
pub use runtime::{PackAndCarry, TickReport, PLAYER_INVENTORY_NAME};
pub use settings::{ModSettings, SettingsError};

pub mod prelude {
    pub use crate::{GameData, GameHost, HeldWeapon, ModSettings, PackAndCarry, TickReport};
    pub use pac_command::Response;
    pub use pac_core::{InventoryId, ItemId, ScriptId, Value};
    pub use pac_event::{DeliveryError, ScriptHost};
}
