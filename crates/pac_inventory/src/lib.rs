//! Pack and Carry Inventory - Items, Inventories and the Pool
//!
//! This crate provides the object model behind the in-game inventory UI.
//!
//! # Features
//!
//! - Items with display text, icons, popup menu entries and an open tag map
//! - Fixed-capacity inventories with stable slot positions
//! - Capacity resize with left-behind items
//! - An owning pool that is the only route to inventories and their items
//! - Shared texture references for item icons
//!
//! # Example
//!
//! ```ignore
//! use pac_inventory::prelude::*;
//!
//! let mut pool = InventoryPool::new();
//! let id = pool.add(Inventory::new("PlayerInventory", 10));
//!
//! let item = Item::new(joaat("WEAPON_PISTOL")).with_top_left_text("Pistol");
//! pool.resolve_mut(id)?.add_item(item)?;
//! ```

pub mod event;
pub mod inventory;
pub mod item;
pub mod pool;
pub mod tags;
pub mod texture;

pub mod prelude {
    pub use crate::event::InventoryEvent;
    pub use crate::inventory::Inventory;
    pub use crate::item::Item;
    pub use crate::pool::InventoryPool;
    pub use crate::tags::{ItemTags, WellKnownTag};
    pub use crate::texture::{Texture, TextureCache, TextureRef};
    pub use pac_core::joaat;
}

pub use prelude::*;
