//! # pac_core - Pack and Carry Core
//!
//! Primitives shared by every layer of the inventory subsystem:
//! - **Identities**: opaque, globally unique tokens for inventories, items
//!   and scripts
//! - **Values**: the loosely-typed argument/result type that crosses the
//!   script command boundary
//! - **Errors**: the failure taxonomy every core operation reports with

pub mod error;
pub mod hash;
pub mod id;
pub mod value;

pub use error::{ErrorKind, InventoryError, Result};
pub use hash::joaat;
pub use id::{InventoryId, ItemId, ScriptId};
pub use value::Value;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ErrorKind, InventoryError, Result};
    pub use crate::id::{InventoryId, ItemId, ScriptId};
    pub use crate::value::Value;
}
