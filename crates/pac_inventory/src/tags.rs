//! Item tags
//!
//! Tags are the extension point that stands in for item subtypes: a marker
//! key such as `IS_GAME_WEAPON` changes how the runtime treats an item
//! without any type hierarchy. Keys are unique; adding a present key fails
//! rather than overwriting.

use std::collections::HashMap;

use pac_core::{InventoryError, Result, Value};

/// Tag keys the subsystem itself reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownTag {
    /// Marks an item mirroring one of the player's game weapons
    IsGameWeapon,
    /// Weapon type of a game weapon item (int)
    WeaponType,
    /// Item weight (float)
    Weight,
    /// Item added by another script; value is the owner's script id
    IsCustomItem,
    /// Keep a custom item after its owner script stops running
    KeepOnOwnerUnload,
}

impl WellKnownTag {
    /// All well-known tags
    pub const ALL: [WellKnownTag; 5] = [
        Self::IsGameWeapon,
        Self::WeaponType,
        Self::Weight,
        Self::IsCustomItem,
        Self::KeepOnOwnerUnload,
    ];

    /// Tag key as stored in the tag map
    pub const fn key(self) -> &'static str {
        match self {
            Self::IsGameWeapon => "IS_GAME_WEAPON",
            Self::WeaponType => "WeaponType",
            Self::Weight => "WEIGHT",
            Self::IsCustomItem => "IS_CUSTOM_ITEM",
            Self::KeepOnOwnerUnload => "DO_NOT_REMOVE_ITEM_WHEN_MOD_THAT_ADDED_IT_UNLOADS",
        }
    }
}

impl AsRef<str> for WellKnownTag {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

/// String-keyed tag map with reject-on-duplicate semantics
#[derive(Debug, Clone, Default)]
pub struct ItemTags {
    entries: HashMap<String, Value>,
}

impl ItemTags {
    /// Create an empty tag map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag; fails if the key is already present
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(InventoryError::DuplicateTag(key));
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Remove a tag, returning its value; fails if the key is absent
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        self.entries
            .remove(key)
            .ok_or_else(|| InventoryError::MissingTag(key.to_string()))
    }

    /// Check if a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get a tag value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no tags
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all tags (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
