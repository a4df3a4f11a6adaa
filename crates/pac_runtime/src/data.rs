//! JSON data tables shipped next to the settings file
//!
//! - `playerSuseSlots.json`: per episode, extra slots granted by a clothing
//!   drawable
//! - `predefinedItemWeights.json`: weapon display name to weight

use std::collections::HashMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the clothing slot table
pub const SUSE_SLOTS_FILE: &str = "playerSuseSlots.json";
/// File name of the item weight table
pub const ITEM_WEIGHTS_FILE: &str = "predefinedItemWeights.json";

/// Data file errors
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extra slots granted by one clothing drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuseSlots {
    #[serde(rename = "Index")]
    pub index: u32,
    #[serde(rename = "AdditionalSlots")]
    pub additional_slots: i32,
}

/// Clothing slot table keyed by episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuseSlotTable(HashMap<u32, Vec<SuseSlots>>);

impl SuseSlotTable {
    /// Parse from JSON text
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Extra slots for a drawable in an episode, if listed
    pub fn additional_slots(&self, episode: u32, drawable: u32) -> Option<i32> {
        self.0
            .get(&episode)?
            .iter()
            .find(|s| s.index == drawable)
            .map(|s| s.additional_slots)
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, episode: u32, slots: SuseSlots) {
        let entries = self.0.entry(episode).or_default();
        entries.retain(|s| s.index != slots.index);
        entries.push(slots);
    }

    /// Number of episodes listed
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Weight per weapon display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemWeights(HashMap<String, f32>);

impl ItemWeights {
    /// Parse from JSON text
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.0.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, weight: f32) {
        self.0.insert(name.into(), weight);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Both data tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameData {
    pub suse_slots: SuseSlotTable,
    pub item_weights: ItemWeights,
}

impl GameData {
    /// Load both tables from a directory
    ///
    /// Missing or broken files are logged and leave their table empty, so
    /// the features depending on them are simply unavailable.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let suse_slots = load_table(&dir.join(SUSE_SLOTS_FILE), SuseSlotTable::from_json);
        let item_weights = load_table(&dir.join(ITEM_WEIGHTS_FILE), ItemWeights::from_json);

        log::info!(
            "Loaded {} player suse slot episode(s) and {} predefined item weight(s)",
            suse_slots.len(),
            item_weights.len()
        );
        Self {
            suse_slots,
            item_weights,
        }
    }
}

fn load_table<T: Default>(path: &Path, parse: fn(&str) -> Result<T, DataError>) -> T {
    if !path.exists() {
        log::warn!(
            "Could not find {}! Some features might not be available.",
            path.display()
        );
        return T::default();
    }

    match std::fs::read_to_string(path)
        .map_err(DataError::from)
        .and_then(|json| parse(&json))
    {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suse_slot_lookup() {
        let table = SuseSlotTable::from_json(
            r#"{ "1": [ { "Index": 2, "AdditionalSlots": 4 }, { "Index": 5, "AdditionalSlots": 8 } ] }"#,
        )
        .unwrap();

        assert_eq!(table.additional_slots(1, 5), Some(8));
        assert_eq!(table.additional_slots(1, 3), None);
        assert_eq!(table.additional_slots(2, 2), None);
    }

    #[test]
    fn test_item_weights() {
        let weights = ItemWeights::from_json(r#"{ "Pistol": 2.5, "Rocket Launcher": 20 }"#).unwrap();
        assert_eq!(weights.get("Pistol"), Some(2.5));
        assert_eq!(weights.get("Rocket Launcher"), Some(20.0));
        assert_eq!(weights.get("Spoon"), None);
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ITEM_WEIGHTS_FILE), r#"{ "Knife": 1.0 }"#).unwrap();
        std::fs::write(dir.path().join(SUSE_SLOTS_FILE), "not json").unwrap();

        let data = GameData::load_dir(dir.path());
        assert_eq!(data.item_weights.get("Knife"), Some(1.0));
        assert!(data.suse_slots.is_empty());
    }

    #[test]
    fn test_insert_replaces_entry() {
        let mut table = SuseSlotTable::default();
        table.insert(1, SuseSlots { index: 3, additional_slots: 2 });
        table.insert(1, SuseSlots { index: 3, additional_slots: 6 });
        assert_eq!(table.additional_slots(1, 3), Some(6));
    }
}
