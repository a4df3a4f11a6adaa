//! Mod settings
//!
//! Loaded from a TOML file. Every key has a default, so a missing section
//! (or a missing file) still yields a usable configuration.
//!
//! # Example
//!
//! ```toml
//! [general]
//! disable_in_mp = false
//! event_command_prefix = "PAC_"
//!
//! [inventory]
//! default_capacity = 10
//! allow_extra_slots = true
//!
//! [time]
//! slow_down_time_when_inventory_is_open = true
//! slow_down_time_amount = 0.25
//!
//! [movement]
//! player_movement_speed_decreased_by_inventory_weight = true
//! decrease_multiplier = 1.0
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Do nothing at all during network games
    pub disable_in_mp: bool,
    /// Prepended to outbound event command names
    pub event_command_prefix: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            disable_in_mp: false,
            event_command_prefix: String::new(),
        }
    }
}

/// Player inventory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    pub default_capacity: usize,
    /// Let clothing grant extra slots
    pub allow_extra_slots: bool,
    pub item_width: f32,
    pub item_height: f32,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            default_capacity: 10,
            allow_extra_slots: true,
            item_width: 128.0,
            item_height: 100.0,
        }
    }
}

/// Time scale settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    pub slow_down_time_when_inventory_is_open: bool,
    /// Subtracted from the time scale while the inventory is open
    pub slow_down_time_amount: f32,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            slow_down_time_when_inventory_is_open: true,
            slow_down_time_amount: 0.25,
        }
    }
}

/// Stamina drain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustionSettings {
    pub disable_in_mp: bool,
    pub player_is_exhausted_more_quickly_based_on_inventory_weight: bool,
}

impl Default for ExhaustionSettings {
    fn default() -> Self {
        Self {
            disable_in_mp: true,
            player_is_exhausted_more_quickly_based_on_inventory_weight: false,
        }
    }
}

/// Movement speed settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub disable_in_mp: bool,
    pub player_movement_speed_decreased_by_inventory_weight: bool,
    pub decrease_multiplier: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            disable_in_mp: true,
            player_movement_speed_decreased_by_inventory_weight: false,
            decrease_multiplier: 1.0,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModSettings {
    pub general: GeneralSettings,
    pub inventory: InventorySettings,
    pub time: TimeSettings,
    pub exhaustion: ExhaustionSettings,
    pub movement: MovementSettings,
}

impl ModSettings {
    /// Load from a file; a missing file gives the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.inventory.default_capacity == 0 {
            return Err(SettingsError::Invalid {
                key: "inventory.default_capacity",
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..1.0).contains(&self.time.slow_down_time_amount) {
            return Err(SettingsError::Invalid {
                key: "time.slow_down_time_amount",
                reason: format!("{} is outside [0, 1)", self.time.slow_down_time_amount),
            });
        }
        if self.movement.decrease_multiplier < 0.0 {
            return Err(SettingsError::Invalid {
                key: "movement.decrease_multiplier",
                reason: "must not be negative".into(),
            });
        }
        Ok(())
    }

    /// Check if any weight-based player impact is on
    pub fn weight_impacts_enabled(&self) -> bool {
        self.exhaustion
            .player_is_exhausted_more_quickly_based_on_inventory_weight
            || self
                .movement
                .player_movement_speed_decreased_by_inventory_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ModSettings::default();
        assert_eq!(settings.inventory.default_capacity, 10);
        assert!(settings.inventory.allow_extra_slots);
        assert_eq!(settings.time.slow_down_time_amount, 0.25);
        assert!(settings.exhaustion.disable_in_mp);
        assert_eq!(settings.general.event_command_prefix, "");
        assert!(!settings.weight_impacts_enabled());
    }

    #[test]
    fn test_partial_file() {
        let settings = ModSettings::from_toml_str(
            r#"
            [inventory]
            default_capacity = 6

            [movement]
            player_movement_speed_decreased_by_inventory_weight = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.inventory.default_capacity, 6);
        assert_eq!(settings.inventory.item_width, 128.0);
        assert!(settings.weight_impacts_enabled());
        assert_eq!(settings.time, TimeSettings::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ModSettings::from_toml_str("[inventory]\ndefault_capacity = 0"),
            Err(SettingsError::Invalid { .. })
        ));
        assert!(matches!(
            ModSettings::from_toml_str("[time]\nslow_down_time_amount = 1.5"),
            Err(SettingsError::Invalid { .. })
        ));
        assert!(matches!(
            ModSettings::from_toml_str("[inventory\n"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_retired_keys_are_ignored() {
        let settings = ModSettings::from_toml_str(
            r#"
            [general]
            use_custom_gxts = true
            event_command_prefix = "PAC_"
            "#,
        )
        .unwrap();

        assert_eq!(settings.general.event_command_prefix, "PAC_");
        assert!(!settings.general.disable_in_mp);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nevent_command_prefix = \"PAC_\"").unwrap();

        let settings = ModSettings::load(file.path()).unwrap();
        assert_eq!(settings.general.event_command_prefix, "PAC_");

        let dir = tempfile::tempdir().unwrap();
        let missing = ModSettings::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(missing, ModSettings::default());
    }
}
