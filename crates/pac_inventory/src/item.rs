//! Inventory items

use pac_core::{InventoryError, ItemId, Result, ScriptId, Value};

use crate::tags::{ItemTags, WellKnownTag};
use crate::texture::TextureRef;

/// One inventory slot's content
#[derive(Debug)]
pub struct Item {
    /// Unique identifier, fixed at creation
    id: ItemId,
    /// Item "type" hash (weapon type, custom good, ...)
    content_hash: u32,
    /// Text on the item button
    pub button_text: Option<String>,
    /// Corner annotations
    pub top_left_text: Option<String>,
    pub top_right_text: Option<String>,
    pub bottom_left_text: Option<String>,
    pub bottom_right_text: Option<String>,
    /// Hover tooltip
    pub tooltip: Option<String>,
    /// Borrowed icon texture
    icon: Option<TextureRef>,
    /// Open tag map
    tags: ItemTags,
    /// Context menu entries, in display order
    popup_entries: Vec<String>,
}

impl Item {
    /// Create a new item with a fresh identity
    pub fn new(content_hash: u32) -> Self {
        Self {
            id: ItemId::new(),
            content_hash,
            button_text: None,
            top_left_text: None,
            top_right_text: None,
            bottom_left_text: None,
            bottom_right_text: None,
            tooltip: None,
            icon: None,
            tags: ItemTags::new(),
            popup_entries: Vec::new(),
        }
    }

    /// Set button text
    pub fn with_button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }

    /// Set top-left text
    pub fn with_top_left_text(mut self, text: impl Into<String>) -> Self {
        self.top_left_text = Some(text.into());
        self
    }

    /// Set top-right text
    pub fn with_top_right_text(mut self, text: impl Into<String>) -> Self {
        self.top_right_text = Some(text.into());
        self
    }

    /// Set bottom-left text
    pub fn with_bottom_left_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_left_text = Some(text.into());
        self
    }

    /// Set bottom-right text
    pub fn with_bottom_right_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_right_text = Some(text.into());
        self
    }

    /// Get item identity
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Get content hash
    pub fn content_hash(&self) -> u32 {
        self.content_hash
    }

    // ========== Tags ==========

    /// Add a tag; fails if the key is already present
    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.tags.add(key, value)
    }

    /// Remove a tag; fails if the key is absent
    pub fn remove_tag(&mut self, key: &str) -> Result<Value> {
        self.tags.remove(key)
    }

    /// Check if the item carries a tag
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains(key)
    }

    /// Get a tag value
    pub fn tag(&self, key: &str) -> Option<&Value> {
        self.tags.get(key)
    }

    /// All tags
    pub fn tags(&self) -> &ItemTags {
        &self.tags
    }

    /// Check for a well-known marker tag
    pub fn is(&self, tag: WellKnownTag) -> bool {
        self.tags.contains(tag.key())
    }

    /// Weapon type, if this item mirrors a game weapon
    pub fn weapon_type(&self) -> Option<i32> {
        if !self.is(WellKnownTag::IsGameWeapon) {
            return None;
        }
        self.tags
            .get(WellKnownTag::WeaponType.key())?
            .to_int()
            .and_then(|n| i32::try_from(n).ok())
    }

    /// Item weight, if tagged with one
    pub fn weight(&self) -> Option<f32> {
        self.tags
            .get(WellKnownTag::Weight.key())?
            .to_float()
            .map(|w| w as f32)
    }

    /// Script that added this item, if it is a custom item
    pub fn owner_script(&self) -> Option<ScriptId> {
        self.tags
            .get(WellKnownTag::IsCustomItem.key())?
            .to_uuid()
            .map(ScriptId::from_uuid)
    }

    // ========== Popup menu ==========

    /// Add a popup menu entry; fails on duplicates
    pub fn add_popup_entry(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.has_popup_entry(&name) {
            return Err(InventoryError::DuplicatePopupEntry(name));
        }
        self.popup_entries.push(name);
        Ok(())
    }

    /// Remove a popup menu entry; fails if absent
    pub fn remove_popup_entry(&mut self, name: &str) -> Result<()> {
        let index = self
            .popup_entries
            .iter()
            .position(|e| e == name)
            .ok_or_else(|| InventoryError::MissingPopupEntry(name.to_string()))?;
        self.popup_entries.remove(index);
        Ok(())
    }

    /// Check for a popup menu entry
    pub fn has_popup_entry(&self, name: &str) -> bool {
        self.popup_entries.iter().any(|e| e == name)
    }

    /// Popup menu entries in display order
    pub fn popup_entries(&self) -> &[String] {
        &self.popup_entries
    }

    // ========== Icon ==========

    /// Set the icon, releasing any previous one
    ///
    /// Replacing an existing icon is not an error.
    pub fn set_icon(&mut self, texture: TextureRef) {
        self.icon = Some(texture);
    }

    /// Release the icon; returns whether one was set
    pub fn clear_icon(&mut self) -> bool {
        self.icon.take().is_some()
    }

    /// Get the icon
    pub fn icon(&self) -> Option<&TextureRef> {
        self.icon.as_ref()
    }
}
