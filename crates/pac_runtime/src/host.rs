//! Game-side collaborators
//!
//! The runtime never talks to the game directly. Everything it needs from
//! the world, the player character and the renderer goes through
//! [`GameHost`], so the whole subsystem can run against a mock.

use pac_inventory::Texture;

/// World position
pub type Vec3 = [f32; 3];

/// Distance between two points
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// A weapon held in one of the player's weapon slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldWeapon {
    pub weapon_type: i32,
    pub ammo: u32,
}

/// Host game interface
pub trait GameHost {
    // ========== Session ==========

    /// Check if a network game is running
    fn is_network_game_running(&self) -> bool;

    /// Currently loaded episode
    fn current_episode(&self) -> u32;

    /// Icons for every weapon type of an episode
    fn load_weapon_icons(&mut self, episode: u32) -> Vec<(i32, Texture)>;

    // ========== Player ==========

    fn player_position(&self) -> Vec3;

    fn player_head_position(&self) -> Vec3;

    /// Drawable index of the player's torso clothing component
    fn player_clothing_drawable(&self) -> u32;

    /// Check if the sprint control is held
    fn is_sprinting(&self) -> bool;

    fn stamina(&self) -> f32;

    fn set_stamina(&mut self, stamina: f32);

    /// Set the on-foot move animation speed (1.0 is normal)
    fn set_move_anim_speed(&mut self, speed: f32);

    // ========== Weapons ==========

    /// Number of player weapon slots
    fn weapon_slot_count(&self) -> usize;

    /// Weapon in a slot, if any
    fn weapon_in_slot(&self, slot: usize) -> Option<HeldWeapon>;

    /// Human-readable weapon name (used for labels and weights)
    fn weapon_display_name(&self, weapon_type: i32) -> String;

    fn has_weapon(&self, weapon_type: i32) -> bool;

    fn ammo_in_weapon(&self, weapon_type: i32) -> u32;

    /// Weapon type currently in the player's hands
    fn current_weapon(&self) -> i32;

    /// Make a weapon the current one
    fn select_weapon(&mut self, weapon_type: i32);

    fn remove_weapon(&mut self, weapon_type: i32);

    // ========== World ==========

    /// Create a weapon pickup on the ground near `position`
    fn spawn_weapon_pickup(&mut self, position: Vec3, weapon_type: i32, ammo: u32);

    /// Stop (or allow) the player collecting pickups
    fn set_pickups_disabled(&mut self, disabled: bool);

    /// Uniform random float in `[min, max)`
    fn random_in_range(&mut self, min: f32, max: f32) -> f32;

    fn time_scale(&self) -> f32;

    fn set_time_scale(&mut self, scale: f32);
}
