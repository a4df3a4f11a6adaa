//! Side effects the inventory has on the player and the world
//!
//! - Time slows down while the inventory is open
//! - A heavy inventory slows sprinting and drains stamina
//! - Dropped weapons are not picked straight back up

use pac_inventory::Inventory;

use crate::host::{distance, GameHost, Vec3};
use crate::settings::ModSettings;

/// Time scale factor step per tick while open
const TIME_SCALE_STEP_OPEN: f32 = 0.02;
/// Time scale factor step per tick while closed
const TIME_SCALE_STEP_CLOSED: f32 = 0.03;
/// Move speed factor step per tick
const MOVE_SPEED_STEP: f32 = 0.01;
/// Weight at which sprinting stops entirely (before the multiplier)
const MAX_WEIGHT: f32 = 1000.0;
/// Distance the player must walk away from a drop before pickups work again
pub const PICKUP_BLOCK_RADIUS: f32 = 2.5;

/// Linear interpolation, `t` clamped to [0, 1]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Sum of every item weight
pub fn total_weight(inventory: &Inventory) -> f32 {
    inventory.items().filter_map(|(_, item)| item.weight()).sum()
}

/// Move animation speed a sprinting player ends up at
pub fn move_speed_target(weight: f32, multiplier: f32) -> f32 {
    ((1.0 - (weight / MAX_WEIGHT).min(1.0)) * multiplier).max(0.0)
}

/// Lowest stamina weight drain may push the player to
pub fn min_stamina(move_speed: f32) -> f32 {
    -((15.0 / move_speed) * 10.0)
}

/// Eases the game time scale down while the inventory is open
#[derive(Debug, Clone, Default)]
pub struct TimeScaleInterpolator {
    factor: f32,
    target: f32,
}

impl TimeScaleInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interpolation factor
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Advance one tick
    pub fn update(&mut self, settings: &ModSettings, open: bool, game: &mut dyn GameHost) {
        if !settings.time.slow_down_time_when_inventory_is_open || game.is_network_game_running() {
            return;
        }

        if open {
            self.factor += TIME_SCALE_STEP_OPEN;
            if self.factor > 1.0 {
                self.factor = 1.0;
                return;
            }
            let target = game.time_scale() - settings.time.slow_down_time_amount;
            if target > 0.0 {
                self.target = target;
                game.set_time_scale(lerp(1.0, target, self.factor));
            }
        } else {
            self.factor -= TIME_SCALE_STEP_CLOSED;
            if self.factor < 0.0 {
                self.factor = 0.0;
                return;
            }
            game.set_time_scale(lerp(1.0, self.target, self.factor));
        }
    }
}

/// Weight-based sprint slowdown and stamina drain
#[derive(Debug, Clone, Default)]
pub struct MovementImpact {
    factor: f32,
    target: f32,
}

impl MovementImpact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interpolation factor
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Advance one tick
    pub fn update(&mut self, settings: &ModSettings, weight: f32, game: &mut dyn GameHost) {
        if !settings.weight_impacts_enabled() {
            return;
        }

        if !game.is_sprinting() {
            self.factor -= MOVE_SPEED_STEP;
            if self.factor < 0.0 {
                self.factor = 0.0;
            } else {
                game.set_move_anim_speed(lerp(1.0, self.target, self.factor));
            }
            return;
        }

        if weight <= 0.0 {
            return;
        }
        let target = move_speed_target(weight, settings.movement.decrease_multiplier);
        self.target = target;
        let network = game.is_network_game_running();

        let exhaustion = &settings.exhaustion;
        if exhaustion.player_is_exhausted_more_quickly_based_on_inventory_weight
            && !(exhaustion.disable_in_mp && network)
        {
            let stamina = game.stamina();
            if stamina >= min_stamina(target) {
                game.set_stamina(stamina - weight / 100.0);
            }
        }

        let movement = &settings.movement;
        if movement.player_movement_speed_decreased_by_inventory_weight
            && !(movement.disable_in_mp && network)
        {
            self.factor += MOVE_SPEED_STEP;
            if self.factor > 1.0 {
                self.factor = 1.0;
            } else {
                game.set_move_anim_speed(lerp(1.0, target, self.factor));
            }
        }
    }
}

/// Keeps the player from collecting a weapon they just dropped
#[derive(Debug, Clone, Default)]
pub struct PickupBlock {
    drop_position: Option<Vec3>,
}

impl PickupBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start blocking around a drop point
    pub fn block_at(&mut self, position: Vec3, game: &mut dyn GameHost) {
        game.set_pickups_disabled(true);
        self.drop_position = Some(position);
    }

    /// Check if pickups are currently blocked
    pub fn is_active(&self) -> bool {
        self.drop_position.is_some()
    }

    /// Advance one tick; lifts the block once the player walked away
    pub fn update(&mut self, game: &mut dyn GameHost) {
        let Some(drop) = self.drop_position else {
            return;
        };
        if distance(game.player_position(), drop) > PICKUP_BLOCK_RADIUS {
            game.set_pickups_disabled(false);
            self.drop_position = None;
        } else {
            game.set_pickups_disabled(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(1.0, 0.5, 0.0), 1.0);
        assert_eq!(lerp(1.0, 0.5, 1.0), 0.5);
        assert_eq!(lerp(1.0, 0.5, 2.0), 0.5);
        assert_eq!(lerp(1.0, 0.5, -1.0), 1.0);
    }

    #[test]
    fn test_move_speed_target() {
        assert_eq!(move_speed_target(0.0, 1.0), 1.0);
        assert_eq!(move_speed_target(500.0, 1.0), 0.5);
        assert_eq!(move_speed_target(2000.0, 1.0), 0.0);
        assert_eq!(move_speed_target(500.0, 0.5), 0.25);
    }

    #[test]
    fn test_min_stamina() {
        assert_eq!(min_stamina(0.5), -300.0);
        assert_eq!(min_stamina(0.0), f32::NEG_INFINITY);
    }
}
