//! Runtime - the inventory subsystem as one owned service
//!
//! [`PackAndCarry`] owns the pool, the player inventory, the command
//! dispatcher, the event router and the texture cache. The host drives it
//! with [`PackAndCarry::tick`] once per frame, forwards UI callbacks to the
//! `on_*` methods and routes script commands through
//! [`PackAndCarry::handle_command`].

use std::f32::consts::TAU;

use pac_command::{CommandContext, CommandDispatcher, Response};
use pac_core::{InventoryId, ItemId, Result, ScriptId, Value};
use pac_event::{
    DrainReport, EventRouter, InventoryEventBus, ItemNotification, ScriptHost, SubscriberId,
};
use pac_inventory::{Inventory, InventoryEvent, InventoryPool, Item, TextureCache, WellKnownTag};

use crate::data::GameData;
use crate::host::GameHost;
use crate::impacts::{total_weight, MovementImpact, PickupBlock, TimeScaleInterpolator};
use crate::settings::ModSettings;
use crate::weapons::{self, weapon_type, SyncReport, DROP_ENTRY};

/// Name of the player inventory
pub const PLAYER_INVENTORY_NAME: &str = "PlayerInventory";

/// Spread range per left-behind weapon when dropping after a resize
const LEFT_BEHIND_SPREAD: (f32, f32) = (0.10, 0.15);

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Nothing ran (multiplayer with `disable_in_mp`)
    pub disabled: bool,
    /// Queued notifications handled at the start of the tick
    pub drain: DrainReport,
    /// Custom items removed because their owner stopped running
    pub swept: usize,
    /// Weapon item changes
    pub weapons: SyncReport,
}

/// The inventory subsystem
pub struct PackAndCarry {
    settings: ModSettings,
    data: GameData,
    pool: InventoryPool,
    player_inventory: InventoryId,
    dispatcher: CommandDispatcher,
    router: EventRouter,
    observers: InventoryEventBus,
    textures: TextureCache,
    /// Inventory was opened with a controller (closes on item click)
    opened_via_controller: bool,
    /// Weapon last selected through the inventory
    last_weapon: Option<i32>,
    time_scale: TimeScaleInterpolator,
    movement: MovementImpact,
    pickups: PickupBlock,
}

impl PackAndCarry {
    /// Create the subsystem with an empty player inventory
    pub fn new(settings: ModSettings, data: GameData) -> Self {
        log::info!("Creating Pack and Carry inventory runtime...");

        let router =
            EventRouter::new().with_command_prefix(settings.general.event_command_prefix.clone());
        let mut pool = InventoryPool::new();
        let player_inventory = pool.add(player_inventory(&settings));

        Self {
            settings,
            data,
            pool,
            player_inventory,
            dispatcher: CommandDispatcher::new(),
            router,
            observers: InventoryEventBus::new(),
            textures: TextureCache::new(),
            opened_via_controller: false,
            last_weapon: None,
            time_scale: TimeScaleInterpolator::new(),
            movement: MovementImpact::new(),
            pickups: PickupBlock::new(),
        }
    }

    // ========== Lifecycle ==========

    /// Check if the subsystem sits this session out
    pub fn is_disabled(&self, game: &dyn GameHost) -> bool {
        self.settings.general.disable_in_mp && game.is_network_game_running()
    }

    /// A save was loaded: start over with an empty player inventory
    pub fn on_game_load(&mut self, game: &mut dyn GameHost) {
        self.router.clear();
        self.opened_via_controller = false;
        self.last_weapon = None;

        match self.pool.get_mut(self.player_inventory) {
            Some(inventory) => {
                let removed = inventory.clear();
                inventory.set_visible(false);
                log::debug!("Cleared {} item(s) from the player inventory", removed);
            }
            None => {
                self.player_inventory = self.pool.add(player_inventory(&self.settings));
                log::debug!("Recreated player inventory {}", self.player_inventory);
            }
        }

        self.load_textures(game);
    }

    /// Load weapon icons for the current episode
    ///
    /// Does nothing if the cache already holds this episode. After a
    /// reload, weapon items pick up the new icons.
    pub fn load_textures(&mut self, game: &mut dyn GameHost) {
        let episode = game.current_episode();
        if self.textures.episode() == Some(episode) && !self.textures.is_empty() {
            return;
        }

        let icons = game.load_weapon_icons(episode);
        if !self.textures.load_episode(episode, icons) {
            return;
        }
        log::info!("Loaded {} weapon icon(s) for episode {}", self.textures.len(), episode);

        for id in self.pool.ids() {
            let Some(inventory) = self.pool.get_mut(id) else {
                continue;
            };
            for item in inventory.items_mut() {
                let Some(ty) = item.weapon_type() else {
                    continue;
                };
                match self.textures.get(ty) {
                    Some(icon) => item.set_icon(icon),
                    None => {
                        item.clear_icon();
                    }
                }
            }
        }
    }

    /// Run one frame
    pub fn tick(&mut self, game: &mut dyn GameHost, scripts: &mut dyn ScriptHost) -> TickReport {
        if self.is_disabled(game) {
            return TickReport {
                disabled: true,
                ..Default::default()
            };
        }

        let mut report = TickReport {
            drain: self.router.drain(scripts),
            ..Default::default()
        };

        if self.textures.is_empty() {
            self.load_textures(game);
        }

        if let Some(inventory) = self.pool.get_mut(self.player_inventory) {
            if inventory.is_visible() {
                inventory.position_at_world_coordinate(game.player_head_position());
            }
        }

        self.resize_for_clothing(game);
        report.swept = self.sweep_orphaned_items(&*scripts);

        let open = self.is_open();
        self.time_scale.update(&self.settings, open, game);
        self.pickups.update(game);

        let weight = self.player_inventory().map(total_weight).unwrap_or(0.0);
        self.movement.update(&self.settings, weight, game);

        if let Some(inventory) = self.pool.get_mut(self.player_inventory) {
            report.weapons =
                weapons::sync_weapons(inventory, &*game, &self.textures, &self.data.item_weights);
        }

        report
    }

    /// Tear down: restore the game state the impacts touched and release
    /// every inventory and texture
    pub fn shutdown(&mut self, game: &mut dyn GameHost) {
        game.set_time_scale(1.0);
        if self.movement.factor() > 0.0 {
            game.set_move_anim_speed(1.0);
        }
        if self.pickups.is_active() {
            game.set_pickups_disabled(false);
        }

        let pending = self.router.pending_count();
        if pending > 0 {
            log::debug!("Discarding {} undelivered notification(s)", pending);
        }
        self.router.clear();
        self.pool.clear();
        self.textures.release_all();
        log::info!("Pack and Carry shut down");
    }

    // ========== Commands ==========

    /// Serve a command sent by another script
    pub fn handle_command(&mut self, name: &str, args: &[Value], sender: ScriptId) -> Response {
        let player = self.player_inventory;
        let has_player = self.pool.contains(player);

        let mut ctx = CommandContext::new(&mut self.pool, sender);
        if has_player {
            ctx = ctx.with_player_inventory(player);
        }
        self.dispatcher.dispatch(name, args, &mut ctx)
    }

    // ========== UI callbacks ==========

    /// An item button was clicked
    pub fn on_item_clicked(
        &mut self,
        inventory: InventoryId,
        index: usize,
        game: &mut dyn GameHost,
    ) -> Result<ItemId> {
        let item = self.pool.resolve_mut(inventory)?.click(index)?;
        self.emit(
            InventoryEvent::ItemClicked {
                inventory,
                item,
                index,
            },
            game,
        );
        Ok(item)
    }

    /// An item was dragged out of the window
    pub fn on_item_dragged_out(
        &mut self,
        inventory: InventoryId,
        index: usize,
        game: &mut dyn GameHost,
    ) -> Result<ItemId> {
        let item = self.pool.resolve_mut(inventory)?.drag_out(index)?;
        let id = item.id();
        self.emit(
            InventoryEvent::ItemDraggedOut {
                inventory,
                item,
                index,
            },
            game,
        );
        Ok(id)
    }

    /// An item was dragged onto another slot
    pub fn on_item_dragged_to_new_slot(
        &mut self,
        inventory: InventoryId,
        old_index: usize,
        new_index: usize,
        game: &mut dyn GameHost,
    ) -> Result<ItemId> {
        let item = self
            .pool
            .resolve_mut(inventory)?
            .move_item(old_index, new_index)?;
        self.emit(
            InventoryEvent::ItemDraggedToNewSlot {
                inventory,
                item,
                old_index,
                new_index,
            },
            game,
        );
        Ok(item)
    }

    /// A popup menu entry of an item was clicked
    pub fn on_popup_item_clicked(
        &mut self,
        inventory: InventoryId,
        item: ItemId,
        entry: &str,
        game: &mut dyn GameHost,
    ) -> Result<()> {
        self.pool.resolve_mut(inventory)?.popup_click(item, entry)?;
        self.emit(
            InventoryEvent::PopupItemClicked {
                inventory,
                item,
                entry: entry.to_string(),
            },
            game,
        );
        Ok(())
    }

    // ========== Inventory control ==========

    /// Change an inventory's capacity
    ///
    /// Fires a resize event (with the exact left-behind list) only if the
    /// capacity actually changed. Returns how many items were left behind.
    pub fn resize_inventory(
        &mut self,
        inventory: InventoryId,
        capacity: usize,
        game: &mut dyn GameHost,
    ) -> Result<usize> {
        let target = self.pool.resolve_mut(inventory)?;
        let old_capacity = target.capacity();
        if old_capacity == capacity {
            return Ok(0);
        }

        let left_behind = target.resize(capacity);
        let count = left_behind.len();
        self.emit(
            InventoryEvent::Resized {
                inventory,
                old_capacity,
                new_capacity: capacity,
                left_behind,
            },
            game,
        );
        Ok(count)
    }

    /// Show the player inventory
    pub fn open_inventory(&mut self, via_controller: bool) {
        if let Some(inventory) = self.pool.get_mut(self.player_inventory) {
            inventory.set_visible(true);
            self.opened_via_controller = via_controller;
        }
    }

    /// Hide the player inventory
    pub fn close_inventory(&mut self) {
        if let Some(inventory) = self.pool.get_mut(self.player_inventory) {
            inventory.set_visible(false);
        }
        self.opened_via_controller = false;
    }

    /// Check if the player inventory is shown
    pub fn is_open(&self) -> bool {
        self.player_inventory().is_some_and(Inventory::is_visible)
    }

    /// Controller action: drop the focused weapon item
    ///
    /// Only while the inventory is open after a controller opened it.
    /// Returns the dropped item.
    pub fn drop_focused_item(&mut self, game: &mut dyn GameHost) -> Option<ItemId> {
        if !self.opened_via_controller || !self.is_open() {
            return None;
        }
        let item = self
            .player_inventory()?
            .focused_item()
            .filter(|item| item.is(WellKnownTag::IsGameWeapon))?
            .id();

        match self.drop_item(self.player_inventory, item, game) {
            Ok(()) => Some(item),
            Err(e) => {
                log::warn!("Could not drop focused item {}: {}", item, e);
                None
            }
        }
    }

    /// Controller action: close the inventory when nothing is focused
    ///
    /// Returns whether the inventory was closed.
    pub fn cancel_controller_inventory(&mut self) -> bool {
        if !self.opened_via_controller || !self.is_open() {
            return false;
        }
        if self
            .player_inventory()
            .is_some_and(|inventory| inventory.focused_index().is_some())
        {
            return false;
        }
        self.close_inventory();
        true
    }

    /// Toggle between fists and the remembered weapon
    ///
    /// Holding a weapon: remember it and switch to unarmed. Unarmed: switch
    /// back to the remembered weapon if the player still has it. Returns
    /// the weapon selected, if any.
    pub fn quick_switch_weapon(&mut self, game: &mut dyn GameHost) -> Option<i32> {
        let current = game.current_weapon();
        if current != weapon_type::UNARMED {
            self.last_weapon = Some(current);
            game.select_weapon(weapon_type::UNARMED);
            return Some(weapon_type::UNARMED);
        }

        let last = self.last_weapon.filter(|&ty| game.has_weapon(ty))?;
        game.select_weapon(last);
        Some(last)
    }

    /// Remove an item; a game weapon is dropped into the world
    pub fn drop_item(
        &mut self,
        inventory: InventoryId,
        item: ItemId,
        game: &mut dyn GameHost,
    ) -> Result<()> {
        let removed = self.pool.resolve_mut(inventory)?.remove_item(item)?;
        if let Some(ty) = removed.weapon_type() {
            self.drop_weapon(ty, 0.0, game);
        }
        Ok(())
    }

    // ========== Observers ==========

    /// Watch every inventory event the runtime handles
    pub fn subscribe_events<F>(&mut self, observer: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Stop watching
    pub fn unsubscribe_events(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========== Accessors ==========

    pub fn settings(&self) -> &ModSettings {
        &self.settings
    }

    pub fn pool(&self) -> &InventoryPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut InventoryPool {
        &mut self.pool
    }

    /// Player inventory id (stale after shutdown)
    pub fn player_inventory_id(&self) -> InventoryId {
        self.player_inventory
    }

    pub fn player_inventory(&self) -> Option<&Inventory> {
        self.pool.get(self.player_inventory)
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Weapon last selected through the inventory
    pub fn last_weapon(&self) -> Option<i32> {
        self.last_weapon
    }

    /// Check if pickups are blocked after a drop
    pub fn pickups_blocked(&self) -> bool {
        self.pickups.is_active()
    }

    // ========== Internals ==========

    /// Publish to observers, then apply the runtime's own handling
    fn emit(&mut self, event: InventoryEvent, game: &mut dyn GameHost) {
        self.observers.publish(&event);

        match event {
            InventoryEvent::ItemClicked {
                inventory,
                item,
                index,
            } => {
                let Some(entry) = self.pool.get(inventory).and_then(|inv| inv.get_item(item))
                else {
                    return;
                };
                if let Some(ty) = entry.weapon_type() {
                    self.last_weapon = Some(ty);
                    game.select_weapon(ty);
                }
                self.router.notify(
                    entry,
                    ItemNotification::Clicked {
                        inventory,
                        item,
                        index,
                    },
                );
                if inventory == self.player_inventory && self.opened_via_controller {
                    self.close_inventory();
                }
            }
            InventoryEvent::ItemDraggedOut {
                inventory,
                item,
                index,
            } => {
                self.router.notify(
                    &item,
                    ItemNotification::DraggedOut {
                        inventory,
                        item: item.id(),
                        index,
                    },
                );
                if let Some(ty) = item.weapon_type() {
                    self.drop_weapon(ty, 0.0, game);
                }
            }
            InventoryEvent::ItemDraggedToNewSlot {
                inventory,
                item,
                old_index,
                new_index,
            } => {
                if let Some(entry) = self.pool.get(inventory).and_then(|inv| inv.get_item(item)) {
                    self.router.notify(
                        entry,
                        ItemNotification::DraggedToNewSlot {
                            inventory,
                            item,
                            old_index,
                            new_index,
                        },
                    );
                }
            }
            InventoryEvent::PopupItemClicked {
                inventory,
                item,
                entry,
            } => {
                let Some(target) = self.pool.get(inventory).and_then(|inv| inv.get_item(item))
                else {
                    return;
                };
                let drop_weapon = entry == DROP_ENTRY && target.is(WellKnownTag::IsGameWeapon);
                self.router.notify(
                    target,
                    ItemNotification::PopupItemClicked {
                        inventory,
                        item,
                        entry,
                    },
                );
                if drop_weapon {
                    if let Err(e) = self.drop_item(inventory, item, game) {
                        log::warn!("Could not drop item {}: {}", item, e);
                    }
                }
            }
            InventoryEvent::Resized {
                inventory,
                left_behind,
                ..
            } => self.handle_left_behind(inventory, left_behind, game),
        }
    }

    /// Left-behind weapons go on the ground around the player, anything
    /// else is discarded
    fn handle_left_behind(
        &mut self,
        inventory: InventoryId,
        left_behind: Vec<Item>,
        game: &mut dyn GameHost,
    ) {
        for (i, item) in left_behind.into_iter().enumerate() {
            match item.weapon_type() {
                Some(ty) => {
                    let spread = game.random_in_range(LEFT_BEHIND_SPREAD.0, LEFT_BEHIND_SPREAD.1);
                    self.drop_weapon(ty, i as f32 * spread, game);
                }
                None => log::debug!(
                    "Discarding item {} left behind by inventory {}",
                    item.id(),
                    inventory
                ),
            }
        }
    }

    /// Take a weapon from the player and put it on the ground
    ///
    /// A non-zero `range` places the pickup at a random point that far
    /// from the player.
    fn drop_weapon(&mut self, weapon_type: i32, range: f32, game: &mut dyn GameHost) {
        let ammo = game.ammo_in_weapon(weapon_type);
        game.remove_weapon(weapon_type);

        let mut position = game.player_position();
        if range != 0.0 {
            let angle = game.random_in_range(0.0, TAU);
            position[0] += angle.cos() * range;
            position[1] += angle.sin() * range;
        }

        self.pickups.block_at(position, game);
        game.spawn_weapon_pickup(position, weapon_type, ammo);
        log::debug!("Dropped weapon {} with {} ammo", weapon_type, ammo);
    }

    /// Match the player inventory capacity to the worn clothing
    fn resize_for_clothing(&mut self, game: &mut dyn GameHost) {
        if !self.settings.inventory.allow_extra_slots || self.is_open() {
            return;
        }
        let Some(current) = self.player_inventory().map(Inventory::capacity) else {
            return;
        };

        let default = self.settings.inventory.default_capacity;
        let drawable = game.player_clothing_drawable();
        let capacity = if drawable == 0 {
            default
        } else {
            let episode = game.current_episode();
            let Some(extra) = self.data.suse_slots.additional_slots(episode, drawable) else {
                return;
            };
            (default as i64 + i64::from(extra)).max(1) as usize
        };

        if capacity != current {
            log::debug!("Clothing drawable {} sets capacity to {}", drawable, capacity);
            if let Err(e) = self.resize_inventory(self.player_inventory, capacity, game) {
                log::warn!("Could not resize player inventory: {}", e);
            }
        }
    }

    /// Remove custom items whose owner script is gone
    fn sweep_orphaned_items(&mut self, scripts: &dyn ScriptHost) -> usize {
        let mut swept = 0;
        for id in self.pool.ids() {
            let Some(inventory) = self.pool.get_mut(id) else {
                continue;
            };
            let removed = inventory.remove_where(|item| {
                !item.is(WellKnownTag::KeepOnOwnerUnload)
                    && item
                        .owner_script()
                        .is_some_and(|owner| !scripts.is_script_running(owner))
            });
            for item in &removed {
                log::debug!(
                    "Removed item {} of stopped script {:?} from inventory '{}'",
                    item.id(),
                    item.owner_script(),
                    inventory.name()
                );
            }
            swept += removed.len();
        }
        swept
    }
}

fn player_inventory(settings: &ModSettings) -> Inventory {
    Inventory::new(PLAYER_INVENTORY_NAME, settings.inventory.default_capacity)
        .with_item_size(settings.inventory.item_width, settings.inventory.item_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_player_inventory() {
        let runtime = PackAndCarry::new(ModSettings::default(), GameData::default());
        let inventory = runtime.player_inventory().unwrap();
        assert_eq!(inventory.name(), PLAYER_INVENTORY_NAME);
        assert_eq!(inventory.capacity(), 10);
        assert_eq!(inventory.item_size(), (128.0, 100.0));
        assert!(!runtime.is_open());
    }

    #[test]
    fn test_open_and_close() {
        let mut runtime = PackAndCarry::new(ModSettings::default(), GameData::default());
        runtime.open_inventory(true);
        assert!(runtime.is_open());
        runtime.close_inventory();
        assert!(!runtime.is_open());
    }

    #[test]
    fn test_player_inventory_id_command() {
        let mut runtime = PackAndCarry::new(ModSettings::default(), GameData::default());
        let response = runtime.handle_command("GET_PLAYER_INVENTORY_ID", &[], ScriptId::new());
        assert_eq!(response, Response::Handled(Value::from(runtime.player_inventory_id())));
    }
}
