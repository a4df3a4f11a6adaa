//! Pack and Carry headless demo
//!
//! Drives the runtime through a short scripted session against an
//! in-memory game and a single helper script:
//! - weapon sync fills the player inventory
//! - the helper script adds a custom item and subscribes to its clicks
//! - a click is delivered on the following tick
//! - a weapon is dragged out and dropped
//! - the quick switch holsters and redraws the knife
//! - a controller drops the focused shotgun
//! - taking off the backpack shrinks the inventory
//!
//! Run with: cargo run -p pac_runtime --bin pac-demo [settings.toml] [data dir]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use pac_inventory::Texture;
use pac_runtime::prelude::*;
use pac_runtime::weapons::{weapon_type, weapon_type_name};
use pac_runtime::{SuseSlots, Vec3};

/// In-memory stand-in for the game
struct DemoGame {
    episode: u32,
    position: Vec3,
    drawable: u32,
    sprinting: bool,
    stamina: f32,
    time_scale: f32,
    slots: Vec<Option<HeldWeapon>>,
    current: i32,
    pickups_disabled: bool,
    seed: u32,
}

impl DemoGame {
    fn new() -> Self {
        Self {
            episode: 0,
            position: [0.0; 3],
            drawable: 1,
            sprinting: false,
            stamina: 100.0,
            time_scale: 1.0,
            slots: vec![
                Some(HeldWeapon { weapon_type: weapon_type::KNIFE, ammo: 1 }),
                Some(HeldWeapon { weapon_type: weapon_type::PISTOL, ammo: 34 }),
                Some(HeldWeapon { weapon_type: weapon_type::SHOTGUN, ammo: 8 }),
                None,
            ],
            current: weapon_type::UNARMED,
            pickups_disabled: false,
            seed: 0x2545_f491,
        }
    }

    fn held(&self, weapon_type: i32) -> Option<&HeldWeapon> {
        self.slots.iter().flatten().find(|w| w.weapon_type == weapon_type)
    }
}

impl GameHost for DemoGame {
    fn is_network_game_running(&self) -> bool {
        false
    }

    fn current_episode(&self) -> u32 {
        self.episode
    }

    fn load_weapon_icons(&mut self, _episode: u32) -> Vec<(i32, Texture)> {
        (1..20).map(|ty| (ty, Texture::new(ty as u64, 64, 64))).collect()
    }

    fn player_position(&self) -> Vec3 {
        self.position
    }

    fn player_head_position(&self) -> Vec3 {
        [self.position[0], self.position[1], self.position[2] + 0.7]
    }

    fn player_clothing_drawable(&self) -> u32 {
        self.drawable
    }

    fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    fn stamina(&self) -> f32 {
        self.stamina
    }

    fn set_stamina(&mut self, stamina: f32) {
        self.stamina = stamina;
    }

    fn set_move_anim_speed(&mut self, speed: f32) {
        log::trace!("Move anim speed {:.2}", speed);
    }

    fn weapon_slot_count(&self) -> usize {
        self.slots.len()
    }

    fn weapon_in_slot(&self, slot: usize) -> Option<HeldWeapon> {
        self.slots.get(slot).copied().flatten()
    }

    fn weapon_display_name(&self, weapon_type: i32) -> String {
        match weapon_type {
            weapon_type::KNIFE => "Knife".to_string(),
            weapon_type::PISTOL => "Pistol".to_string(),
            weapon_type::SHOTGUN => "Pump Shotgun".to_string(),
            other => weapon_type_name(other).unwrap_or("Unknown").to_string(),
        }
    }

    fn has_weapon(&self, weapon_type: i32) -> bool {
        self.held(weapon_type).is_some()
    }

    fn ammo_in_weapon(&self, weapon_type: i32) -> u32 {
        self.held(weapon_type).map_or(0, |w| w.ammo)
    }

    fn current_weapon(&self) -> i32 {
        self.current
    }

    fn select_weapon(&mut self, weapon_type: i32) {
        self.current = weapon_type;
        log::info!("Player switched to {}", self.weapon_display_name(weapon_type));
    }

    fn remove_weapon(&mut self, weapon_type: i32) {
        for slot in &mut self.slots {
            if slot.is_some_and(|w| w.weapon_type == weapon_type) {
                *slot = None;
            }
        }
    }

    fn spawn_weapon_pickup(&mut self, position: Vec3, weapon_type: i32, ammo: u32) {
        log::info!(
            "Spawned {} pickup with {} ammo at ({:.2}, {:.2}, {:.2})",
            self.weapon_display_name(weapon_type),
            ammo,
            position[0],
            position[1],
            position[2]
        );
    }

    fn set_pickups_disabled(&mut self, disabled: bool) {
        if self.pickups_disabled != disabled {
            log::info!("Pickups {}", if disabled { "disabled" } else { "enabled" });
        }
        self.pickups_disabled = disabled;
    }

    fn random_in_range(&mut self, min: f32, max: f32) -> f32 {
        // xorshift32
        self.seed ^= self.seed << 13;
        self.seed ^= self.seed >> 17;
        self.seed ^= self.seed << 5;
        min + (max - min) * (self.seed as f32 / u32::MAX as f32)
    }

    fn time_scale(&self) -> f32 {
        self.time_scale
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }
}

/// The only other script loaded
struct DemoScripts {
    helper: ScriptId,
    received: HashMap<String, usize>,
}

impl ScriptHost for DemoScripts {
    fn send_command(
        &mut self,
        target: ScriptId,
        command: &str,
        args: &[Value],
    ) -> Result<Value, DeliveryError> {
        if target != self.helper {
            return Err(DeliveryError::ScriptNotRunning(target));
        }
        log::info!("Helper script received {} {:?}", command, args);
        *self.received.entry(command.to_string()).or_default() += 1;
        Ok(Value::Null)
    }

    fn is_script_running(&self, script: ScriptId) -> bool {
        script == self.helper
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "PackAndCarry.toml".to_string());
    let data_dir = args.next().unwrap_or_else(|| "PackAndCarry".to_string());

    let settings = match ModSettings::load(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load {}: {}", settings_path, e);
            std::process::exit(1);
        }
    };
    let mut data = GameData::load_dir(&data_dir);
    if data.suse_slots.is_empty() {
        // Drawable 1 is a backpack
        data.suse_slots.insert(0, SuseSlots { index: 1, additional_slots: 4 });
    }

    let mut game = DemoGame::new();
    let mut scripts = DemoScripts {
        helper: ScriptId::new(),
        received: HashMap::new(),
    };
    let helper = scripts.helper;

    let mut pac = PackAndCarry::new(settings, data);
    let events = Arc::new(Mutex::new(Vec::new()));
    {
        let events = events.clone();
        pac.subscribe_events(move |e| events.lock().push(e.name()));
    }

    pac.on_game_load(&mut game);
    let report = pac.tick(&mut game, &mut scripts);
    log::info!(
        "First tick: {} weapon item(s) added, capacity {}",
        report.weapons.added,
        pac.player_inventory().map_or(0, |i| i.capacity())
    );

    // Helper script adds a custom item and asks for its clicks
    let player = match pac.handle_command("GET_PLAYER_INVENTORY_ID", &[], helper).into_value() {
        Some(value) => value,
        None => {
            log::error!("Player inventory command was not handled");
            return;
        }
    };
    let item = pac
        .handle_command(
            "ADD_NEW_ITEM_TO_INVENTORY",
            &[
                player.clone(),
                Value::from(pac_core::joaat("demo_lockpick")),
                Value::from("Lockpick"),
                Value::from(""),
                Value::from("Tools"),
                Value::from("x3"),
                Value::from(""),
            ],
            helper,
        )
        .into_value()
        .unwrap_or(Value::Null);
    pac.handle_command(
        "SUBSCRIBE_TO_ON_ITEM_CLICK_EVENT_FOR_ITEM",
        &[player.clone(), item.clone()],
        helper,
    );
    let free = pac
        .handle_command("GET_AMOUNT_OF_FREE_SLOTS_IN_INVENTORY", &[player], helper)
        .into_value()
        .unwrap_or(Value::Null);
    log::info!("Free slots after adding the lockpick: {:?}", free);

    // Click the lockpick; the helper hears about it one tick later
    pac.open_inventory(false);
    let inventory = pac.player_inventory_id();
    let slot = pac.player_inventory().and_then(|inv| {
        let id = item.to_uuid().map(ItemId::from_uuid)?;
        inv.find_slot(id)
    });
    if let Some(index) = slot {
        if let Err(e) = pac.on_item_clicked(inventory, index, &mut game) {
            log::warn!("Click failed: {}", e);
        }
    }
    log::info!("Pending notifications: {}", pac.router().pending_count());
    pac.tick(&mut game, &mut scripts);

    // Drag the pistol out of the window
    let pistol_slot = pac.player_inventory().and_then(|inv| {
        inv.items()
            .find(|(_, item)| item.weapon_type() == Some(weapon_type::PISTOL))
            .map(|(index, _)| index)
    });
    if let Some(index) = pistol_slot {
        if let Err(e) = pac.on_item_dragged_out(inventory, index, &mut game) {
            log::warn!("Drag out failed: {}", e);
        }
    }
    for _ in 0..10 {
        pac.tick(&mut game, &mut scripts);
    }

    // Holster the knife and draw it again
    game.select_weapon(weapon_type::KNIFE);
    pac.quick_switch_weapon(&mut game);
    pac.quick_switch_weapon(&mut game);

    // Reopen with a controller, drop the shotgun, then back out
    pac.open_inventory(true);
    let shotgun_slot = pac.player_inventory().and_then(|inv| {
        inv.items()
            .find(|(_, item)| item.weapon_type() == Some(weapon_type::SHOTGUN))
            .map(|(index, _)| index)
    });
    if let Some(inv) = pac.pool_mut().get_mut(inventory) {
        inv.set_focused_index(shotgun_slot);
    }
    if let Some(dropped) = pac.drop_focused_item(&mut game) {
        log::info!("Controller dropped item {}", dropped);
    }
    if let Some(inv) = pac.pool_mut().get_mut(inventory) {
        inv.set_focused_index(None);
    }
    pac.cancel_controller_inventory();
    pac.tick(&mut game, &mut scripts);

    // Walk away, close the inventory and take off the backpack
    game.position = [5.0, 0.0, 0.0];
    pac.close_inventory();
    game.drawable = 0;
    for _ in 0..40 {
        pac.tick(&mut game, &mut scripts);
    }
    log::info!(
        "Capacity now {}, time scale back at {:.2}",
        pac.player_inventory().map_or(0, |i| i.capacity()),
        game.time_scale
    );

    pac.shutdown(&mut game);
    log::info!("Observed events: {:?}", events.lock());
    log::info!("Helper script received: {:?}", scripts.received);
}
