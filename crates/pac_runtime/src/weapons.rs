//! Mirrors the player's weapons as inventory items
//!
//! Weapon items carry `IS_GAME_WEAPON` and `WeaponType` tags, and their
//! content hash is the hash of the weapon type name, which keeps one item
//! per weapon type.

use pac_core::joaat;
use pac_inventory::{Inventory, Item, TextureCache, WellKnownTag};

use crate::data::ItemWeights;
use crate::host::GameHost;

/// Weapon type ids
pub mod weapon_type {
    pub const UNARMED: i32 = 0;
    pub const BASEBALLBAT: i32 = 1;
    pub const POOLCUE: i32 = 2;
    pub const KNIFE: i32 = 3;
    pub const GRENADE: i32 = 4;
    pub const MOLOTOV: i32 = 5;
    pub const PISTOL: i32 = 7;
    pub const SHOTGUN: i32 = 10;
    pub const MICRO_UZI: i32 = 12;
    pub const AK47: i32 = 14;
    pub const RLAUNCHER: i32 = 18;
    pub const EPISODIC_8: i32 = 28;
    pub const EPISODIC_16: i32 = 36;
    pub const LAST_WEAPONTYPE: i32 = 47;
    pub const ARMOUR: i32 = 48;
    pub const ANYWEAPON: i32 = 57;
}

/// Weapon type names, indexed by id
const WEAPON_TYPE_NAMES: [&str; 58] = [
    "WEAPON_UNARMED",
    "WEAPON_BASEBALLBAT",
    "WEAPON_POOLCUE",
    "WEAPON_KNIFE",
    "WEAPON_GRENADE",
    "WEAPON_MOLOTOV",
    "WEAPON_ROCKET",
    "WEAPON_PISTOL",
    "WEAPON_UNUSED0",
    "WEAPON_DEAGLE",
    "WEAPON_SHOTGUN",
    "WEAPON_BARETTA",
    "WEAPON_MICRO_UZI",
    "WEAPON_MP5",
    "WEAPON_AK47",
    "WEAPON_M4",
    "WEAPON_SNIPERRIFLE",
    "WEAPON_M40A1",
    "WEAPON_RLAUNCHER",
    "WEAPON_FTHROWER",
    "WEAPON_MINIGUN",
    "WEAPON_EPISODIC_1",
    "WEAPON_EPISODIC_2",
    "WEAPON_EPISODIC_3",
    "WEAPON_EPISODIC_4",
    "WEAPON_EPISODIC_5",
    "WEAPON_EPISODIC_6",
    "WEAPON_EPISODIC_7",
    "WEAPON_EPISODIC_8",
    "WEAPON_EPISODIC_9",
    "WEAPON_EPISODIC_10",
    "WEAPON_EPISODIC_11",
    "WEAPON_EPISODIC_12",
    "WEAPON_EPISODIC_13",
    "WEAPON_EPISODIC_14",
    "WEAPON_EPISODIC_15",
    "WEAPON_EPISODIC_16",
    "WEAPON_EPISODIC_17",
    "WEAPON_EPISODIC_18",
    "WEAPON_EPISODIC_19",
    "WEAPON_EPISODIC_20",
    "WEAPON_EPISODIC_21",
    "WEAPON_EPISODIC_22",
    "WEAPON_EPISODIC_23",
    "WEAPON_EPISODIC_24",
    "WEAPON_CAMERA",
    "WEAPON_OBJECT",
    "WEAPON_WEAPONTYPE_LAST_WEAPONTYPE",
    "WEAPON_ARMOUR",
    "WEAPON_RAMMEDBYCAR",
    "WEAPON_RUNOVERBYCAR",
    "WEAPON_EXPLOSION",
    "WEAPON_UZI_DRIVEBY",
    "WEAPON_DROWNING",
    "WEAPON_FALL",
    "WEAPON_UNIDENTIFIED",
    "WEAPON_ANYMELEE",
    "WEAPON_ANYWEAPON",
];

/// Name of a weapon type
pub fn weapon_type_name(weapon_type: i32) -> Option<&'static str> {
    usize::try_from(weapon_type)
        .ok()
        .and_then(|i| WEAPON_TYPE_NAMES.get(i))
        .copied()
}

/// Content hash of a weapon item
pub fn weapon_hash(weapon_type: i32) -> Option<u32> {
    weapon_type_name(weapon_type).map(joaat)
}

/// Weapon types that never get an item: no weapon, damage sources and
/// catch-all pseudo types
pub fn is_ignored(weapon_type: i32) -> bool {
    matches!(
        weapon_type,
        weapon_type::UNARMED | weapon_type::LAST_WEAPONTYPE..=weapon_type::ANYWEAPON
    ) || weapon_type_name(weapon_type).is_none()
}

/// Ammo label shown in the bottom-left corner
pub fn ammo_text(weapon_type: i32, ammo: u32) -> String {
    use self::weapon_type::*;
    match weapon_type {
        BASEBALLBAT | KNIFE | POOLCUE => "1x".to_string(),
        GRENADE | MOLOTOV | EPISODIC_8 | EPISODIC_16 => format!("{}x", ammo),
        RLAUNCHER => format!("{} Rockets", ammo),
        _ => format!("{} Bullets", ammo),
    }
}

/// Build the item for a weapon
pub fn weapon_item(
    weapon_type: i32,
    display_name: &str,
    textures: &TextureCache,
    weights: &ItemWeights,
) -> Option<Item> {
    let mut item = Item::new(weapon_hash(weapon_type)?).with_top_left_text(display_name);
    item.add_tag(WellKnownTag::IsGameWeapon.key(), pac_core::Value::Null).ok()?;
    item.add_tag(WellKnownTag::WeaponType.key(), weapon_type).ok()?;
    item.add_popup_entry(DROP_ENTRY).ok()?;

    if let Some(icon) = textures.get(weapon_type) {
        item.set_icon(icon);
    }
    if let Some(weight) = weights.get(display_name) {
        item.add_tag(WellKnownTag::Weight.key(), weight).ok()?;
        item.bottom_right_text = Some(format!("{}lb", weight));
    }
    Some(item)
}

/// Popup entry that drops a weapon
pub const DROP_ENTRY: &str = "Drop";

/// What one sync pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub removed: usize,
    pub added: usize,
}

/// Bring the weapon items of `inventory` in line with what the player holds
pub fn sync_weapons(
    inventory: &mut Inventory,
    game: &dyn GameHost,
    textures: &TextureCache,
    weights: &ItemWeights,
) -> SyncReport {
    let mut report = SyncReport::default();

    // Weapons the player lost or emptied
    let removed = inventory.remove_where(|item| match item.weapon_type() {
        Some(ty) => !game.has_weapon(ty) || game.ammo_in_weapon(ty) == 0,
        None => false,
    });
    report.removed = removed.len();

    for item in inventory.items_mut() {
        if let Some(ty) = item.weapon_type() {
            item.bottom_left_text = Some(ammo_text(ty, game.ammo_in_weapon(ty)));
        }
    }

    // Weapons without an item yet
    for slot in 0..game.weapon_slot_count() {
        let Some(held) = game.weapon_in_slot(slot) else {
            continue;
        };
        if held.ammo == 0 || is_ignored(held.weapon_type) {
            continue;
        }
        let Some(hash) = weapon_hash(held.weapon_type) else {
            continue;
        };
        if inventory.contains_content(hash) {
            continue;
        }

        let name = game.weapon_display_name(held.weapon_type);
        let Some(mut item) = weapon_item(held.weapon_type, &name, textures, weights) else {
            continue;
        };
        item.bottom_left_text = Some(ammo_text(held.weapon_type, held.ammo));
        match inventory.add_item(item) {
            Ok(_) => report.added += 1,
            Err(e) => log::debug!("No room for weapon '{}': {}", name, e),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pac_inventory::Texture;

    #[test]
    fn test_names_and_hashes() {
        assert_eq!(weapon_type_name(weapon_type::PISTOL), Some("WEAPON_PISTOL"));
        assert_eq!(weapon_type_name(weapon_type::EPISODIC_8), Some("WEAPON_EPISODIC_8"));
        assert_eq!(weapon_type_name(weapon_type::ARMOUR), Some("WEAPON_ARMOUR"));
        assert_eq!(weapon_type_name(-1), None);
        assert_eq!(weapon_type_name(58), None);
        assert_eq!(weapon_hash(weapon_type::PISTOL), Some(joaat("weapon_pistol")));
    }

    #[test]
    fn test_ignored_types() {
        assert!(is_ignored(weapon_type::UNARMED));
        assert!(is_ignored(weapon_type::ARMOUR));
        assert!(is_ignored(weapon_type::ANYWEAPON));
        assert!(is_ignored(99));
        assert!(!is_ignored(weapon_type::PISTOL));
        assert!(!is_ignored(weapon_type::KNIFE));
    }

    #[test]
    fn test_ammo_text() {
        assert_eq!(ammo_text(weapon_type::KNIFE, 1), "1x");
        assert_eq!(ammo_text(weapon_type::GRENADE, 4), "4x");
        assert_eq!(ammo_text(weapon_type::EPISODIC_16, 2), "2x");
        assert_eq!(ammo_text(weapon_type::RLAUNCHER, 3), "3 Rockets");
        assert_eq!(ammo_text(weapon_type::PISTOL, 17), "17 Bullets");
    }

    #[test]
    fn test_weapon_item() {
        let textures = TextureCache::new();
        textures.load_episode(0, vec![(weapon_type::PISTOL, Texture::new(7, 64, 64))]);
        let mut weights = ItemWeights::default();
        weights.insert("Pistol", 2.5);

        let item = weapon_item(weapon_type::PISTOL, "Pistol", &textures, &weights).unwrap();
        assert_eq!(item.weapon_type(), Some(weapon_type::PISTOL));
        assert_eq!(item.weight(), Some(2.5));
        assert_eq!(item.bottom_right_text.as_deref(), Some("2.5lb"));
        assert_eq!(item.top_left_text.as_deref(), Some("Pistol"));
        assert!(item.has_popup_entry(DROP_ENTRY));
        assert!(item.icon().is_some());

        let plain = weapon_item(weapon_type::SHOTGUN, "Shotgun", &textures, &weights).unwrap();
        assert_eq!(plain.weight(), None);
        assert!(plain.icon().is_none());
    }
}
