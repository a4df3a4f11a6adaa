//! Command handlers, registered in one place

use pac_core::{InventoryError, Result, Value};
use pac_event::ItemEventKind;
use pac_inventory::{Item, Texture, TextureRef, WellKnownTag};

use crate::args::Args;
use crate::command::Command;
use crate::dispatcher::{CommandContext, CommandDispatcher};

/// Register every command in the catalog
pub(crate) fn register_all(dispatcher: &mut CommandDispatcher) {
    // Inventory
    dispatcher.register(Command::GetPlayerInventoryId, get_player_inventory_id);
    dispatcher.register(Command::GetAmountOfFreeSlotsInInventory, get_free_slots);

    // Item
    dispatcher.register(Command::AddNewItemToInventory, add_new_item);
    dispatcher.register(Command::RemoveItemFromInventory, remove_item);
    dispatcher.register(Command::DoesItemExistsInInventory, does_item_exist);

    // Tag
    dispatcher.register(Command::AddTagToItem, |ctx, args| {
        let item = ctx.resolve_item(args)?;
        item.add_tag(args.string(2)?, args.value_or_null(3))?;
        Ok(true.into())
    });
    dispatcher.register(Command::RemoveTagFromItem, |ctx, args| {
        let item = ctx.resolve_item(args)?;
        item.remove_tag(&args.string(2)?)?;
        Ok(true.into())
    });
    dispatcher.register(Command::DoesItemHaveTag, |ctx, args| {
        let item = ctx.resolve_item(args)?;
        Ok(item.has_tag(&args.string(2)?).into())
    });

    // Popup item
    dispatcher.register(Command::AddPopupItemToItem, |ctx, args| {
        let item = ctx.resolve_item(args)?;
        item.add_popup_entry(args.string(2)?)?;
        Ok(true.into())
    });
    dispatcher.register(Command::RemovePopupItemFromItem, |ctx, args| {
        let item = ctx.resolve_item(args)?;
        item.remove_popup_entry(&args.string(2)?)?;
        Ok(true.into())
    });
    dispatcher.register(Command::DoesItemHavePopupItem, |ctx, args| {
        let item = ctx.resolve_item(args)?;
        Ok(item.has_popup_entry(&args.string(2)?).into())
    });

    // Icon
    dispatcher.register(Command::AddIconToItem, add_icon);
    dispatcher.register(Command::RemoveIconFromItem, |ctx, args| {
        ctx.resolve_item(args)?.clear_icon();
        Ok(true.into())
    });

    // Tooltip and flags
    dispatcher.register(Command::SetItemTooltip, |ctx, args| {
        let text = args.string(2)?;
        ctx.resolve_item(args)?.tooltip = Some(text);
        Ok(true.into())
    });
    dispatcher.register(Command::SetItemNotRemovedFromInventoryOnModUnload, set_keep_on_unload);

    // Events
    for kind in ItemEventKind::ALL {
        dispatcher.register(Command::Subscribe(kind), move |ctx, args| {
            let sender = ctx.sender;
            pac_event::subscribe(ctx.resolve_item(args)?, kind, sender)?;
            Ok(true.into())
        });
        dispatcher.register(Command::Unsubscribe(kind), move |ctx, args| {
            pac_event::unsubscribe(ctx.resolve_item(args)?, kind)?;
            Ok(true.into())
        });
    }
}

fn get_player_inventory_id(ctx: &mut CommandContext<'_>, _: &Args<'_>) -> Result<Value> {
    let id = ctx.player_inventory.unwrap_or_default();
    if !ctx.pool.contains(id) {
        return Err(InventoryError::InventoryNotFound(id));
    }
    Ok(id.into())
}

fn get_free_slots(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> Result<Value> {
    Ok(ctx.resolve_inventory(args)?.free_slot_count().into())
}

/// args: inventory, content hash, button, top-left, top-right,
/// bottom-left, bottom-right
fn add_new_item(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> Result<Value> {
    let sender = ctx.sender;
    let inventory = ctx.resolve_inventory(args)?;
    if inventory.is_full() {
        return Err(InventoryError::InventoryFull(inventory.id()));
    }

    let text = |index: usize| {
        let s = args.value_or_null(index).to_string_value();
        (!s.is_empty()).then_some(s)
    };

    let mut item = Item::new(args.u32(1)?);
    item.button_text = text(2);
    item.top_left_text = text(3);
    item.top_right_text = text(4);
    item.bottom_left_text = text(5);
    item.bottom_right_text = text(6);
    item.add_tag(WellKnownTag::IsCustomItem.key(), sender)?;

    let id = item.id();
    inventory.add_item(item)?;
    log::debug!("Script {} added item {} to '{}'", sender, id, inventory.name());
    Ok(id.into())
}

fn remove_item(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> Result<Value> {
    let inventory = ctx.resolve_inventory(args)?;
    inventory.remove_item(args.item_id(1)?)?;
    Ok(true.into())
}

fn does_item_exist(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> Result<Value> {
    let inventory = ctx.resolve_inventory(args)?;
    Ok(inventory.contains_item(args.item_id(1)?).into())
}

/// args: inventory, item, texture handle, width, height
fn add_icon(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> Result<Value> {
    let dimension = |index: usize| -> Result<u32> {
        let n = args.int(index)?;
        u32::try_from(n).map_err(|_| InventoryError::InvalidArgument {
            index,
            expected: "non-negative int",
            found: "int",
        })
    };

    let item = ctx.resolve_item(args)?;
    let texture = Texture::new(args.handle(2)?, dimension(3)?, dimension(4)?);
    item.set_icon(TextureRef::new(texture));
    Ok(true.into())
}

/// Setting an already set flag (or clearing a clear one) still succeeds
fn set_keep_on_unload(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> Result<Value> {
    let keep = args.bool(2)?;
    let item = ctx.resolve_item(args)?;
    let key = WellKnownTag::KeepOnOwnerUnload.key();

    if keep && !item.has_tag(key) {
        item.add_tag(key, Value::Null)?;
    } else if !keep && item.has_tag(key) {
        item.remove_tag(key)?;
    }
    Ok(true.into())
}
