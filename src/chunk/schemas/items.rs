//! Item, combination, shop, and loot-table layouts.

use std::sync::{Arc, LazyLock};

use super::HUNT_RANKS;
use crate::chunk::layout::{FieldCodec, MapMode, Scalar, Schema, ValueMap};

/// Struct-file magics for the item family.
pub const ITEM_MAGIC: u16 = 0x0186;
pub const ITEM_COMBO_MAGIC: u16 = 0x0187;
pub const SHOP_MAGIC: u16 = 0x0192;

/// Shop identifiers are only partially reverse-engineered.
pub const SHOP_KINDS: ValueMap = &[(0, "general"), (1, "trader"), (2, "arena")];

pub static ITEM: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("item")
        .u32("id")
        .u16("icon")
        .u8("icon_color")
        .u8("rarity_raw")
        .u8("carry_limit")
        .u8("flags")
        .u32("buy_price")
        .u32("sell_price")
        .u16("combo_id")
        .build(20)
        .expect("item schema declaration")
});

/// Two ingredients combining into a result, with a base success rate.
pub static ITEM_COMBO: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("item_combo")
        .u16("result")
        .u16("first")
        .u16("second")
        .u8("quantity")
        .u8("success_rate")
        .build(8)
        .expect("item_combo schema declaration")
});

pub static SHOP_ENTRY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("shop_entry")
        .u16("item")
        .u16("unlock_quest")
        .field("shop", FieldCodec::mapped(Scalar::U8, SHOP_KINDS, MapMode::Warn))
        .u8("pad")
        .build(6)
        .expect("shop_entry schema declaration")
});

/// One reward slot: item, stack size, and percentage chance.
pub static LOOT_SLOT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("loot_slot")
        .u16("item")
        .u8("stack")
        .u8("chance")
        .build(4)
        .expect("loot_slot schema declaration")
});

/// Carve/capture table from the encrypted loot family. Slot count depends on
/// the monster, so the record streams.
pub static LOOT_TABLE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("loot_table")
        .u16("monster")
        .field("rank", FieldCodec::mapped(Scalar::U8, HUNT_RANKS, MapMode::Warn))
        .u8("pad")
        .field(
            "slots",
            FieldCodec::dynamic_list(FieldCodec::nested(LOOT_SLOT.clone())),
        )
        .build_dynamic()
        .expect("loot_table schema declaration")
});
