//! Weapon, kinsect, and charm layouts, plus the craft/upgrade relation
//! every equipment tree is wired from.

use std::sync::{Arc, LazyLock};

use super::armor::SKILL_POINT;
use crate::chunk::layout::{FieldCodec, MapMode, Scalar, Schema, ValueMap};

pub const WEAPON_MAGIC: u16 = 0x01B0;
pub const WEAPON_CRAFT_MAGIC: u16 = 0x01B3;
pub const GUN_STATS_MAGIC: u16 = 0x01B4;
pub const BOW_STATS_MAGIC: u16 = 0x01B5;
pub const KINSECT_MAGIC: u16 = 0x01B8;
pub const KINSECT_CRAFT_MAGIC: u16 = 0x01B9;
pub const CHARM_MAGIC: u16 = 0x01BC;

pub const WEAPON_CLASSES: ValueMap = &[
    (0, "great-sword"),
    (1, "long-sword"),
    (2, "sword-and-shield"),
    (3, "dual-blades"),
    (4, "hammer"),
    (5, "hunting-horn"),
    (6, "lance"),
    (7, "gunlance"),
    (8, "switch-axe"),
    (9, "charge-blade"),
    (10, "insect-glaive"),
    (11, "light-bowgun"),
    (12, "heavy-bowgun"),
    (13, "bow"),
];

pub const ELEMENT_KINDS: ValueMap = &[
    (0, "none"),
    (1, "fire"),
    (2, "water"),
    (3, "thunder"),
    (4, "ice"),
    (5, "dragon"),
    (6, "poison"),
    (7, "paralysis"),
    (8, "sleep"),
    (9, "blast"),
];

/// Bow arc shapes; event weapons have shown at least one unmapped value.
pub const BOW_ARCS: ValueMap = &[(0, "wide"), (1, "power"), (2, "close")];

pub const KINSECT_ATTACK_TYPES: ValueMap = &[(0, "sever"), (1, "blunt")];

/// One crafting ingredient: item id and quantity.
pub static RECIPE_PAIR: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("recipe_pair")
        .u16("item")
        .u8("quantity")
        .build(3)
        .expect("recipe_pair schema declaration")
});

pub static WEAPON: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("weapon")
        .u32("id")
        .field(
            "class",
            FieldCodec::mapped(Scalar::U8, WEAPON_CLASSES, MapMode::Strict),
        )
        .u8("tree_id")
        .u8("rarity_raw")
        .u16("attack")
        .i8("affinity")
        .u16("defense")
        .field(
            "element",
            FieldCodec::mapped(Scalar::U8, ELEMENT_KINDS, MapMode::Strict),
        )
        .u16("element_value")
        .field(
            "element2",
            FieldCodec::mapped(Scalar::U8, ELEMENT_KINDS, MapMode::Strict),
        )
        .u16("element2_value")
        .u8("sharpness_id")
        .u8("num_slots")
        .u8("creatable")
        .u8("final_upgrade")
        .u16("pad")
        .build(24)
        .expect("weapon schema declaration")
});

/// Upgrade relation: owner, create/upgrade recipes, up to four descendant
/// indices, and the direct-descendant flag driving tree-name inheritance.
pub static WEAPON_CRAFT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("weapon_craft")
        .u32("equip_index")
        .field(
            "create",
            FieldCodec::fixed_list(FieldCodec::nested(RECIPE_PAIR.clone()), 4),
        )
        .field(
            "upgrade",
            FieldCodec::fixed_list(FieldCodec::nested(RECIPE_PAIR.clone()), 4),
        )
        .field("descendants", FieldCodec::fixed_list(FieldCodec::u16(), 4))
        .u8("direct_descendant")
        .u8("pad")
        .build(38)
        .expect("weapon_craft schema declaration")
});

/// Bowgun extension record, keyed back to the weapon by index.
pub static GUN_STATS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("gun_stats")
        .u32("equip_index")
        .u8("reload")
        .u8("recoil")
        .u8("deviation")
        .u8("special_ammo")
        .field("ammo", FieldCodec::fixed_list(FieldCodec::u8(), 16))
        .build(24)
        .expect("gun_stats schema declaration")
});

pub static BOW_STATS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("bow_stats")
        .u32("equip_index")
        .field("arc", FieldCodec::mapped(Scalar::U8, BOW_ARCS, MapMode::Warn))
        .field("charges", FieldCodec::fixed_list(FieldCodec::u8(), 4))
        .u16("coatings")
        .u8("pad")
        .build(12)
        .expect("bow_stats schema declaration")
});

pub static KINSECT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("kinsect")
        .u32("id")
        .u8("tree_id")
        .u8("rarity_raw")
        .field(
            "attack_type",
            FieldCodec::mapped(Scalar::U8, KINSECT_ATTACK_TYPES, MapMode::Strict),
        )
        .u8("power")
        .u8("speed")
        .u8("heal")
        .u16("pad")
        .build(12)
        .expect("kinsect schema declaration")
});

pub static CHARM: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("charm")
        .u32("id")
        .u8("rarity_raw")
        .u8("num_slots")
        .field(
            "skills",
            FieldCodec::fixed_list(FieldCodec::nested(SKILL_POINT.clone()), 2),
        )
        .build(12)
        .expect("charm schema declaration")
});
