//! Armor, skill, and decoration layouts.

use std::sync::{Arc, LazyLock};

use crate::chunk::layout::{FieldCodec, MapMode, Scalar, Schema, ValueMap};

pub const ARMOR_MAGIC: u16 = 0x01A1;
pub const SKILL_TREE_MAGIC: u16 = 0x01A5;
pub const DECORATION_MAGIC: u16 = 0x01A9;

pub const ARMOR_PARTS: ValueMap = &[
    (0, "head"),
    (1, "chest"),
    (2, "arms"),
    (3, "waist"),
    (4, "legs"),
];

pub const GENDERS: ValueMap = &[(0, "both"), (1, "male"), (2, "female")];

pub const HUNTER_TYPES: ValueMap = &[(0, "both"), (1, "blademaster"), (2, "gunner")];

/// Skill categories past index 3 are still unidentified in the corpus.
pub const SKILL_CATEGORIES: ValueMap = &[
    (0, "offense"),
    (1, "defense"),
    (2, "resistance"),
    (3, "gathering"),
];

/// Points granted toward one skill tree; negative for penalty skills.
pub static SKILL_POINT: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("skill_point")
        .u16("tree")
        .i8("points")
        .build(3)
        .expect("skill_point schema declaration")
});

pub static ARMOR: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("armor")
        .u32("id")
        .field("part", FieldCodec::mapped(Scalar::U8, ARMOR_PARTS, MapMode::Strict))
        .u8("rarity_raw")
        .field("gender", FieldCodec::mapped(Scalar::U8, GENDERS, MapMode::Strict))
        .field(
            "hunter_type",
            FieldCodec::mapped(Scalar::U8, HUNTER_TYPES, MapMode::Strict),
        )
        .u16("defense")
        .i8("fire_res")
        .i8("water_res")
        .i8("thunder_res")
        .i8("ice_res")
        .i8("dragon_res")
        .u8("num_slots")
        .field(
            "skills",
            FieldCodec::fixed_list(FieldCodec::nested(SKILL_POINT.clone()), 5),
        )
        .u8("pad")
        .u32("price")
        .build(36)
        .expect("armor schema declaration")
});

pub static SKILL_TREE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("skill_tree")
        .u16("id")
        .u8("icon")
        .field(
            "category",
            FieldCodec::mapped(Scalar::U8, SKILL_CATEGORIES, MapMode::Warn),
        )
        .u8("max_points")
        .u8("pad")
        .build(6)
        .expect("skill_tree schema declaration")
});

pub static DECORATION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("decoration")
        .u32("id")
        .u8("slots_required")
        .u8("rarity_raw")
        .field(
            "skills",
            FieldCodec::fixed_list(FieldCodec::nested(SKILL_POINT.clone()), 2),
        )
        .u8("carry_limit")
        .u8("pad")
        .u32("price")
        .build(18)
        .expect("decoration schema declaration")
});
