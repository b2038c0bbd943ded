//! Quest-family layouts and the music cue table.
//!
//! Quest records are encrypted (quest family key) and carry a
//! content-dependent monster list, so they stream rather than sit in a
//! counted container.

use std::sync::{Arc, LazyLock};

use super::HUNT_RANKS;
use super::items::LOOT_SLOT;
use crate::chunk::layout::{FieldCodec, MapMode, Scalar, Schema, ValueMap};

pub const MUSIC_MAGIC: u16 = 0x01C8;

pub const QUEST_CATEGORIES: ValueMap = &[
    (0, "hunting"),
    (1, "slaying"),
    (2, "capture"),
    (3, "gathering"),
    (4, "delivery"),
];

pub static QUEST_OBJECTIVE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("quest_objective")
        .u8("kind")
        .u8("quantity")
        .u16("target")
        .build(4)
        .expect("quest_objective schema declaration")
});

pub static QUEST_MONSTER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("quest_monster")
        .u16("monster")
        .u8("condition")
        .u8("area")
        .build(4)
        .expect("quest_monster schema declaration")
});

pub static QUEST: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("quest")
        .u32("id")
        .field(
            "category",
            FieldCodec::mapped(Scalar::U8, QUEST_CATEGORIES, MapMode::Warn),
        )
        .u8("stars")
        .field("rank", FieldCodec::mapped(Scalar::U8, HUNT_RANKS, MapMode::Strict))
        .u8("map")
        .u32("fee")
        .u32("reward")
        .u32("hrp")
        .field(
            "objectives",
            FieldCodec::fixed_list(FieldCodec::nested(QUEST_OBJECTIVE.clone()), 2),
        )
        .field(
            "monsters",
            FieldCodec::dynamic_list(FieldCodec::nested(QUEST_MONSTER.clone())),
        )
        .build_dynamic()
        .expect("quest schema declaration")
});

/// Reward screen contents; slot count varies per quest.
pub static QUEST_REWARD: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("quest_reward")
        .u32("quest")
        .u8("slot")
        .u8("pad")
        .field(
            "items",
            FieldCodec::dynamic_list(FieldCodec::nested(LOOT_SLOT.clone())),
        )
        .build_dynamic()
        .expect("quest_reward schema declaration")
});

/// Battle music cue table from the encrypted music family.
pub static MUSIC: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("music")
        .u16("id")
        .u16("flags")
        .u32("loop_start")
        .u32("loop_end")
        .build(12)
        .expect("music schema declaration")
});
