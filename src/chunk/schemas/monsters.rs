//! Monster base data plus the encrypted hitzone and status families.

use std::sync::{Arc, LazyLock};

use crate::chunk::layout::{FieldCodec, MapMode, Scalar, Schema, ValueMap};

pub const MONSTER_MAGIC: u16 = 0x01C0;
pub const HITZONE_MAGIC: u16 = 0x01C3;
pub const STATUS_MAGIC: u16 = 0x01C4;

pub const SIZE_CLASSES: ValueMap = &[(0, "small"), (1, "large")];

pub static MONSTER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("monster")
        .u32("id")
        .field(
            "size_class",
            FieldCodec::mapped(Scalar::U8, SIZE_CLASSES, MapMode::Strict),
        )
        .u16("base_hp")
        .f32("base_size")
        .f32("size_variance")
        .u8("pad")
        .build(16)
        .expect("monster schema declaration")
});

/// Per-part damage multipliers, one record per (monster, part, state).
pub static MONSTER_HITZONE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("monster_hitzone")
        .u16("monster")
        .u8("part")
        .u8("state")
        .u8("cut")
        .u8("impact")
        .u8("shot")
        .u8("fire")
        .u8("water")
        .u8("thunder")
        .u8("ice")
        .u8("dragon")
        .u8("stun")
        .field("pad", FieldCodec::fixed_list(FieldCodec::u8(), 3))
        .build(16)
        .expect("monster_hitzone schema declaration")
});

/// Ailment buildup curve, one record per (monster, ailment).
pub static MONSTER_STATUS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("monster_status")
        .u16("monster")
        .u16("initial")
        .u16("increase")
        .u16("max")
        .u16("duration")
        .u16("damage")
        .u32("pad")
        .build(16)
        .expect("monster_status schema declaration")
});
