//! Concrete record layouts for the chunk corpus.
//!
//! Thin declarations only: every layout below was transcribed from
//! reverse-engineered notes, so each is declared with its expected total size
//! and validated by the layout engine the first time it is touched.
//!
//! Grouped by domain the way the files ship: [`items`], [`armor`],
//! [`weapons`], [`monsters`], [`quests`].

pub mod armor;
pub mod items;
pub mod monsters;
pub mod quests;
pub mod weapons;

use crate::chunk::layout::{Record, ValueMap};
use crate::chunk::types::error::Result;

/// Hunt rank tiers. Warn-mapped where event-only tiers may still appear.
pub const HUNT_RANKS: ValueMap = &[(0, "low"), (1, "high"), (2, "g")];

/// Display rarity is stored zero-based on disk.
pub fn display_rarity(record: &Record) -> Result<u64> {
    Ok(record.uint("rarity_raw")? + 1)
}
