//! # chunk-reader
//!
//! A reader for the binary resource containers extracted from the game's
//! chunk archives: counted struct files, Blowfish-encrypted record families,
//! and per-language text tables.
//!
//! Record layouts are declared once as [`chunk::layout::Schema`] values and
//! decoded reflectively, so a layout correction is a one-line edit rather
//! than a parser rewrite.
pub mod chunk;

// Re-export the main types for convenience
pub use chunk::{
    ChunkError, EquipForest, FileFamily, Gmd, Language, Record, RecordCollection, Result, Schema,
    StructFile, TextTable, Value,
};
