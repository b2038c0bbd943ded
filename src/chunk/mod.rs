//! Core chunk decoding module

pub mod codec;
pub mod collection;
pub mod format;
pub mod layout;
pub mod reader;
pub mod schemas;
pub mod tree;
pub mod types;

pub use codec::FileFamily;
pub use collection::RecordCollection;
pub use format::{Gmd, StructFile, TextTable};
pub use layout::{FieldCodec, Record, Schema, Value};
pub use tree::{EquipEntry, EquipForest, UpgradeRelation};
pub use types::error::{ChunkError, Result};
pub use types::models::Language;
