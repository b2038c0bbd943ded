//! On-disk format parsing layer.
//!
//! - [`structfile`]: the generic magic + count container of fixed-width
//!   records
//! - [`gmd`]: the localized text-table format
//! - [`text`]: string normalization and the per-language merge

pub mod gmd;
pub mod structfile;
pub mod text;

pub use gmd::{Gmd, GmdEntry, GmdHeader};
pub use structfile::{EntryView, StructFile};
pub use text::TextTable;
