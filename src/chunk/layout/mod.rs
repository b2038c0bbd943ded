//! Binary struct-layout engine.
//!
//! The layer every format in this crate is built on:
//!
//! - [`cursor`]: bounds-checked sequential reads over one buffer
//! - [`field`]: the closed set of field codecs (scalars, lists, maps, nesting)
//! - [`schema`]: ordered field declarations with offsets computed and checked
//!   at definition time
//! - [`value`]: decoded values and records
//!
//! Layouts are declared explicitly through [`Schema::builder`]; there is no
//! runtime reflection. Random access works for any field at a static offset;
//! once a field's size depends on content, it and all later siblings resolve
//! through a cursor instead.

pub mod cursor;
pub mod field;
pub mod schema;
pub mod value;

pub use cursor::Cursor;
pub use field::{FieldCodec, MapMode, Scalar, ValueMap};
pub use schema::{FieldDescriptor, Schema, SchemaBuilder};
pub use value::{Record, Value};
