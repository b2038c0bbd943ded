//! Struct schemas: ordered field declarations with computed offsets.
//!
//! A schema is declared once through [`SchemaBuilder`], which lays fields out
//! as a running sum of the preceding sizes and checks the declared total
//! against the computed one. The formats here are undocumented and hand
//! transcribed, so a mismatch is a transcription error and must fail before
//! any file is read.

use std::sync::Arc;

use log::debug;

use super::cursor::Cursor;
use super::field::FieldCodec;
use super::value::Record;
use crate::chunk::types::error::{ChunkError, Result};

/// One declared field: name, codec, and its computed offset.
#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub codec: FieldCodec,
    /// Byte offset from the start of the record. `None` once any preceding
    /// field lacks a static size; such fields are only reachable through a
    /// cursor, never by random access.
    pub offset: Option<usize>,
}

/// An ordered, validated field layout.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    static_size: Option<usize>,
}

impl Schema {
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Total record size when every field is fixed-width.
    pub fn static_size(&self) -> Option<usize> {
        self.static_size
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Decode one record sequentially at the cursor.
    ///
    /// Inner failures are rewrapped with the schema and field name.
    pub fn decode(&self, cur: &mut Cursor<'_>) -> Result<Record> {
        let mut values = Vec::with_capacity(self.fields.len());
        for desc in &self.fields {
            let value = desc.codec.read(cur).map_err(|e| ChunkError::FieldRead {
                structure: self.name,
                field: desc.name.to_string(),
                source: Box::new(e),
            })?;
            values.push((desc.name, value));
        }
        Ok(Record::new(self.name, values))
    }
}

/// Collects ordered `(name, codec)` declarations for one schema.
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<(&'static str, FieldCodec)>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: &'static str, codec: FieldCodec) -> Self {
        self.fields.push((name, codec));
        self
    }

    pub fn u8(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::u8())
    }
    pub fn i8(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::i8())
    }
    pub fn u16(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::u16())
    }
    pub fn i16(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::i16())
    }
    pub fn u32(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::u32())
    }
    pub fn i32(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::i32())
    }
    pub fn u64(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::u64())
    }
    pub fn i64(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::i64())
    }
    pub fn f32(self, name: &'static str) -> Self {
        self.field(name, FieldCodec::f32())
    }

    /// Finish a fixed-width schema, checking the declared total size.
    pub fn build(self, declared_size: usize) -> Result<Arc<Schema>> {
        let name = self.name;
        let (fields, computed) = self.layout()?;
        match computed {
            Some(total) if total == declared_size => {
                debug!("schema '{}': {} fields, {} bytes", name, fields.len(), total);
                Ok(Arc::new(Schema {
                    name,
                    fields,
                    static_size: Some(total),
                }))
            }
            Some(total) => Err(ChunkError::SchemaDefinition {
                schema: name,
                declared: declared_size,
                computed: total,
            }),
            None => Err(ChunkError::InvalidFormat(format!(
                "schema '{}' contains dynamic fields; declare it with build_dynamic",
                name
            ))),
        }
    }

    /// Finish a schema whose total size depends on runtime content.
    pub fn build_dynamic(self) -> Result<Arc<Schema>> {
        let name = self.name;
        let (fields, computed) = self.layout()?;
        if computed.is_some() {
            return Err(ChunkError::InvalidFormat(format!(
                "schema '{}' is fully static; declare it with build and its total size",
                name
            )));
        }
        debug!("schema '{}': {} fields, dynamic size", name, fields.len());
        Ok(Arc::new(Schema {
            name,
            fields,
            static_size: None,
        }))
    }

    /// Computes offsets as the running sum of prior field sizes. The first
    /// dynamic field still has a known offset; everything after it does not.
    fn layout(self) -> Result<(Vec<FieldDescriptor>, Option<usize>)> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut offset = Some(0usize);
        for (name, codec) in self.fields {
            if fields.iter().any(|f: &FieldDescriptor| f.name == name) {
                return Err(ChunkError::InvalidFormat(format!(
                    "schema '{}' declares field '{}' twice",
                    self.name, name
                )));
            }
            let size = codec.static_size();
            fields.push(FieldDescriptor {
                name,
                codec,
                offset,
            });
            offset = match (offset, size) {
                (Some(base), Some(len)) => Some(base + len),
                _ => None,
            };
        }
        Ok((fields, offset))
    }
}
