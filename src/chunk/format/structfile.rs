//! Generic fixed-width-record container.
//!
//! # File Structure
//! ```text
//! [2 bytes] magic (little-endian u16)
//! [2 bytes] padding
//! [4 bytes] entry count (little-endian u32)
//! [count × entry width] records
//! ```
//!
//! The whole file is validated up front: wrong magic or a count that implies
//! a different size than the buffer rejects the file outright. Entries are
//! offset-addressed views into the one shared buffer; nothing is copied until
//! a record is decoded.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::chunk::layout::{Cursor, Record, Schema, Value};
use crate::chunk::types::error::{ChunkError, Result};

/// Size of the magic + count header.
pub const HEADER_SIZE: usize = 8;
const COUNT_OFFSET: usize = 4;

/// A parsed struct-file: header plus lazily-viewed entries.
#[derive(Debug)]
pub struct StructFile<'a> {
    buf: &'a [u8],
    schema: &'a Schema,
    entry_size: usize,
    count: usize,
}

impl<'a> StructFile<'a> {
    /// Validates the header and total size against `schema`.
    ///
    /// The schema must be fixed-width; a container of dynamic records would
    /// have no addressable entries.
    pub fn parse(buf: &'a [u8], magic: u16, schema: &'a Schema) -> Result<Self> {
        let entry_size = schema.static_size().ok_or_else(|| {
            ChunkError::InvalidFormat(format!(
                "schema '{}' has no fixed entry width; it cannot back a struct file",
                schema.name()
            ))
        })?;
        if buf.len() < HEADER_SIZE {
            return Err(ChunkError::InvalidFormat(format!(
                "struct file shorter than its {}-byte header",
                HEADER_SIZE
            )));
        }
        let found_magic = LittleEndian::read_u16(&buf[0..2]);
        if found_magic != magic {
            return Err(ChunkError::InvalidFormat(format!(
                "bad struct-file magic: expected {:#06x}, found {:#06x}",
                magic, found_magic
            )));
        }
        let count = LittleEndian::read_u32(&buf[COUNT_OFFSET..COUNT_OFFSET + 4]) as usize;
        let expected = HEADER_SIZE + count * entry_size;
        if expected != buf.len() {
            return Err(ChunkError::SizeMismatch {
                context: "struct file",
                expected: expected as u64,
                found: buf.len() as u64,
            });
        }
        debug!(
            "struct file '{}': {} entries of {} bytes",
            schema.name(),
            count,
            entry_size
        );
        Ok(Self {
            buf,
            schema,
            entry_size,
            count,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// A view over entry `index`, borrowing the file buffer.
    pub fn entry(&self, index: usize) -> Option<EntryView<'a>> {
        if index >= self.count {
            return None;
        }
        let start = HEADER_SIZE + index * self.entry_size;
        Some(EntryView {
            buf: &self.buf[start..start + self.entry_size],
            schema: self.schema,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = EntryView<'a>> + '_ {
        (0..self.count).filter_map(|i| self.entry(i))
    }

    /// Decode every entry into an owned record, wrapping failures with the
    /// entry index.
    pub fn decode_all(&self) -> Result<Vec<Record>> {
        self.entries()
            .enumerate()
            .map(|(index, view)| {
                view.decode().map_err(|e| ChunkError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}

/// A read-only, offset-addressed view of one struct within a shared buffer.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    buf: &'a [u8],
    schema: &'a Schema,
}

impl<'a> EntryView<'a> {
    /// Views a struct laid out at the start of `buf`. Useful for the files
    /// that hold one fixed struct rather than a counted container.
    pub fn new(buf: &'a [u8], schema: &'a Schema) -> Self {
        Self { buf, schema }
    }

    /// Read one field.
    ///
    /// Fields at a static offset are random-accessed; from the first
    /// content-sized field onward the view decodes sequentially from that
    /// field's offset so later siblings are never mis-offset.
    pub fn get(&self, name: &str) -> Result<Value> {
        let position = self.schema.field_position(name).ok_or_else(|| {
            ChunkError::InvalidFormat(format!(
                "schema '{}' has no field '{}'",
                self.schema.name(),
                name
            ))
        })?;
        let fields = self.schema.fields();
        let desc = &fields[position];
        if let (Some(offset), Some(_)) = (desc.offset, desc.codec.static_size()) {
            let mut cur = Cursor::at(self.buf, offset);
            return desc.codec.read(&mut cur).map_err(|e| self.wrap(name, e));
        }

        // Cursor fallback: replay from the first dynamic field, whose offset
        // is still static by construction.
        let first_dynamic = fields
            .iter()
            .position(|f| f.codec.static_size().is_none())
            .ok_or_else(|| {
                ChunkError::InvalidFormat(format!(
                    "schema '{}' lost offsets without a dynamic field",
                    self.schema.name()
                ))
            })?;
        let start = fields[first_dynamic].offset.ok_or_else(|| {
            ChunkError::InvalidFormat(format!(
                "schema '{}': first dynamic field has no offset",
                self.schema.name()
            ))
        })?;
        let mut cur = Cursor::at(self.buf, start);
        for earlier in &fields[first_dynamic..position] {
            earlier
                .codec
                .read(&mut cur)
                .map_err(|e| self.wrap(earlier.name, e))?;
        }
        desc.codec.read(&mut cur).map_err(|e| self.wrap(name, e))
    }

    /// Decode the whole struct into an owned record.
    pub fn decode(&self) -> Result<Record> {
        let mut cur = Cursor::new(self.buf);
        self.schema.decode(&mut cur)
    }

    /// The raw bytes backing this view.
    pub fn bytes(&self) -> &'a [u8] {
        self.buf
    }

    fn wrap(&self, field: &str, source: ChunkError) -> ChunkError {
        ChunkError::FieldRead {
            structure: self.schema.name(),
            field: field.to_string(),
            source: Box::new(source),
        }
    }
}
