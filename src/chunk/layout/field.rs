//! Field codecs: the closed set of binary shapes a schema field can take.
//!
//! Every codec reports `static_size()`; a `None` there forces cursor-based
//! resolution for the field and everything after it in the same schema.

use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};
use log::warn;

use super::cursor::Cursor;
use super::schema::Schema;
use super::value::Value;
use crate::chunk::types::error::{ChunkError, Result};

/// Fixed-width little-endian scalar descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
}

impl Scalar {
    pub const fn width(self) -> usize {
        match self {
            Scalar::U8 | Scalar::I8 => 1,
            Scalar::U16 | Scalar::I16 => 2,
            Scalar::U32 | Scalar::I32 | Scalar::F32 => 4,
            Scalar::U64 | Scalar::I64 => 8,
        }
    }

    pub fn read(self, cur: &mut Cursor<'_>) -> Result<Value> {
        Ok(match self {
            Scalar::U8 => Value::UInt(cur.take(1)?[0] as u64),
            Scalar::I8 => Value::Int(cur.take(1)?[0] as i8 as i64),
            Scalar::U16 => Value::UInt(LittleEndian::read_u16(cur.take(2)?) as u64),
            Scalar::I16 => Value::Int(LittleEndian::read_i16(cur.take(2)?) as i64),
            Scalar::U32 => Value::UInt(LittleEndian::read_u32(cur.take(4)?) as u64),
            Scalar::I32 => Value::Int(LittleEndian::read_i32(cur.take(4)?) as i64),
            Scalar::U64 => Value::UInt(LittleEndian::read_u64(cur.take(8)?)),
            Scalar::I64 => Value::Int(LittleEndian::read_i64(cur.take(8)?)),
            Scalar::F32 => Value::Float(LittleEndian::read_f32(cur.take(4)?)),
        })
    }
}

/// How a mapped field treats a key outside its map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Fail the read, enumerating the valid keys. For fully reverse-engineered
    /// enumerations.
    Strict,
    /// Log and pass the raw scalar through. For enumerations whose tail end is
    /// still unknown.
    Warn,
}

/// A static value-remapping table for enumerated fields.
pub type ValueMap = &'static [(i64, &'static str)];

/// The binary shape of one schema field.
#[derive(Debug, Clone)]
pub enum FieldCodec {
    Scalar(Scalar),
    /// `len` consecutive elements, statically sized when the element is.
    FixedList { elem: Box<FieldCodec>, len: usize },
    /// A `count` scalar followed by that many elements; size only known by
    /// streaming.
    DynamicList { elem: Box<FieldCodec>, count: Scalar },
    /// A scalar looked up in a static map.
    Mapped {
        base: Scalar,
        map: ValueMap,
        mode: MapMode,
    },
    /// Another schema embedded as a field.
    Nested(Arc<Schema>),
}

impl FieldCodec {
    pub fn u8() -> Self {
        FieldCodec::Scalar(Scalar::U8)
    }
    pub fn i8() -> Self {
        FieldCodec::Scalar(Scalar::I8)
    }
    pub fn u16() -> Self {
        FieldCodec::Scalar(Scalar::U16)
    }
    pub fn i16() -> Self {
        FieldCodec::Scalar(Scalar::I16)
    }
    pub fn u32() -> Self {
        FieldCodec::Scalar(Scalar::U32)
    }
    pub fn i32() -> Self {
        FieldCodec::Scalar(Scalar::I32)
    }
    pub fn u64() -> Self {
        FieldCodec::Scalar(Scalar::U64)
    }
    pub fn i64() -> Self {
        FieldCodec::Scalar(Scalar::I64)
    }
    pub fn f32() -> Self {
        FieldCodec::Scalar(Scalar::F32)
    }

    pub fn fixed_list(elem: FieldCodec, len: usize) -> Self {
        FieldCodec::FixedList {
            elem: Box::new(elem),
            len,
        }
    }

    /// A dynamic list with the conventional 4-byte count prefix.
    pub fn dynamic_list(elem: FieldCodec) -> Self {
        Self::dynamic_list_with(elem, Scalar::U32)
    }

    pub fn dynamic_list_with(elem: FieldCodec, count: Scalar) -> Self {
        FieldCodec::DynamicList {
            elem: Box::new(elem),
            count,
        }
    }

    pub fn mapped(base: Scalar, map: ValueMap, mode: MapMode) -> Self {
        FieldCodec::Mapped { base, map, mode }
    }

    pub fn nested(schema: Arc<Schema>) -> Self {
        FieldCodec::Nested(schema)
    }

    /// Size of this codec when it does not depend on runtime content.
    pub fn static_size(&self) -> Option<usize> {
        match self {
            FieldCodec::Scalar(s) => Some(s.width()),
            FieldCodec::FixedList { elem, len } => elem.static_size().map(|s| s * len),
            FieldCodec::DynamicList { .. } => None,
            FieldCodec::Mapped { base, .. } => Some(base.width()),
            FieldCodec::Nested(schema) => schema.static_size(),
        }
    }

    /// Decode one value at the cursor, advancing past it.
    pub fn read(&self, cur: &mut Cursor<'_>) -> Result<Value> {
        match self {
            FieldCodec::Scalar(s) => s.read(cur),
            FieldCodec::FixedList { elem, len } => {
                let mut items = Vec::with_capacity(*len);
                for index in 0..*len {
                    items.push(elem.read(cur).map_err(|e| wrap_element(index, e))?);
                }
                Ok(Value::List(items))
            }
            FieldCodec::DynamicList { elem, count } => {
                let len = read_count(*count, cur)?;
                let mut items = Vec::with_capacity(len.min(4096));
                for index in 0..len {
                    items.push(elem.read(cur).map_err(|e| wrap_element(index, e))?);
                }
                Ok(Value::List(items))
            }
            FieldCodec::Mapped { base, map, mode } => {
                let value = base.read(cur)?;
                let raw = match &value {
                    Value::UInt(v) => i64::try_from(*v).map_err(|_| {
                        ChunkError::InvalidFormat(format!("mapped value {} out of range", v))
                    })?,
                    Value::Int(v) => *v,
                    _ => {
                        return Err(ChunkError::InvalidFormat(
                            "mapped field requires an integer base codec".to_string(),
                        ));
                    }
                };
                match map.iter().find(|(key, _)| *key == raw) {
                    Some((_, label)) => Ok(Value::Label(label)),
                    None => match mode {
                        MapMode::Strict => Err(ChunkError::UnmappedValue {
                            raw,
                            valid: valid_keys(map),
                        }),
                        MapMode::Warn => {
                            warn!(
                                "unmapped value {} (valid keys: {}); passing raw value through",
                                raw,
                                valid_keys(map)
                            );
                            Ok(value)
                        }
                    },
                }
            }
            FieldCodec::Nested(schema) => Ok(Value::Struct(schema.decode(cur)?)),
        }
    }
}

fn wrap_element(index: usize, source: ChunkError) -> ChunkError {
    ChunkError::Element {
        index,
        source: Box::new(source),
    }
}

fn valid_keys(map: ValueMap) -> String {
    map.iter()
        .map(|(key, _)| key.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_count(count: Scalar, cur: &mut Cursor<'_>) -> Result<usize> {
    let value = count.read(cur)?;
    value
        .as_uint()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| {
            ChunkError::InvalidFormat(format!("invalid list count {:?}", value))
        })
}
