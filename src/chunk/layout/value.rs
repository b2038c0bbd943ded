//! Decoded values and records.

use crate::chunk::types::error::{ChunkError, Result};

/// A single decoded field value.
///
/// Scalars keep their sign class (`UInt`/`Int`), mapped enumerations decode
/// to their `Label`, and composite codecs produce `List`/`Struct`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt(u64),
    Int(i64),
    Float(f32),
    Label(&'static str),
    List(Vec<Value>),
    Struct(Record),
}

impl Value {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            Value::Int(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&'static str> {
        match self {
            Value::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Record> {
        match self {
            Value::Struct(rec) => Some(rec),
            _ => None,
        }
    }
}

/// One decoded struct instance: the schema name plus its field values in
/// declaration order. Immutable after decode; derived quantities (display
/// rarity and friends) are computed by accessors, never stored back.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub(crate) fn new(schema: &'static str, fields: Vec<(&'static str, Value)>) -> Self {
        Self { schema, fields }
    }

    /// Name of the schema this record was decoded with.
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Like [`get`](Self::get) but fails with the schema and field name.
    pub fn require(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| {
            ChunkError::InvalidFormat(format!("record '{}' has no field '{}'", self.schema, name))
        })
    }

    pub fn uint(&self, name: &str) -> Result<u64> {
        self.require(name)?.as_uint().ok_or_else(|| {
            ChunkError::InvalidFormat(format!(
                "field '{}.{}' is not an unsigned integer",
                self.schema, name
            ))
        })
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        self.require(name)?.as_int().ok_or_else(|| {
            ChunkError::InvalidFormat(format!("field '{}.{}' is not an integer", self.schema, name))
        })
    }

    pub fn list(&self, name: &str) -> Result<&[Value]> {
        self.require(name)?.as_list().ok_or_else(|| {
            ChunkError::InvalidFormat(format!("field '{}.{}' is not a list", self.schema, name))
        })
    }

    /// Field names and values in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}
