//! Custom error types for the chunk-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A schema declaration whose field sizes do not add up to its declared
    /// total. Raised at definition time, before any file is touched.
    #[error("schema '{schema}' declares {declared} bytes but its fields total {computed}")]
    SchemaDefinition {
        schema: &'static str,
        declared: usize,
        computed: usize,
    },

    /// The file is structurally invalid: bad magic, malformed block, or a
    /// declaration the format does not allow.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A buffer or region has a different size than its header declares.
    #[error("size mismatch for {context}: expected {expected} bytes, but found {found} bytes")]
    SizeMismatch {
        context: &'static str,
        expected: u64,
        found: u64,
    },

    /// A declared count of items does not match the actual number found.
    #[error("count mismatch for {item_type}: expected {expected}, but found {found}")]
    CountMismatch {
        item_type: &'static str,
        expected: u64,
        found: u64,
    },

    /// A read ran past the end of the buffer.
    #[error("unexpected end of data: needed {needed} more bytes, only {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// An inner read failure, rewrapped with the containing struct and field
    /// so a misread against the undocumented format can be located.
    #[error("while reading {structure}.{field}: {source}")]
    FieldRead {
        structure: &'static str,
        field: String,
        #[source]
        source: Box<ChunkError>,
    },

    /// A list element failed to decode; carries the failing index.
    #[error("at element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ChunkError>,
    },

    /// A strict mapped field saw a key outside its map.
    #[error("unmapped value {raw}; valid keys: {valid}")]
    UnmappedValue { raw: i64, valid: String },

    /// Misaligned cipher input, or decrypted content that failed subsequent
    /// validation (treated as a wrong key for the file family).
    #[error("cipher error: {0}")]
    Cipher(String),
}

/// A convenience `Result` type alias using the crate's `ChunkError` type.
pub type Result<T> = std::result::Result<T, ChunkError>;
