//! Localized text-table parsing.
//!
//! # File Structure
//! ```text
//! [40 bytes] header: magic "GMD\0", u32 version, u32 language, 2 × u32
//!            unknown, u32 key count, u32 string count, u32 key-block size,
//!            u32 string-block size, u32 name size
//! [name size + 1 bytes] table name, null-terminated
//! [key count × 32 bytes] correlation records (string index at +0,
//!            key byte-offset at +24; the rest is hash material)
//! [2048 bytes] hash-bucket region, skipped by byte count
//! [key-block size bytes] null-terminated keys, addressed by byte offset
//! [string-block size bytes] null-terminated strings, in index order
//! ```
//!
//! Not every string has a key: `key_count <= string_count`, and the explicit
//! correlation records are walked in order while every uncovered string index
//! gets a synthetic keyless entry. Any block-size or content mismatch rejects
//! the file; the format has no recovery path.

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::chunk::layout::Cursor;
use crate::chunk::types::error::{ChunkError, Result};

/// `"GMD\0"` little-endian.
pub const GMD_MAGIC: u32 = 0x0044_4D47;

const CORRELATION_SIZE: usize = 32;
const KEY_OFFSET_POS: usize = 24;
// Internal layout assumed constant but unverified; only the byte count is
// relied on.
const BUCKET_REGION_SIZE: usize = 2048;

/// Parsed fixed header of a text-table file.
#[derive(Debug)]
pub struct GmdHeader {
    pub version: u32,
    pub language: u32,
    pub key_count: u32,
    pub string_count: u32,
    pub key_block_size: u32,
    pub string_block_size: u32,
    pub name: String,
}

/// One localized string with its index and optional lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmdEntry {
    pub index: u32,
    /// `None` for entries synthesized into correlation gaps.
    pub key: Option<String>,
    /// Raw text; normalization happens at merge time when the language is
    /// known.
    pub text: String,
}

/// A fully parsed single-language text table.
#[derive(Debug)]
pub struct Gmd {
    pub header: GmdHeader,
    pub entries: Vec<GmdEntry>,
}

impl Gmd {
    /// Parse one text-table file from its full byte buffer.
    pub fn parse(buf: &[u8]) -> Result<Gmd> {
        parse(buf)
    }
}

/// Parse one text-table file from its full byte buffer.
pub fn parse(buf: &[u8]) -> Result<Gmd> {
    let mut cur = Cursor::new(buf);

    let magic = cur.read_u32()?;
    if magic != GMD_MAGIC {
        return Err(ChunkError::InvalidFormat(format!(
            "bad text-table magic: expected {:#010x}, found {:#010x}",
            GMD_MAGIC, magic
        )));
    }
    let version = cur.read_u32()?;
    let language = cur.read_u32()?;
    cur.skip(8)?; // two unknown words
    let key_count = cur.read_u32()?;
    let string_count = cur.read_u32()?;
    let key_block_size = cur.read_u32()?;
    let string_block_size = cur.read_u32()?;
    let name_size = cur.read_u32()? as usize;

    if key_count > string_count {
        return Err(ChunkError::InvalidFormat(format!(
            "text table declares {} keys for {} strings",
            key_count, string_count
        )));
    }

    let name_bytes = cur.take(name_size + 1)?;
    if name_bytes.last() != Some(&0) {
        return Err(ChunkError::InvalidFormat(
            "table name is not null-terminated".to_string(),
        ));
    }
    let name = decode_utf8(&name_bytes[..name_size], "table name")?;
    debug!(
        "text table '{}': version={:#x}, language={}, {} keys, {} strings",
        name, version, language, key_count, string_count
    );

    // Explicit correlation records, strictly ordered by string index.
    let mut explicit: Vec<(u32, u32)> = Vec::with_capacity(key_count as usize);
    for _ in 0..key_count {
        let record = cur.take(CORRELATION_SIZE)?;
        let index = LittleEndian::read_u32(&record[0..4]);
        let key_offset = LittleEndian::read_u32(&record[KEY_OFFSET_POS..KEY_OFFSET_POS + 4]);
        if index >= string_count {
            return Err(ChunkError::InvalidFormat(format!(
                "correlation record points at string {} of {}",
                index, string_count
            )));
        }
        if let Some((prev, _)) = explicit.last() {
            if index <= *prev {
                return Err(ChunkError::InvalidFormat(format!(
                    "correlation records out of order: {} after {}",
                    index, prev
                )));
            }
        }
        explicit.push((index, key_offset));
    }

    cur.skip(BUCKET_REGION_SIZE)?;

    let key_block = cur.take(key_block_size as usize)?;
    let string_block = cur.take(string_block_size as usize)?;
    if cur.remaining() != 0 {
        return Err(ChunkError::SizeMismatch {
            context: "text table",
            expected: cur.position() as u64,
            found: buf.len() as u64,
        });
    }

    let strings = split_string_block(string_block, string_count)?;

    // Walk explicit records and fill every gap with a keyless entry so the
    // index map is total over 0..string_count.
    let mut entries = Vec::with_capacity(string_count as usize);
    let mut next_explicit = explicit.iter().peekable();
    for (index, text) in strings.into_iter().enumerate() {
        let index = index as u32;
        let key = match next_explicit.peek() {
            Some((explicit_index, key_offset)) if *explicit_index == index => {
                next_explicit.next();
                Some(read_key(key_block, *key_offset)?)
            }
            _ => {
                trace!("string {} has no key; synthesizing keyless entry", index);
                None
            }
        };
        entries.push(GmdEntry { index, key, text });
    }

    Ok(Gmd {
        header: GmdHeader {
            version,
            language,
            key_count,
            string_count,
            key_block_size,
            string_block_size,
            name,
        },
        entries,
    })
}

/// Splits the string block into exactly `count` null-terminated strings, in
/// index order, consuming the block completely.
fn split_string_block(block: &[u8], count: u32) -> Result<Vec<String>> {
    let mut strings = Vec::with_capacity(count as usize);
    let mut rest = block;
    while !rest.is_empty() {
        let end = rest.iter().position(|&b| b == 0).ok_or_else(|| {
            ChunkError::InvalidFormat("string block ends without a null terminator".to_string())
        })?;
        strings.push(decode_utf8(&rest[..end], "string block")?);
        rest = &rest[end + 1..];
    }
    if strings.len() as u64 != count as u64 {
        return Err(ChunkError::CountMismatch {
            item_type: "strings in string block",
            expected: count as u64,
            found: strings.len() as u64,
        });
    }
    Ok(strings)
}

/// Reads one null-terminated key at a byte offset into the key block.
fn read_key(block: &[u8], offset: u32) -> Result<String> {
    let offset = offset as usize;
    if offset >= block.len() {
        return Err(ChunkError::InvalidFormat(format!(
            "key offset {} outside {}-byte key block",
            offset,
            block.len()
        )));
    }
    let rest = &block[offset..];
    let end = rest.iter().position(|&b| b == 0).ok_or_else(|| {
        ChunkError::InvalidFormat(format!("key at offset {} is not null-terminated", offset))
    })?;
    decode_utf8(&rest[..end], "key block")
}

fn decode_utf8(bytes: &[u8], context: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ChunkError::InvalidFormat(format!("invalid UTF-8 in {}: {}", context, e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a synthetic single-language table. `entries` pairs an optional
    /// key with its string, in index order.
    pub(crate) fn build_table(name: &str, entries: &[(Option<&str>, &str)]) -> Vec<u8> {
        let mut key_block = Vec::new();
        let mut string_block = Vec::new();
        let mut correlations = Vec::new();
        for (index, (key, text)) in entries.iter().enumerate() {
            if let Some(key) = key {
                let mut record = [0u8; CORRELATION_SIZE];
                record[0..4].copy_from_slice(&(index as u32).to_le_bytes());
                record[KEY_OFFSET_POS..KEY_OFFSET_POS + 4]
                    .copy_from_slice(&(key_block.len() as u32).to_le_bytes());
                correlations.extend_from_slice(&record);
                key_block.extend_from_slice(key.as_bytes());
                key_block.push(0);
            }
            string_block.extend_from_slice(text.as_bytes());
            string_block.push(0);
        }
        let key_count = entries.iter().filter(|(k, _)| k.is_some()).count() as u32;

        let mut buf = Vec::new();
        buf.extend_from_slice(&GMD_MAGIC.to_le_bytes());
        buf.extend_from_slice(&0x0001_0302u32.to_le_bytes()); // version
        buf.extend_from_slice(&1u32.to_le_bytes()); // language
        buf.extend_from_slice(&[0; 8]); // unknown words
        buf.extend_from_slice(&key_count.to_le_bytes());
        buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        buf.extend_from_slice(&(key_block.len() as u32).to_le_bytes());
        buf.extend_from_slice(&(string_block.len() as u32).to_le_bytes());
        buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
        buf.extend_from_slice(name.as_bytes());
        buf.push(0);
        buf.extend_from_slice(&correlations);
        buf.extend_from_slice(&[0u8; BUCKET_REGION_SIZE]);
        buf.extend_from_slice(&key_block);
        buf.extend_from_slice(&string_block);
        buf
    }

    #[test]
    fn parses_keys_and_strings() {
        let buf = build_table(
            "probe",
            &[
                (Some("ITEM_000"), "Potion"),
                (Some("ITEM_001"), "Mega Potion"),
            ],
        );
        let gmd = parse(&buf).unwrap();
        assert_eq!(gmd.header.name, "probe");
        assert_eq!(gmd.header.key_count, 2);
        assert_eq!(gmd.header.string_count, 2);
        assert_eq!(gmd.entries[0].key.as_deref(), Some("ITEM_000"));
        assert_eq!(gmd.entries[0].text, "Potion");
        assert_eq!(gmd.entries[1].key.as_deref(), Some("ITEM_001"));
        assert_eq!(gmd.entries[1].text, "Mega Potion");
    }

    #[test]
    fn gap_between_explicit_indices_is_filled_keyless() {
        // explicit records at indices 0 and 2; index 1 has no key
        let buf = build_table(
            "probe",
            &[(Some("A"), "first"), (None, "middle"), (Some("C"), "third")],
        );
        let gmd = parse(&buf).unwrap();
        assert_eq!(gmd.header.key_count, 2);
        assert_eq!(gmd.header.string_count, 3);
        assert_eq!(gmd.entries[1].index, 1);
        assert_eq!(gmd.entries[1].key, None);
        assert_eq!(gmd.entries[1].text, "middle");
    }

    #[test]
    fn trailing_and_leading_gaps_are_filled_too() {
        let buf = build_table(
            "probe",
            &[(None, "lead"), (Some("K"), "mid"), (None, "tail")],
        );
        let gmd = parse(&buf).unwrap();
        assert_eq!(gmd.entries.len(), 3);
        assert_eq!(gmd.entries[0].key, None);
        assert_eq!(gmd.entries[1].key.as_deref(), Some("K"));
        assert_eq!(gmd.entries[2].key, None);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut buf = build_table("probe", &[(None, "x")]);
        buf[0] = b'X';
        assert!(matches!(
            parse(&buf),
            Err(ChunkError::InvalidFormat(_))
        ));
    }

    #[test]
    fn string_count_mismatch_is_fatal() {
        let mut buf = build_table("probe", &[(None, "one"), (None, "two")]);
        // lower the declared string count without touching the block
        let count_pos = 24;
        buf[count_pos..count_pos + 4].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            parse(&buf),
            Err(ChunkError::CountMismatch { .. })
        ));
    }

    #[test]
    fn trailing_bytes_after_string_block_are_fatal() {
        let mut buf = build_table("probe", &[(None, "one")]);
        buf.push(0);
        assert!(matches!(parse(&buf), Err(ChunkError::SizeMismatch { .. })));
    }
}
