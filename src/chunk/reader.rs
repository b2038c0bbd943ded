//! File-level entry points.
//!
//! Everything below reads a whole file into memory first; the containers are
//! small (tens of kilobytes) and the encrypted families have to be
//! transformed in full before any field can be trusted anyway.

use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};

use super::codec::{self, CIPHER_BLOCK_SIZE, FileFamily};
use super::format::{Gmd, StructFile, TextTable};
use super::layout::{Cursor, Record, Schema};
use super::types::error::{ChunkError, Result};
use super::types::models::{LANGUAGE_SUFFIXES, Language};

/// Reads and decodes a plain counted container.
pub fn read_struct_file(
    path: impl AsRef<Path>,
    magic: u16,
    schema: &Schema,
) -> Result<Vec<Record>> {
    let path = path.as_ref();
    info!("Reading struct file: {}", path.display());
    let buf = std::fs::read(path)?;
    let file = StructFile::parse(&buf, magic, schema)?;
    debug!("{}: {} '{}' entries", path.display(), file.len(), schema.name());
    file.decode_all()
}

/// Reads an encrypted counted container: decrypt first, then parse the
/// plaintext as a normal struct file.
pub fn read_encrypted_struct_file(
    path: impl AsRef<Path>,
    family: FileFamily,
    magic: u16,
    schema: &Schema,
) -> Result<Vec<Record>> {
    let path = path.as_ref();
    info!("Reading encrypted struct file: {} ({:?} family)", path.display(), family);
    let raw = std::fs::read(path)?;
    let buf = codec::decrypt(&raw, family)?;
    let file = StructFile::parse(&buf, magic, schema)?;
    debug!("{}: {} '{}' entries", path.display(), file.len(), schema.name());
    file.decode_all()
}

/// Reads an encrypted record stream with no count header: records are
/// decoded back to back until only cipher alignment padding remains.
///
/// The quest and reward families use this shape because their records are
/// content-dependent in size.
pub fn read_encrypted_records(
    path: impl AsRef<Path>,
    family: FileFamily,
    schema: &Schema,
) -> Result<Vec<Record>> {
    let path = path.as_ref();
    info!("Reading encrypted record stream: {} ({:?} family)", path.display(), family);
    let raw = std::fs::read(path)?;
    let buf = codec::decrypt(&raw, family)?;

    let mut cursor = Cursor::new(&buf);
    let mut records = Vec::new();
    // The file is padded up to the cipher block, so anything shorter than a
    // block at the tail is slack, not a truncated record.
    while cursor.remaining() >= CIPHER_BLOCK_SIZE {
        records.push(schema.decode(&mut cursor).map_err(|source| {
            ChunkError::Element {
                index: records.len(),
                source: Box::new(source),
            }
        })?);
    }
    debug!("{}: {} '{}' records", path.display(), records.len(), schema.name());
    Ok(records)
}

/// Reads and parses one text-table file.
pub fn read_gmd(path: impl AsRef<Path>) -> Result<Gmd> {
    let path = path.as_ref();
    info!("Reading text table: {}", path.display());
    let buf = std::fs::read(path)?;
    Gmd::parse(&buf)
}

/// Reads every per-language sibling of a logical text table and merges them.
///
/// Looks for `<basename>_<suffix>.gmd` under `dir` for each known language
/// suffix; missing languages are skipped. Fails only when no language file
/// exists at all.
pub fn read_text_tables(dir: impl AsRef<Path>, basename: &str) -> Result<TextTable> {
    let dir = dir.as_ref();
    let mut tables: Vec<(Language, Gmd)> = Vec::new();
    for (suffix, language) in LANGUAGE_SUFFIXES {
        let path = dir.join(format!("{}_{}.gmd", basename, suffix));
        let buf = match std::fs::read(&path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };
        info!("Reading text table: {}", path.display());
        tables.push((language, Gmd::parse(&buf)?));
    }
    if tables.is_empty() {
        return Err(ChunkError::InvalidFormat(format!(
            "no language files for text table '{}' in {}",
            basename,
            dir.display()
        )));
    }
    debug!("merged {} language(s) for '{}'", tables.len(), basename);
    Ok(TextTable::merge(tables))
}
