//! Bounds-checked sequential reads over an in-memory buffer.
//!
//! Every decode in this crate runs over one fully-read buffer; the cursor
//! never reads out of bounds and reports exactly how much was missing.

use crate::chunk::types::error::{ChunkError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// A read position over a borrowed byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// A cursor starting at `pos` within `buf`.
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos: pos.min(buf.len()) }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Takes the next `n` bytes and advances past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(ChunkError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Advances past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_in_order() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut cur = Cursor::new(&buf);
        assert_eq!(cur.read_u8().unwrap(), 0x01);
        assert_eq!(cur.read_u16().unwrap(), 0x0302);
        assert_eq!(cur.read_u32().unwrap(), 0x07060504);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn take_past_end_reports_shortfall() {
        let buf = [0u8; 3];
        let mut cur = Cursor::new(&buf);
        cur.skip(2).unwrap();
        match cur.take(4) {
            Err(ChunkError::UnexpectedEof { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 1);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }
}
