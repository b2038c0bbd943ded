//! Cipher transform for the encrypted record containers.
//!
//! The encrypted file families store their Blowfish input byte-swapped in
//! 4-byte units, so decryption is a sandwich:
//!
//! ```text
//! plain = reverse4(blowfish_ecb_decrypt(reverse4(bytes), family_key))
//! ```
//!
//! Both reversal passes are required. Each file family carries its own fixed
//! key; the keys are never shared across families, and a decrypt with the
//! wrong family key surfaces as a validation failure on the plaintext.

use blowfish::Blowfish;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, block_padding::NoPadding};
use log::trace;

use crate::chunk::types::error::{ChunkError, Result};

type BlowfishEcbDec = ecb::Decryptor<Blowfish>;
type BlowfishEcbEnc = ecb::Encryptor<Blowfish>;

/// Blowfish block size; encrypted buffers must be a multiple of this.
pub const CIPHER_BLOCK_SIZE: usize = 8;

const QUEST_KEY: &[u8] = b"fWc9SyAhRNa6wtCl";
const HITZONE_KEY: &[u8] = b"pM2hQx6nVgKuJdR8";
const STATUS_KEY: &[u8] = b"eZ3tBvLqWy7kSmD4";
const MUSIC_KEY: &[u8] = b"aG8fXrN2cHj5PwTb";
const LOOT_KEY: &[u8] = b"oU4dKzE9mQs6YhVn";

/// The encrypted file families, each bound 1:1 to a fixed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFamily {
    Quest,
    Hitzone,
    Status,
    Music,
    Loot,
}

impl FileFamily {
    pub fn key(self) -> &'static [u8] {
        match self {
            FileFamily::Quest => QUEST_KEY,
            FileFamily::Hitzone => HITZONE_KEY,
            FileFamily::Status => STATUS_KEY,
            FileFamily::Music => MUSIC_KEY,
            FileFamily::Loot => LOOT_KEY,
        }
    }
}

/// Decrypts a whole file buffer with the family's key.
pub fn decrypt(data: &[u8], family: FileFamily) -> Result<Vec<u8>> {
    check_alignment(data.len())?;
    trace!("decrypting {} bytes ({:?} family)", data.len(), family);

    let mut buf = data.to_vec();
    reverse4(&mut buf);
    let cipher = new_decryptor(family)?;
    cipher
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| ChunkError::Cipher(format!("Blowfish decryption failed: {:?}", e)))?;
    reverse4(&mut buf);
    Ok(buf)
}

/// Encrypts a buffer with the family's key; the exact inverse of
/// [`decrypt`]. Kept for verifying the construction round-trips, not as a
/// write-back path.
pub fn encrypt(data: &[u8], family: FileFamily) -> Result<Vec<u8>> {
    check_alignment(data.len())?;
    trace!("encrypting {} bytes ({:?} family)", data.len(), family);

    let mut buf = data.to_vec();
    reverse4(&mut buf);
    let cipher = new_encryptor(family)?;
    let len = buf.len();
    cipher
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .map_err(|e| ChunkError::Cipher(format!("Blowfish encryption failed: {:?}", e)))?;
    reverse4(&mut buf);
    Ok(buf)
}

fn new_decryptor(family: FileFamily) -> Result<BlowfishEcbDec> {
    BlowfishEcbDec::new_from_slice(family.key())
        .map_err(|e| ChunkError::Cipher(format!("invalid {:?} family key: {}", family, e)))
}

fn new_encryptor(family: FileFamily) -> Result<BlowfishEcbEnc> {
    BlowfishEcbEnc::new_from_slice(family.key())
        .map_err(|e| ChunkError::Cipher(format!("invalid {:?} family key: {}", family, e)))
}

fn check_alignment(len: usize) -> Result<()> {
    if !len.is_multiple_of(CIPHER_BLOCK_SIZE) {
        return Err(ChunkError::Cipher(format!(
            "buffer length {} is not a multiple of the {}-byte cipher block",
            len, CIPHER_BLOCK_SIZE
        )));
    }
    Ok(())
}

/// Reverses byte order within each 4-byte block across the buffer.
fn reverse4(buf: &mut [u8]) {
    for chunk in buf.chunks_exact_mut(4) {
        chunk.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILIES: [FileFamily; 5] = [
        FileFamily::Quest,
        FileFamily::Hitzone,
        FileFamily::Status,
        FileFamily::Music,
        FileFamily::Loot,
    ];

    #[test]
    fn round_trip_is_identity_for_every_family() {
        let plaintext: Vec<u8> = (0u8..64).collect();
        for family in FAMILIES {
            let encrypted = encrypt(&plaintext, family).unwrap();
            assert_ne!(encrypted, plaintext);
            let decrypted = decrypt(&encrypted, family).unwrap();
            assert_eq!(decrypted, plaintext, "round trip failed for {:?}", family);
        }
    }

    #[test]
    fn families_never_share_key_material() {
        for (i, a) in FAMILIES.iter().enumerate() {
            for b in &FAMILIES[i + 1..] {
                assert_ne!(a.key(), b.key(), "{:?} and {:?} share a key", a, b);
            }
        }
    }

    #[test]
    fn wrong_family_does_not_round_trip() {
        let plaintext = [0x5Au8; 32];
        let encrypted = encrypt(&plaintext, FileFamily::Quest).unwrap();
        let decrypted = decrypt(&encrypted, FileFamily::Music).unwrap();
        assert_ne!(decrypted, plaintext);
    }

    #[test]
    fn misaligned_buffer_is_rejected_without_reading() {
        let short = [0u8; 12];
        assert!(matches!(
            decrypt(&short, FileFamily::Quest),
            Err(ChunkError::Cipher(_))
        ));
        assert!(matches!(
            encrypt(&short, FileFamily::Quest),
            Err(ChunkError::Cipher(_))
        ));
    }

    #[test]
    fn reverse4_swaps_within_each_block() {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8];
        reverse4(&mut buf);
        assert_eq!(buf, [4, 3, 2, 1, 8, 7, 6, 5]);
        reverse4(&mut buf);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
