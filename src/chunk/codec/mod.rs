//! Pure data transformations applied before format parsing.

pub mod crypto;

pub use crypto::{CIPHER_BLOCK_SIZE, FileFamily, decrypt, encrypt};
