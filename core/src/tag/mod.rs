//! tag/mod.rs
//! Authoritative 1024-byte tag image format.
//!
//! - Fixed offsets, little-endian integers, NUL-padded UTF-8 strings.
//! - Clear-text magic, XOR stream keyed per tag UID, CRC32 over the
//!   decrypted first 512 bytes.
//! - Must stay byte-exact: physical tags written by other software depend
//!   on it.

pub mod types;
pub mod encode;
pub mod decode;
pub mod codec;

pub use types::*;
pub use encode::*;
pub use decode::*;
pub use codec::*;
