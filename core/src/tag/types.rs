// ## 📂 File: `src/tag/types.rs`

//! tag/types.rs
//! Tag image container and decoded view.
//!
//! Layout (little-endian, absolute offsets):
//!
//! | Offset | Size | Field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | magic `AA 55 CC 33` (clear)   |
//! | 4      | 1    | format version                |
//! | 5      | 3    | flags                         |
//! | 128    | 2    | material code                 |
//! | 130    | 3    | color RGB                     |
//! | 133    | 4    | diameter f32                  |
//! | 137    | 2    | nozzle temp u16               |
//! | 139    | 2    | bed temp u16                  |
//! | 141    | 4    | density f32                   |
//! | 145    | 4    | remaining length f32          |
//! | 149    | 4    | remaining weight f32          |
//! | 153    | 32   | manufacturer (NUL-padded)     |
//! | 185    | 32   | name (NUL-padded)             |
//! | 256    | 32   | serial (NUL-padded)           |
//! | 288    | 4    | manufacturing date u32        |
//! | 512    | 4    | CRC32 over `[0..512)`         |
//!
//! Bytes `4..` are XOR-encrypted with the per-tag key.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::constants::{TAG_IMAGE_LEN, TAG_VERSION_V1};
use crate::record::{FieldIssue, SpoolRecord};
use crate::types::DecodeError;

/// Encrypted 1024-byte image, ready to be written to a tag.
#[derive(Clone, PartialEq, Eq)]
pub struct TagImage(pub [u8; TAG_IMAGE_LEN]);

impl TagImage {
    pub const LEN: usize = TAG_IMAGE_LEN;

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Parse a base64 image. Short input is rejected, trailing bytes dropped.
    pub fn from_base64(encoded: &str) -> Result<Self, DecodeError> {
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|e| DecodeError::MalformedString(format!("invalid base64: {}", e)))?;
        Self::try_from(raw.as_slice())
    }
}

impl AsRef<[u8]> for TagImage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for TagImage {
    type Error = DecodeError;

    fn try_from(raw: &[u8]) -> Result<Self, Self::Error> {
        if raw.len() < TAG_IMAGE_LEN {
            return Err(DecodeError::TooShort { have: raw.len(), need: TAG_IMAGE_LEN });
        }
        let mut buf = [0u8; TAG_IMAGE_LEN];
        buf.copy_from_slice(&raw[..TAG_IMAGE_LEN]);
        Ok(TagImage(buf))
    }
}

impl std::fmt::Debug for TagImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TagImage({}..)", hex::encode(&self.0[..8]))
    }
}

/// Clear-text header bytes written next to the magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub version: u8,
    pub flags: [u8; 3],
}

impl Default for TagHeader {
    fn default() -> Self {
        Self { version: TAG_VERSION_V1, flags: [0u8; 3] }
    }
}

impl TagHeader {
    pub fn flags_hex(&self) -> String {
        hex::encode(self.flags)
    }
}

/// Full result of a verified tag decode.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTag {
    pub header: TagHeader,
    pub record: SpoolRecord,
    /// Fields pulled back into range after a checksum-valid read.
    pub issues: Vec<FieldIssue>,
}
