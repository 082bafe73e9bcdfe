//! constants.rs
//! Wire constants for the 1024-byte spool tag image and the forgiving
//! payload path.
//!
//! All multi-byte integers on the tag are little-endian. Offsets are absolute
//! positions inside the image, not relative to a section.

/// Magic marker stored in the clear at offset 0.
pub const TAG_MAGIC: [u8; 4] = [0xAA, 0x55, 0xCC, 0x33];

/// Format version written by the encoder unless configured otherwise.
pub const TAG_VERSION_V1: u8 = 1;

/// Full tag image size in bytes.
pub const TAG_IMAGE_LEN: usize = 1024;

/// Checksum covers `[0..CHECKSUM_OFFSET)` of the decrypted image.
pub const CHECKSUM_OFFSET: usize = 512;
pub const CHECKSUM_LEN: usize = 4;

/// Shortest buffer that still carries the protected region and its checksum.
pub const MIN_TAG_IMAGE_LEN: usize = CHECKSUM_OFFSET + CHECKSUM_LEN;

/// XOR stream starts right after the clear-text magic.
pub const CIPHER_OFFSET: usize = 4;

/// Fixed field offsets (see `tag::encode` / `tag::decode`).
pub mod offsets {
    pub const VERSION: usize = 4;
    pub const FLAGS: usize = 5;
    pub const MATERIAL: usize = 128;
    pub const COLOR: usize = 130;
    pub const DIAMETER: usize = 133;
    pub const NOZZLE_TEMP: usize = 137;
    pub const BED_TEMP: usize = 139;
    pub const DENSITY: usize = 141;
    pub const REMAINING_LENGTH: usize = 145;
    pub const REMAINING_WEIGHT: usize = 149;
    pub const MANUFACTURER: usize = 153;
    pub const NAME: usize = 185;
    pub const SERIAL: usize = 256;
    pub const MFG_DATE: usize = 288;
}

/// On-tag byte budget of every string field (31 bytes + NUL).
pub const TAG_STRING_LEN: usize = 32;

/// Derived key length in bytes.
pub const KEY_LEN_16: usize = 16;

/// MIFARE Classic 1K layout: 16 sectors, one 6-byte key each.
pub const SECTOR_COUNT: usize = 16;
pub const SECTOR_KEY_LEN: usize = 6;

/// Fixed master secret for tag key derivation.
pub const DEFAULT_MASTER_SECRET: [u8; 16] = [
    0x9a, 0x75, 0x9c, 0xf2, 0xc4, 0xf7, 0xca, 0xff,
    0x22, 0x2c, 0xb9, 0x76, 0x9b, 0x41, 0xbc, 0x96,
];

/// HKDF domain-separation context.
pub const KDF_CONTEXT: &[u8] = b"RFID-A\0";

/// KDF strategy identifiers (mirrored in `crypto::KdfId`).
pub mod kdf_ids {
    pub const HKDF_SHA256: u8 = 0x01;
    pub const HMAC_CHAIN: u8 = 0x02;
}

/// Environment variables read by `CodecConfig::from_env`.
pub mod env {
    pub const KDF: &str = "SPOOL_TAG_KDF";
    pub const MASTER_SECRET: &str = "SPOOL_TAG_MASTER_SECRET";
    pub const DEFAULT_KEY: &str = "SPOOL_TAG_DEFAULT_KEY";
}

/// Best-effort binary payload layout (not a tag image, not checksummed).
pub mod loose {
    /// "BLMF" read as a little-endian u32.
    pub const MAGIC: u32 = 0x424C_4D46;
    pub const MIN_LEN: usize = 10;
    pub const TEMPS: usize = 4;
    pub const FLOATS: usize = 8;
    pub const STRINGS: usize = 16;
}

/// Byte limits applied by the forgiving decoder.
pub mod limits {
    pub const NAME: usize = 64;
    pub const MATERIAL: usize = 16;
    pub const COLOR: usize = 7;
    pub const MANUFACTURER: usize = 32;
    pub const SERIAL: usize = 32;
}

/// Defaults substituted by the forgiving decoder.
pub mod defaults {
    pub const NAME: &str = "Unknown Filament";
    pub const MANUFACTURER: &str = "Unknown";
    pub const COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];
    pub const DENSITY: f32 = 1.24;
    pub const DIAMETER: f32 = 1.75;
    pub const NOZZLE_TEMP: u16 = 200;
    pub const BED_TEMP: u16 = 60;
    pub const REMAINING_LENGTH: f32 = 0.0;
    pub const REMAINING_WEIGHT: f32 = 0.0;
    pub const SERIAL: &str = "";
    pub const MFG_DATE: u32 = 0;
}
