// ## 📂 File: `src/tag/decode.rs`
//! src/tag/decode.rs
//!
//! Tag image decoding.
//!
//! Design notes:
//! - Each gate aborts the decode: length, clear-text magic, checksum.
//! - Field order mirrors `encode.rs`.
//! - Unknown material codes are carried as `MaterialType::Unknown`, not errors.
//! - Strings end at the first NUL inside their 32-byte slot.
//! - Out-of-range numbers are replaced by field defaults and reported.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{offsets, CHECKSUM_OFFSET, CIPHER_OFFSET, MIN_TAG_IMAGE_LEN, TAG_MAGIC, TAG_STRING_LEN};
use crate::crypto::{xor_stream_in_place, TagKey};
use crate::record::{ManufacturingInfo, MaterialType, Rgb, SpoolRecord};
use crate::tag::types::{DecodedTag, TagHeader};
use crate::types::DecodeError;
use crate::utils::{compute_crc32, read_cstr};

/// Length and clear-text magic gates, checked before any key is touched.
pub fn check_framing(image: &[u8]) -> Result<(), DecodeError> {
    if image.len() < MIN_TAG_IMAGE_LEN {
        return Err(DecodeError::TooShort { have: image.len(), need: MIN_TAG_IMAGE_LEN });
    }
    let mut have = [0u8; 4];
    have.copy_from_slice(&image[..4]);
    if have != TAG_MAGIC {
        return Err(DecodeError::HeaderInvalid { have });
    }
    Ok(())
}

/// True when `image` passes the framing gates. Says nothing about the key.
pub fn looks_like_tag_image(image: &[u8]) -> bool {
    check_framing(image).is_ok()
}

/// True when `raw` must be judged by the tag codec rather than the
/// forgiving path: it carries the tag magic (at any length), or it is
/// long enough to be a tag image with a damaged magic.
pub fn claims_tag_image(raw: &[u8]) -> bool {
    raw.starts_with(&TAG_MAGIC) || raw.len() >= CHECKSUM_OFFSET
}

/// Decrypt, verify and parse `image` with an already-selected key.
pub fn decode_image(image: &[u8], key: &TagKey) -> Result<DecodedTag, DecodeError> {
    check_framing(image)?;

    let mut buf = image.to_vec();
    xor_stream_in_place(&mut buf, CIPHER_OFFSET, key);

    let stored = LittleEndian::read_u32(&buf[CHECKSUM_OFFSET..]);
    let computed = compute_crc32(&buf[..CHECKSUM_OFFSET]);
    if stored != computed {
        return Err(DecodeError::ChecksumMismatch { stored, computed });
    }

    Ok(parse_plain(&buf))
}

/// Field extraction from a decrypted, verified buffer.
fn parse_plain(buf: &[u8]) -> DecodedTag {
    let mut flags = [0u8; 3];
    flags.copy_from_slice(&buf[offsets::FLAGS..offsets::FLAGS + 3]);
    let header = TagHeader { version: buf[offsets::VERSION], flags };

    let mut color = [0u8; 3];
    color.copy_from_slice(&buf[offsets::COLOR..offsets::COLOR + 3]);

    let mut record = SpoolRecord {
        material_type: MaterialType::from_code(LittleEndian::read_u16(&buf[offsets::MATERIAL..])),
        color: Rgb(color),
        diameter: LittleEndian::read_f32(&buf[offsets::DIAMETER..]),
        nozzle_temp: LittleEndian::read_u16(&buf[offsets::NOZZLE_TEMP..]),
        bed_temp: LittleEndian::read_u16(&buf[offsets::BED_TEMP..]),
        density: LittleEndian::read_f32(&buf[offsets::DENSITY..]),
        remaining_length: LittleEndian::read_f32(&buf[offsets::REMAINING_LENGTH..]),
        remaining_weight: LittleEndian::read_f32(&buf[offsets::REMAINING_WEIGHT..]),
        manufacturer: read_cstr(buf, offsets::MANUFACTURER, TAG_STRING_LEN),
        name: read_cstr(buf, offsets::NAME, TAG_STRING_LEN),
        manufacturing_info: ManufacturingInfo {
            serial: read_cstr(buf, offsets::SERIAL, TAG_STRING_LEN),
            date: LittleEndian::read_u32(&buf[offsets::MFG_DATE..]),
        },
    };

    // A valid checksum proves integrity, not sane values.
    let issues = record.enforce_ranges();

    DecodedTag { header, record, issues }
}
