// ## 📂 File: `src/tag/encode.rs`
//! src/tag/encode.rs
//!
//! Tag image encoding.
//!
//! Design notes:
//! - Fields are written at fixed offsets; order mirrors `decode.rs`.
//! - The checksum is computed over the plaintext, then everything after the
//!   magic is XOR-encrypted, checksum included.
//! - No range validation here. Callers that hold untrusted values go through
//!   the payload normalizer first.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{offsets, CHECKSUM_OFFSET, CIPHER_OFFSET, TAG_IMAGE_LEN, TAG_MAGIC, TAG_STRING_LEN};
use crate::crypto::{xor_stream_in_place, TagKey};
use crate::record::SpoolRecord;
use crate::tag::types::{TagHeader, TagImage};
use crate::utils::{compute_crc32, write_cstr};

/// Lay out `record` in a fresh plaintext image, checksum included.
pub fn encode_plain(record: &SpoolRecord, header: TagHeader) -> [u8; TAG_IMAGE_LEN] {
    let mut out = [0u8; TAG_IMAGE_LEN];

    out[0..4].copy_from_slice(&TAG_MAGIC);                 // 0..4     magic
    out[offsets::VERSION] = header.version;                // 4        version
    out[offsets::FLAGS..offsets::FLAGS + 3].copy_from_slice(&header.flags); // 5..8 flags

    LittleEndian::write_u16(&mut out[offsets::MATERIAL..], record.material_type.code());
    out[offsets::COLOR..offsets::COLOR + 3].copy_from_slice(&record.color.to_bytes());
    LittleEndian::write_f32(&mut out[offsets::DIAMETER..], record.diameter);
    LittleEndian::write_u16(&mut out[offsets::NOZZLE_TEMP..], record.nozzle_temp);
    LittleEndian::write_u16(&mut out[offsets::BED_TEMP..], record.bed_temp);
    LittleEndian::write_f32(&mut out[offsets::DENSITY..], record.density);
    LittleEndian::write_f32(&mut out[offsets::REMAINING_LENGTH..], record.remaining_length);
    LittleEndian::write_f32(&mut out[offsets::REMAINING_WEIGHT..], record.remaining_weight);
    write_cstr(&mut out, offsets::MANUFACTURER, TAG_STRING_LEN, &record.manufacturer);
    write_cstr(&mut out, offsets::NAME, TAG_STRING_LEN, &record.name);

    write_cstr(&mut out, offsets::SERIAL, TAG_STRING_LEN, &record.manufacturing_info.serial);
    LittleEndian::write_u32(&mut out[offsets::MFG_DATE..], record.manufacturing_info.date);

    let crc = compute_crc32(&out[..CHECKSUM_OFFSET]);
    LittleEndian::write_u32(&mut out[CHECKSUM_OFFSET..], crc);

    out
}

/// Encode and encrypt `record` with an already-derived key.
#[inline]
pub fn encode_image(record: &SpoolRecord, header: TagHeader, key: &TagKey) -> TagImage {
    let mut out = encode_plain(record, header);
    xor_stream_in_place(&mut out, CIPHER_OFFSET, key);
    TagImage(out)
}
