use std::fmt;
use num_enum::TryFromPrimitive;

/// CRC32 (IEEE) over `data`.
pub fn compute_crc32(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char.
pub fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Write `s` into a fixed `budget`-byte slot as UTF-8 followed by a NUL.
///
/// At most `budget - 1` bytes of text are written so the terminator always
/// fits. The remainder of the slot is left untouched (zero in a fresh image).
pub fn write_cstr(out: &mut [u8], offset: usize, budget: usize, s: &str) {
    let text = truncate_utf8(s, budget.saturating_sub(1)).as_bytes();
    out[offset..offset + text.len()].copy_from_slice(text);
    out[offset + text.len()] = 0;
}

/// Read a NUL-terminated string from a fixed `budget`-byte slot.
///
/// Scans for the first zero byte inside the slot; a slot with no NUL yields
/// the whole slot. Invalid UTF-8 is replaced, never rejected.
pub fn read_cstr(buf: &[u8], offset: usize, budget: usize) -> String {
    let end = (offset + budget).min(buf.len());
    if offset >= end {
        return String::new();
    }
    let slot = &buf[offset..end];
    let len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..len]).into_owned()
}

/// Decode a hex secret, tolerating surrounding whitespace.
pub fn parse_hex_secret(raw: &str) -> Result<Vec<u8>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty hex string".into());
    }
    if trimmed.len() % 2 != 0 {
        return Err(format!("odd-length hex string ({} chars)", trimmed.len()));
    }
    hex::decode(trimmed).map_err(|e| e.to_string())
}
