//! crypto/xor.rs
//! Repeating-key XOR stream over a tag image.
//!
//! `buf[i] ^= key[(i - start) % key.len()]` for every `i >= start`.
//! Self-inverse: applying it twice with the same key restores the input.

use crate::crypto::types::TagKey;

#[inline]
pub fn xor_stream_in_place(buf: &mut [u8], start: usize, key: &TagKey) {
    if start >= buf.len() {
        return;
    }
    let key = key.as_bytes();
    for (byte, k) in buf[start..].iter_mut().zip(key.iter().cycle()) {
        *byte ^= k;
    }
}
