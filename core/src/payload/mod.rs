//! payload/mod.rs
//! Forgiving decode path for loosely structured spool data.
//!
//! Submodules:
//! - `types`: `Payload` input shapes, `PayloadReport`
//! - `fields`: per-field coercion
//! - `map`: field-map decoding
//! - `binary`: best-effort binary layout (not the tag image format)
//! - `decode`: `PayloadNormalizer` dispatch

pub mod types;
pub mod fields;
pub mod map;
pub mod binary;
pub mod decode;

pub use types::*;
pub use map::decode_map;
pub use binary::decode_bytes;
pub use decode::*;
