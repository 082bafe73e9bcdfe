//! spool-tag-core
//!
//! Filament spool NFC tag codec.
//! Pure Rust: key derivation, the 1024-byte tag image format and a
//! forgiving decoder for loosely structured spool data.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Value types
pub mod record;

// Codec layers
pub mod crypto;
pub mod tag;
pub mod payload;

pub mod telemetry;
pub mod reader;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{CodecConfig, ConfigError};
    pub use crate::crypto::{derive_key, derive_sector_keys, KdfError, KdfId, KeyDerivationStrategy, MasterSecret, TagKey};
    pub use crate::payload::{decode_payload, DecodeOutcome, Payload, PayloadNormalizer, PayloadReport};
    pub use crate::reader::{MemorySource, ReadError, SourceError, SpoolReader, TagSource};
    pub use crate::record::{FieldIssue, FieldIssueKind, ManufacturingInfo, MaterialType, Rgb, SpoolRecord};
    pub use crate::tag::{DecodedTag, TagCodec, TagHeader, TagImage};
    pub use crate::telemetry::DecodeCounters;
    pub use crate::types::{DecodeError, EncodeError};
}
