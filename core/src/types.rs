use thiserror::Error;

use crate::constants::TAG_MAGIC;
use crate::crypto::KdfError;
use crate::utils::fmt_bytes;

/// Decode failure shared by the tag codec and the payload normalizer.
///
/// Structural variants (`TooShort`, `HeaderInvalid`, `ChecksumMismatch`) mean
/// a corrupted, tampered or foreign tag and are always surfaced. Field-level
/// problems in the forgiving path never show up here; they are recovered and
/// reported as `payload::FieldIssue`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer too short to hold the protected region and its checksum.
    #[error("buffer too short: {have} < {need}")]
    TooShort { have: usize, need: usize },

    /// Clear-text magic does not match.
    #[error("invalid tag header: expected {}, got {}", fmt_bytes(&TAG_MAGIC), fmt_bytes(.have))]
    HeaderInvalid { have: [u8; 4] },

    /// CRC32 over the decrypted protected region does not match.
    #[error("checksum mismatch: stored 0x{stored:08x}, computed 0x{computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// Input shape the normalizer does not accept (None, number, list, ...).
    #[error("unsupported payload type: {kind}")]
    UnsupportedPayloadType { kind: String },

    /// String input that is neither a JSON object nor valid hex.
    #[error("malformed string payload: {0}")]
    MalformedString(String),

    /// Non-empty input from which not a single field could be accepted.
    #[error("no salvageable data in payload ({provided} entries provided)")]
    NoSalvageableData { provided: usize },

    /// No UID given and no default key configured.
    #[error("no UID supplied and no default key configured")]
    NoKeyAvailable,

    /// Key derivation rejected the UID.
    #[error("key derivation error: {0}")]
    Key(#[from] KdfError),
}

impl DecodeError {
    /// True for failures that indicate a corrupted, tampered or foreign tag.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DecodeError::TooShort { .. }
                | DecodeError::HeaderInvalid { .. }
                | DecodeError::ChecksumMismatch { .. }
        )
    }
}

/// Encoding only fails when no key can be derived for the UID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("key derivation error: {0}")]
    Key(#[from] KdfError),
}
