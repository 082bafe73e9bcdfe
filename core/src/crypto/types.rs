// ## 📂 File: `src/crypto/types.rs`

use std::fmt;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{kdf_ids, DEFAULT_MASTER_SECRET};
use crate::utils::{enum_name_or_hex, parse_hex_secret};

/// KDF strategy registry.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum KdfId {
    HkdfSha256 = kdf_ids::HKDF_SHA256,
    HmacChain  = kdf_ids::HMAC_CHAIN,
}

impl KdfId {
    pub fn verify(raw: u8) -> Result<(), KdfError> {
        match raw {
            x if x == KdfId::HkdfSha256 as u8 => Ok(()),
            x if x == KdfId::HmacChain as u8  => Ok(()),
            _ => Err(KdfError::UnknownKdf { raw }),
        }
    }

    /// Stable configuration name.
    pub fn name(self) -> &'static str {
        match self {
            KdfId::HkdfSha256 => "hkdf-sha256",
            KdfId::HmacChain  => "hmac-chain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hkdf-sha256" | "hkdf" => Some(KdfId::HkdfSha256),
            "hmac-chain" | "hmac" | "fallback" => Some(KdfId::HmacChain),
            _ => None,
        }
    }
}

impl Default for KdfId {
    fn default() -> Self {
        KdfId::HkdfSha256
    }
}

fn kdf_name(raw: &u8) -> String {
    enum_name_or_hex::<KdfId>(*raw)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KdfError {
    /// A tag UID must carry at least one byte.
    #[error("tag uid is empty")]
    EmptyUid,

    /// Unknown strategy id.
    #[error("unknown KDF: {}", kdf_name(.raw))]
    UnknownKdf { raw: u8 },

    /// Key material rejected (empty, bad hex).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Underlying primitive refused the request.
    #[error("key derivation failed: {0}")]
    Failure(String),
}

/// Repeating-key XOR stream key. Never empty.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TagKey(Vec<u8>);

impl TagKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KdfError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KdfError::InvalidKeyMaterial("key must not be empty".into()));
        }
        Ok(Self(bytes))
    }

    pub fn from_hex(raw: &str) -> Result<Self, KdfError> {
        let bytes = parse_hex_secret(raw).map_err(KdfError::InvalidKeyMaterial)?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // A TagKey is never empty; provided for clippy's len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Key bytes stay out of logs.
impl fmt::Debug for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagKey({} bytes)", self.0.len())
    }
}

/// Master secret fed into the KDF alongside the tag UID.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterSecret(Vec<u8>);

impl MasterSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KdfError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KdfError::InvalidKeyMaterial("master secret must not be empty".into()));
        }
        Ok(Self(bytes))
    }

    pub fn from_hex(raw: &str) -> Result<Self, KdfError> {
        let bytes = parse_hex_secret(raw).map_err(KdfError::InvalidKeyMaterial)?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for MasterSecret {
    fn default() -> Self {
        Self(DEFAULT_MASTER_SECRET.to_vec())
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterSecret({} bytes)", self.0.len())
    }
}
