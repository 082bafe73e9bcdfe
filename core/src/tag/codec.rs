//! tag/codec.rs
//! `TagCodec`: key selection around the pure encode/decode functions.
//!
//! Contract:
//! - `encode(record, uid)` derives the key from `uid` and returns the
//!   encrypted 1024-byte image.
//! - `decode(image, uid)` derives the key from `uid` when given, otherwise
//!   uses the configured default key. Structural failures are returned,
//!   never patched.
//!
//! The codec holds only immutable configuration (plus whatever the strategy
//! caches internally), so one instance can be shared across threads.

use tracing::{debug, info, warn};

use crate::config::{CodecConfig, ConfigError};
use crate::constants::MIN_TAG_IMAGE_LEN;
use crate::crypto::{strategy_for, CachedKdf, HkdfSha256Kdf, KdfId, KeyDerivationStrategy, TagKey};
use crate::record::SpoolRecord;
use crate::tag::decode::{check_framing, decode_image};
use crate::tag::encode::encode_image;
use crate::tag::types::{DecodedTag, TagHeader, TagImage};
use crate::types::{DecodeError, EncodeError};

pub struct TagCodec {
    kdf: Box<dyn KeyDerivationStrategy>,
    default_key: Option<TagKey>,
    header: TagHeader,
}

impl Default for TagCodec {
    fn default() -> Self {
        Self::new(Box::new(HkdfSha256Kdf::default()))
    }
}

impl std::fmt::Debug for TagCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagCodec")
            .field("kdf", &self.kdf.id())
            .field("default_key", &self.default_key)
            .field("header", &self.header)
            .finish()
    }
}

impl TagCodec {
    pub fn new(kdf: Box<dyn KeyDerivationStrategy>) -> Self {
        Self { kdf, default_key: None, header: TagHeader::default() }
    }

    /// Build a codec from configuration. Unusable key material surfaces as
    /// `ConfigError::InvalidSecret`, even when `validate` was skipped.
    pub fn from_config(config: &CodecConfig) -> Result<Self, ConfigError> {
        let master = config.master_secret()?;
        let kdf: Box<dyn KeyDerivationStrategy> = if config.cache_keys {
            Box::new(CachedKdf::new(strategy_for(config.kdf, master)))
        } else {
            strategy_for(config.kdf, master)
        };

        Ok(Self {
            kdf,
            default_key: config.default_key()?,
            header: TagHeader { version: config.version, flags: config.flags },
        })
    }

    pub fn with_default_key(mut self, key: TagKey) -> Self {
        self.default_key = Some(key);
        self
    }

    pub fn with_header(mut self, header: TagHeader) -> Self {
        self.header = header;
        self
    }

    pub fn kdf_id(&self) -> KdfId {
        self.kdf.id()
    }

    pub fn header(&self) -> TagHeader {
        self.header
    }

    fn select_key(&self, uid: Option<&[u8]>) -> Result<TagKey, DecodeError> {
        match uid {
            Some(uid) => Ok(self.kdf.derive_key(uid)?),
            None => self.default_key.clone().ok_or(DecodeError::NoKeyAvailable),
        }
    }

    pub fn encode(&self, record: &SpoolRecord, uid: &[u8]) -> Result<TagImage, EncodeError> {
        let key = self.kdf.derive_key(uid)?;
        let image = encode_image(record, self.header, &key);
        debug!(kdf = ?self.kdf.id(), uid = %hex::encode(uid), "encoded tag image");
        Ok(image)
    }

    pub fn decode(&self, image: &[u8], uid: Option<&[u8]>) -> Result<SpoolRecord, DecodeError> {
        self.decode_tag(image, uid).map(|tag| tag.record)
    }

    /// Like `decode`, also returning the clear header and recovered issues.
    pub fn decode_tag(&self, image: &[u8], uid: Option<&[u8]>) -> Result<DecodedTag, DecodeError> {
        // Framing first: a short or foreign buffer fails before key work.
        check_framing(image)?;
        let key = self.select_key(uid)?;

        match decode_image(image, &key) {
            Ok(tag) => {
                for issue in &tag.issues {
                    issue.log();
                }
                info!(
                    material = %tag.record.material_type,
                    name = %tag.record.name,
                    recovered = tag.issues.len(),
                    "decoded tag image"
                );
                Ok(tag)
            }
            Err(e) => {
                warn!(len = image.len(), min = MIN_TAG_IMAGE_LEN, "tag image rejected: {}", e);
                Err(e)
            }
        }
    }
}

/// Encode with the default HKDF-SHA256 codec.
pub fn encode(record: &SpoolRecord, uid: &[u8]) -> Result<TagImage, EncodeError> {
    TagCodec::default().encode(record, uid)
}

/// Decode with the default HKDF-SHA256 codec (no default key configured).
pub fn decode(image: &[u8], uid: Option<&[u8]>) -> Result<SpoolRecord, DecodeError> {
    TagCodec::default().decode(image, uid)
}
