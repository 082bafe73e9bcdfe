//! Codec configuration.
//!
//! Loaded explicitly by the host (JSON text or environment), validated at
//! load time, and handed to `TagCodec::from_config`. Nothing is read at
//! module load: a bad secret surfaces as a `ConfigError` at the call site.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::constants::{env, TAG_VERSION_V1};
use crate::crypto::{KdfError, KdfId, MasterSecret, TagKey};
use crate::utils::parse_hex_secret;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    InvalidSecret { field: &'static str, reason: String },

    #[error("unknown KDF strategy: {0}")]
    UnknownKdf(String),

    #[error("invalid flags {0:?}: expected 6 hex digits")]
    InvalidFlags(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Strategy name: `hkdf-sha256` or `hmac-chain`.
    #[serde(with = "kdf_name")]
    pub kdf: KdfId,
    /// Hex override of the built-in master secret.
    pub master_secret: Option<String>,
    /// Hex XOR key used when a tag is decoded without its UID.
    pub default_key: Option<String>,
    pub version: u8,
    #[serde(with = "flags_hex")]
    pub flags: [u8; 3],
    /// Memoize UID -> key derivations.
    pub cache_keys: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            kdf: KdfId::HkdfSha256,
            master_secret: None,
            default_key: None,
            version: TAG_VERSION_V1,
            flags: [0u8; 3],
            cache_keys: false,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: CodecConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from the process environment.
    ///
    /// - `SPOOL_TAG_KDF`: strategy name
    /// - `SPOOL_TAG_MASTER_SECRET`: hex master secret override
    /// - `SPOOL_TAG_DEFAULT_KEY`: hex key for UID-less decodes
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CodecConfig::default();

        if let Some(name) = lookup(env::KDF) {
            config.kdf = KdfId::from_name(&name).ok_or(ConfigError::UnknownKdf(name))?;
        }
        if let Some(secret) = lookup(env::MASTER_SECRET) {
            info!("using master secret override from {}", env::MASTER_SECRET);
            config.master_secret = Some(secret);
        }
        if let Some(key) = lookup(env::DEFAULT_KEY) {
            info!("using default tag key from {}", env::DEFAULT_KEY);
            config.default_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on unusable key material.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secret) = &self.master_secret {
            parse_hex_secret(secret)
                .map_err(|reason| ConfigError::InvalidSecret { field: "master_secret", reason })?;
        }
        if let Some(key) = &self.default_key {
            parse_hex_secret(key)
                .map_err(|reason| ConfigError::InvalidSecret { field: "default_key", reason })?;
        }
        Ok(())
    }

    pub fn master_secret(&self) -> Result<MasterSecret, ConfigError> {
        match &self.master_secret {
            Some(hex) => MasterSecret::from_hex(hex).map_err(|e| invalid("master_secret", e)),
            None => Ok(MasterSecret::default()),
        }
    }

    pub fn default_key(&self) -> Result<Option<TagKey>, ConfigError> {
        self.default_key
            .as_deref()
            .map(TagKey::from_hex)
            .transpose()
            .map_err(|e| invalid("default_key", e))
    }
}

fn invalid(field: &'static str, err: KdfError) -> ConfigError {
    let reason = match err {
        KdfError::InvalidKeyMaterial(reason) => reason,
        other => other.to_string(),
    };
    ConfigError::InvalidSecret { field, reason }
}

mod kdf_name {
    use serde::{Deserialize, Deserializer, Serializer};
    use crate::crypto::KdfId;

    pub fn serialize<S: Serializer>(id: &KdfId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(id.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KdfId, D::Error> {
        let name = String::deserialize(d)?;
        KdfId::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown KDF strategy: {}", name)))
    }
}

mod flags_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(flags: &[u8; 3], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(flags))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 3], D::Error> {
        let raw = String::deserialize(d)?;
        let mut flags = [0u8; 3];
        hex::decode_to_slice(raw.trim(), &mut flags).map_err(|_| {
            serde::de::Error::custom(super::ConfigError::InvalidFlags(raw.clone()))
        })?;
        Ok(flags)
    }
}
