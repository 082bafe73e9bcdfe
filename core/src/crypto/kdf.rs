// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! Per-tag key derivation from the tag UID and a fixed master secret.
//!
//! Design:
//! - HKDF-Extract(salt = master secret, ikm = uid) -> PRK
//! - HKDF-Expand(PRK, info = "RFID-A\0") -> 16-byte XOR key
//! - The same expansion stretched to 96 bytes yields the sixteen 6-byte
//!   MIFARE sector keys; the first 16 bytes equal the XOR key.
//!
//! Strategies are explicit values chosen by the host at startup. The
//! HMAC-chain fallback produces a different key family: tags written under
//! one strategy do not decode under the other.

use hkdf::hmac::{Hmac, Mac};
use hkdf::Hkdf;
use sha2::Sha256;

use crate::constants::{KDF_CONTEXT, KEY_LEN_16, SECTOR_COUNT, SECTOR_KEY_LEN};
use crate::crypto::types::{KdfError, KdfId, MasterSecret, TagKey};

type HmacSha256 = Hmac<Sha256>;

/// Seam between the codec and the concrete KDF primitive.
///
/// Implementations must be pure: equal UIDs give equal keys, and no call
/// observes another.
pub trait KeyDerivationStrategy: Send + Sync {
    fn id(&self) -> KdfId;

    fn derive_key(&self, uid: &[u8]) -> Result<TagKey, KdfError>;
}

/// HKDF-SHA256, the interoperable strategy.
#[derive(Debug, Clone, Default)]
pub struct HkdfSha256Kdf {
    master: MasterSecret,
}

impl HkdfSha256Kdf {
    pub fn new(master: MasterSecret) -> Self {
        Self { master }
    }

    fn expand(&self, uid: &[u8], okm: &mut [u8]) -> Result<(), KdfError> {
        if uid.is_empty() {
            return Err(KdfError::EmptyUid);
        }
        let hk = Hkdf::<Sha256>::new(Some(self.master.as_bytes()), uid);
        hk.expand(KDF_CONTEXT, okm)
            .map_err(|_| KdfError::Failure("HKDF expand failed (SHA-256)".into()))
    }

    /// Sixteen 6-byte sector keys for MIFARE Classic 1K authentication.
    pub fn derive_sector_keys(
        &self,
        uid: &[u8],
    ) -> Result<[[u8; SECTOR_KEY_LEN]; SECTOR_COUNT], KdfError> {
        let mut okm = [0u8; SECTOR_COUNT * SECTOR_KEY_LEN];
        self.expand(uid, &mut okm)?;

        let mut keys = [[0u8; SECTOR_KEY_LEN]; SECTOR_COUNT];
        for (key, chunk) in keys.iter_mut().zip(okm.chunks_exact(SECTOR_KEY_LEN)) {
            key.copy_from_slice(chunk);
        }
        Ok(keys)
    }
}

impl KeyDerivationStrategy for HkdfSha256Kdf {
    fn id(&self) -> KdfId {
        KdfId::HkdfSha256
    }

    fn derive_key(&self, uid: &[u8]) -> Result<TagKey, KdfError> {
        let mut key = [0u8; KEY_LEN_16];
        self.expand(uid, &mut key)?;
        TagKey::new(key.to_vec())
    }
}

/// Fallback for hosts without an HKDF primitive.
///
/// HMAC-SHA256 keyed with `uid || context` over the master secret, chained
/// (`T(n) = HMAC(k, T(n-1))`) until enough bytes exist. NOT interoperable
/// with `HkdfSha256Kdf`.
#[derive(Debug, Clone, Default)]
pub struct HmacChainKdf {
    master: MasterSecret,
}

impl HmacChainKdf {
    pub fn new(master: MasterSecret) -> Self {
        Self { master }
    }

    fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, KdfError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
            .map_err(|_| KdfError::Failure("HMAC key setup failed".into()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl KeyDerivationStrategy for HmacChainKdf {
    fn id(&self) -> KdfId {
        KdfId::HmacChain
    }

    fn derive_key(&self, uid: &[u8]) -> Result<TagKey, KdfError> {
        if uid.is_empty() {
            return Err(KdfError::EmptyUid);
        }
        let mut salt = Vec::with_capacity(uid.len() + KDF_CONTEXT.len());
        salt.extend_from_slice(uid);
        salt.extend_from_slice(KDF_CONTEXT);

        let mut block = Self::hmac(&salt, self.master.as_bytes())?;
        let mut out = block.clone();
        while out.len() < KEY_LEN_16 {
            block = Self::hmac(&salt, &block)?;
            out.extend_from_slice(&block);
        }
        out.truncate(KEY_LEN_16);
        TagKey::new(out)
    }
}

/// Build the strategy registered under `id`.
pub fn strategy_for(id: KdfId, master: MasterSecret) -> Box<dyn KeyDerivationStrategy> {
    match id {
        KdfId::HkdfSha256 => Box::new(HkdfSha256Kdf::new(master)),
        KdfId::HmacChain => Box::new(HmacChainKdf::new(master)),
    }
}

/// Derive the 16-byte tag key for `uid` with the default master secret.
#[inline]
pub fn derive_key(uid: &[u8]) -> Result<[u8; KEY_LEN_16], KdfError> {
    let mut key = [0u8; KEY_LEN_16];
    HkdfSha256Kdf::default().expand(uid, &mut key)?;
    Ok(key)
}

/// Derive the sixteen sector keys for `uid` with the default master secret.
#[inline]
pub fn derive_sector_keys(uid: &[u8]) -> Result<[[u8; SECTOR_KEY_LEN]; SECTOR_COUNT], KdfError> {
    HkdfSha256Kdf::default().derive_sector_keys(uid)
}
