//! crypto/cache.rs
//! UID -> key memoization around any strategy.
//!
//! The map sits behind a `Mutex` so one cache can serve several reader
//! threads. A poisoned lock falls back to deriving without caching.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::crypto::kdf::KeyDerivationStrategy;
use crate::crypto::types::{KdfError, KdfId, TagKey};

pub struct CachedKdf<S> {
    inner: S,
    cache: Mutex<HashMap<Vec<u8>, TagKey>>,
}

impl<S: KeyDerivationStrategy> CachedKdf<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, cache: Mutex::new(HashMap::new()) }
    }

    /// Number of cached UIDs.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: KeyDerivationStrategy> KeyDerivationStrategy for CachedKdf<S> {
    fn id(&self) -> KdfId {
        self.inner.id()
    }

    fn derive_key(&self, uid: &[u8]) -> Result<TagKey, KdfError> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(key) = cache.get(uid) {
                return Ok(key.clone());
            }
        }

        let key = self.inner.derive_key(uid)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(uid.to_vec(), key.clone());
        }
        Ok(key)
    }
}

impl KeyDerivationStrategy for Box<dyn KeyDerivationStrategy> {
    fn id(&self) -> KdfId {
        self.as_ref().id()
    }

    fn derive_key(&self, uid: &[u8]) -> Result<TagKey, KdfError> {
        self.as_ref().derive_key(uid)
    }
}
