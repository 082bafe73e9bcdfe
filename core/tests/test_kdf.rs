#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use spool_tag_core::crypto::{
        derive_key, derive_sector_keys, strategy_for, CachedKdf, HkdfSha256Kdf, HmacChainKdf, KdfError, KdfId,
        KeyDerivationStrategy, MasterSecret, TagKey,
    };

    const UID: [u8; 4] = [0x11, 0x22, 0x33, 0x44];

    // Known-answer vectors for UID 11223344 under the built-in master secret.
    #[test]
    fn hkdf_known_answer() {
        let key = derive_key(&UID).unwrap();
        assert_eq!(hex::encode(key), "0729f3b2d37a2027210d85e7d77b2e7c");
    }

    #[test]
    fn sector_keys_known_answer() {
        let keys = derive_sector_keys(&UID).unwrap();
        assert_eq!(hex::encode(keys[0]), "0729f3b2d37a");
        assert_eq!(hex::encode(keys[1]), "2027210d85e7");
        assert_eq!(hex::encode(keys[15]), "baf630ccbfd3");
    }

    #[test]
    fn sector_keys_prefix_is_tag_key() {
        let key = derive_key(&UID).unwrap();
        let keys = derive_sector_keys(&UID).unwrap();
        let flat: Vec<u8> = keys.iter().flatten().copied().collect();
        assert_eq!(&flat[..16], &key[..]);
    }

    #[test]
    fn hmac_chain_known_answer() {
        let key = HmacChainKdf::default().derive_key(&UID).unwrap();
        assert_eq!(hex::encode(key.as_bytes()), "cb6def74a453a11d8088dc53afcc7d84");
    }

    #[test]
    fn strategies_are_not_interoperable() {
        let hkdf = HkdfSha256Kdf::default().derive_key(&UID).unwrap();
        let hmac = HmacChainKdf::default().derive_key(&UID).unwrap();
        assert_ne!(hkdf, hmac);
        assert_eq!(hkdf.len(), 16);
        assert_eq!(hmac.len(), 16);
    }

    #[test]
    fn empty_uid_rejected_by_both_strategies() {
        assert_eq!(derive_key(&[]).unwrap_err(), KdfError::EmptyUid);
        assert_eq!(HmacChainKdf::default().derive_key(&[]).unwrap_err(), KdfError::EmptyUid);
        assert_eq!(derive_sector_keys(&[]).unwrap_err(), KdfError::EmptyUid);
    }

    #[test]
    fn master_secret_changes_key() {
        let other = MasterSecret::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
        let a = HkdfSha256Kdf::default().derive_key(&UID).unwrap();
        let b = HkdfSha256Kdf::new(other).derive_key(&UID).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn key_material_validation() {
        assert!(matches!(TagKey::new(Vec::new()), Err(KdfError::InvalidKeyMaterial(_))));
        assert!(matches!(TagKey::from_hex("abc"), Err(KdfError::InvalidKeyMaterial(_))));
        assert!(matches!(TagKey::from_hex("zz"), Err(KdfError::InvalidKeyMaterial(_))));
        assert!(matches!(MasterSecret::from_hex("   "), Err(KdfError::InvalidKeyMaterial(_))));
        assert_eq!(TagKey::from_hex(" 0a0b ").unwrap().as_bytes(), &[0x0a, 0x0b]);
    }

    #[test]
    fn key_debug_is_redacted() {
        let key = TagKey::from_hex("deadbeef").unwrap();
        let shown = format!("{:?}", key);
        assert_eq!(shown, "TagKey(4 bytes)");
        assert!(!shown.contains("dead"));
    }

    #[test]
    fn kdf_id_registry() {
        KdfId::verify(KdfId::HkdfSha256 as u8).unwrap();
        KdfId::verify(KdfId::HmacChain as u8).unwrap();
        assert_eq!(KdfId::verify(0x7F).unwrap_err(), KdfError::UnknownKdf { raw: 0x7F });

        assert_eq!(KdfId::from_name("HKDF-SHA256"), Some(KdfId::HkdfSha256));
        assert_eq!(KdfId::from_name("fallback"), Some(KdfId::HmacChain));
        assert_eq!(KdfId::from_name("scrypt"), None);
        assert_eq!(KdfId::default().name(), "hkdf-sha256");
    }

    #[test]
    fn unknown_kdf_error_renders_hex() {
        let err = KdfError::UnknownKdf { raw: 0x7F };
        assert_eq!(err.to_string(), "unknown KDF: 0x7f");
    }

    #[test]
    fn strategy_for_matches_id() {
        for id in [KdfId::HkdfSha256, KdfId::HmacChain] {
            assert_eq!(strategy_for(id, MasterSecret::default()).id(), id);
        }
    }

    #[test]
    fn cached_kdf_memoizes() {
        let cached = CachedKdf::new(HkdfSha256Kdf::default());
        assert!(cached.is_empty());

        let k1 = cached.derive_key(&UID).unwrap();
        let k2 = cached.derive_key(&UID).unwrap();
        assert_eq!(k1, k2);
        assert_eq!(cached.len(), 1);

        cached.derive_key(&[0x01]).unwrap();
        assert_eq!(cached.len(), 2);

        // Failures are not cached.
        assert!(cached.derive_key(&[]).is_err());
        assert_eq!(cached.len(), 2);

        cached.clear();
        assert!(cached.is_empty());
        assert_eq!(cached.id(), KdfId::HkdfSha256);
    }

    #[test]
    fn cached_kdf_shared_across_threads() {
        let cached = std::sync::Arc::new(CachedKdf::new(HkdfSha256Kdf::default()));
        let expected = cached.inner().derive_key(&UID).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cached = cached.clone();
                std::thread::spawn(move || cached.derive_key(&UID).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
        assert_eq!(cached.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_derive_key_deterministic(uid in proptest::collection::vec(any::<u8>(), 1..16)) {
            let k1 = derive_key(&uid).unwrap();
            let k2 = derive_key(&uid).unwrap();
            prop_assert_eq!(k1, k2);
        }

        #[test]
        fn prop_derive_key_unique(uid1 in any::<[u8; 7]>(), uid2 in any::<[u8; 7]>()) {
            prop_assume!(uid1 != uid2);
            prop_assert_ne!(derive_key(&uid1).unwrap(), derive_key(&uid2).unwrap());
        }

        #[test]
        fn prop_hmac_chain_deterministic(uid in proptest::collection::vec(any::<u8>(), 1..16)) {
            let kdf = HmacChainKdf::default();
            prop_assert_eq!(kdf.derive_key(&uid).unwrap(), kdf.derive_key(&uid).unwrap());
        }
    }
}
