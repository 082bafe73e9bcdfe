#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use spool_tag_core::{
        config::{CodecConfig, ConfigError},
        crypto::{KdfId, MasterSecret},
        record::SpoolRecord,
        tag::TagCodec,
    };

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.kdf, KdfId::HkdfSha256);
        assert_eq!(config.version, 1);
        assert_eq!(config.flags, [0, 0, 0]);
        assert!(!config.cache_keys);
        assert_eq!(config.master_secret().unwrap(), MasterSecret::default());
        assert!(config.default_key().unwrap().is_none());
    }

    #[test]
    fn json_full_document() {
        let config = CodecConfig::from_json_str(
            r#"{
                "kdf": "hmac",
                "master_secret": "000102030405060708090a0b0c0d0e0f",
                "default_key": "aabbccdd",
                "version": 2,
                "flags": "0a0b0c",
                "cache_keys": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.kdf, KdfId::HmacChain);
        assert_eq!(config.version, 2);
        assert_eq!(config.flags, [0x0a, 0x0b, 0x0c]);
        assert!(config.cache_keys);
        assert_eq!(config.default_key().unwrap().unwrap().as_bytes(), &[0xaa, 0xbb, 0xcc, 0xdd]);
    }

    #[test]
    fn json_partial_document_uses_defaults() {
        let config = CodecConfig::from_json_str(r#"{"cache_keys": true}"#).unwrap();
        assert_eq!(config.kdf, KdfId::HkdfSha256);
        assert_eq!(config.version, 1);
    }

    #[test]
    fn json_round_trip() {
        let config = CodecConfig {
            kdf: KdfId::HmacChain,
            flags: [1, 2, 3],
            default_key: Some("0102".into()),
            ..CodecConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains(r#""kdf":"hmac-chain""#));
        assert!(text.contains(r#""flags":"010203""#));
        assert_eq!(CodecConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_secrets_fail_fast() {
        let err = CodecConfig::from_json_str(r#"{"master_secret": "xyz"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSecret { field: "master_secret", .. }));

        let err = CodecConfig::from_json_str(r#"{"default_key": "abc"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSecret { field: "default_key", .. }));

        let err = CodecConfig::from_json_str(r#"{"master_secret": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSecret { .. }));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(CodecConfig::from_json_str("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(CodecConfig::from_json_str(r#"{"kdf": "scrypt"}"#), Err(ConfigError::Parse(_))));
        assert!(matches!(CodecConfig::from_json_str(r#"{"flags": "01"}"#), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn env_lookup() {
        let config = CodecConfig::from_lookup(lookup(&[
            ("SPOOL_TAG_KDF", "fallback"),
            ("SPOOL_TAG_DEFAULT_KEY", "0011"),
        ]))
        .unwrap();
        assert_eq!(config.kdf, KdfId::HmacChain);
        assert_eq!(config.default_key.as_deref(), Some("0011"));
        assert!(config.master_secret.is_none());

        let empty = CodecConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(empty, CodecConfig::default());
    }

    #[test]
    fn env_lookup_errors() {
        let err = CodecConfig::from_lookup(lookup(&[("SPOOL_TAG_KDF", "scrypt")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownKdf("scrypt".into()));

        let err = CodecConfig::from_lookup(lookup(&[("SPOOL_TAG_MASTER_SECRET", "not-hex")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSecret { field: "master_secret", .. }));
    }

    #[test]
    fn codec_from_config_with_default_key() {
        let uid = [0x11, 0x22, 0x33, 0x44];
        // Default key equal to the HKDF key of `uid`.
        let config = CodecConfig::from_json_str(r#"{"default_key": "0729f3b2d37a2027210d85e7d77b2e7c"}"#).unwrap();
        let codec = TagCodec::from_config(&config).unwrap();

        let image = codec.encode(&SpoolRecord::sample(), &uid).unwrap();
        let decoded = codec.decode(image.as_bytes(), None).unwrap();
        assert!(decoded.approx_eq(&SpoolRecord::sample()));
    }

    #[test]
    fn codec_from_config_custom_secret_differs() {
        let uid = [0x11, 0x22, 0x33, 0x44];
        let config =
            CodecConfig::from_json_str(r#"{"master_secret": "ffeeddccbbaa99887766554433221100"}"#).unwrap();
        let custom = TagCodec::from_config(&config).unwrap();

        let image = custom.encode(&SpoolRecord::sample(), &uid).unwrap();
        assert!(custom.decode(image.as_bytes(), Some(&uid)).is_ok());
        assert!(TagCodec::default().decode(image.as_bytes(), Some(&uid)).is_err());
    }

    #[test]
    fn codec_from_config_reports_config_error_for_bad_secret() {
        // Built directly so `validate` never runs.
        let config = CodecConfig { master_secret: Some("zz".into()), ..Default::default() };
        let err = TagCodec::from_config(&config).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidSecret { field: "master_secret", .. }));

        let config = CodecConfig { default_key: Some("".into()), ..Default::default() };
        let err = TagCodec::from_config(&config).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidSecret { field: "default_key", .. }));
    }
}
