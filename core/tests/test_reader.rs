#[cfg(test)]
mod tests {
    use spool_tag_core::{
        crypto::TagKey,
        reader::{MemorySource, ReadError, SourceError, SpoolReader, TagSource},
        record::SpoolRecord,
        tag::{self, TagCodec},
        types::DecodeError,
    };

    const UID: [u8; 4] = [0x11, 0x22, 0x33, 0x44];

    fn sample_image() -> Vec<u8> {
        tag::encode(&SpoolRecord::sample(), &UID).unwrap().into_vec()
    }

    fn loose_payload() -> Vec<u8> {
        let mut out = 0x424C_4D46u32.to_le_bytes().to_vec();
        out.extend_from_slice(&235u16.to_le_bytes());
        out.extend_from_slice(&75u16.to_le_bytes());
        out.extend_from_slice(&1.27f32.to_le_bytes());
        out.extend_from_slice(&1.75f32.to_le_bytes());
        out.extend_from_slice(b"Sim PETG\0Sim Co\0");
        out
    }

    #[test]
    fn tag_image_goes_to_codec() {
        let source = MemorySource::new(vec![sample_image()]).with_uid(UID);
        let mut reader = SpoolReader::new(source);

        let record = reader.read_spool().unwrap();
        assert!(record.approx_eq(&SpoolRecord::sample()));
        assert_eq!(reader.counters().tags_decoded, 1);
        assert_eq!(reader.counters().payloads_decoded, 0);
        assert_eq!(reader.source().remaining(), 0);
    }

    #[test]
    fn loose_bytes_go_to_normalizer() {
        let mut reader = SpoolReader::new(MemorySource::new(vec![loose_payload()]));

        let record = reader.read_spool().unwrap();
        assert_eq!(record.name, "Sim PETG");
        assert_eq!(record.manufacturer, "Sim Co");
        assert_eq!(record.nozzle_temp, 235);
        assert_eq!(reader.counters().payloads_decoded, 1);
        assert_eq!(reader.counters().tags_decoded, 0);
    }

    #[test]
    fn tampered_tag_is_not_retried_as_payload() {
        let mut raw = sample_image();
        raw[200] ^= 0x80;
        let mut reader = SpoolReader::new(MemorySource::new(vec![raw]).with_uid(UID));

        let err = reader.read_spool().unwrap_err();
        assert!(matches!(err, ReadError::Decode(DecodeError::ChecksumMismatch { .. })));
        assert_eq!(reader.counters().tags_rejected, 1);
        assert_eq!(reader.counters().payloads_decoded, 0);
    }

    #[test]
    fn truncated_tag_reports_too_short() {
        let raw = sample_image()[..400].to_vec();
        let mut reader = SpoolReader::new(MemorySource::new(vec![raw]).with_uid(UID));

        let err = reader.read_spool().unwrap_err();
        assert_eq!(err, ReadError::Decode(DecodeError::TooShort { have: 400, need: 516 }));
        assert_eq!(reader.counters().tags_rejected, 1);
        assert_eq!(reader.counters().payloads_decoded, 0);
    }

    #[test]
    fn damaged_magic_reports_header_invalid() {
        let mut raw = sample_image();
        raw[0] ^= 1;
        let mut reader = SpoolReader::new(MemorySource::new(vec![raw, vec![0u8; 1024]]).with_uid(UID));

        let err = reader.read_spool().unwrap_err();
        assert_eq!(err, ReadError::Decode(DecodeError::HeaderInvalid { have: [0xAB, 0x55, 0xCC, 0x33] }));

        let err = reader.read_spool().unwrap_err();
        assert_eq!(err, ReadError::Decode(DecodeError::HeaderInvalid { have: [0; 4] }));

        let c = reader.counters();
        assert_eq!((c.tags_rejected, c.payloads_decoded, c.payloads_rejected), (2, 0, 0));
    }

    #[test]
    fn tag_without_uid_uses_default_key() {
        let key = TagKey::new(spool_tag_core::crypto::derive_key(&UID).unwrap().to_vec()).unwrap();
        let codec = TagCodec::default().with_default_key(key);
        let mut reader = SpoolReader::with_codec(MemorySource::new(vec![sample_image()]), codec);

        assert!(reader.read_spool().unwrap().approx_eq(&SpoolRecord::sample()));
    }

    #[test]
    fn tag_without_uid_or_key_rejected() {
        let mut reader = SpoolReader::new(MemorySource::new(vec![sample_image()]));
        let err = reader.read_spool().unwrap_err();
        assert_eq!(err, ReadError::Decode(DecodeError::NoKeyAvailable));
        assert_eq!(reader.counters().tags_rejected, 1);
    }

    #[test]
    fn short_read_rejected_by_normalizer() {
        let mut reader = SpoolReader::new(MemorySource::new(vec![vec![1, 2, 3]]));
        let err = reader.read_spool().unwrap_err();
        assert_eq!(err, ReadError::Decode(DecodeError::TooShort { have: 3, need: 10 }));
        assert_eq!(reader.counters().payloads_rejected, 1);
    }

    #[test]
    fn empty_source_reports_no_tag() {
        let mut reader = SpoolReader::new(MemorySource::default());
        assert_eq!(reader.read_spool().unwrap_err(), ReadError::Source(SourceError::NoTag));
        assert_eq!(reader.counters().total_decoded() + reader.counters().total_rejected(), 0);
    }

    #[test]
    fn reads_are_consumed_in_order() {
        let source = MemorySource::new(vec![sample_image(), loose_payload(), vec![0u8; 2]]).with_uid(UID);
        let mut reader = SpoolReader::new(source);

        assert_eq!(reader.read_spool().unwrap().name, "Bambu PLA Matte");
        assert_eq!(reader.read_spool().unwrap().name, "Sim PETG");
        assert!(reader.read_spool().is_err());
        assert!(matches!(reader.read_spool(), Err(ReadError::Source(SourceError::NoTag))));

        let c = reader.counters();
        assert_eq!((c.tags_decoded, c.payloads_decoded, c.payloads_rejected), (1, 1, 1));
    }

    #[test]
    fn memory_source_drains_from_the_front() {
        let mut source = MemorySource::new(vec![vec![1], vec![2], vec![3]]);
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.read().unwrap(), vec![1]);
        assert_eq!(source.read().unwrap(), vec![2]);
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.read().unwrap(), vec![3]);
        assert_eq!(source.read().unwrap_err(), SourceError::NoTag);
    }

    struct FailingSource;

    impl TagSource for FailingSource {
        fn read(&mut self) -> Result<Vec<u8>, SourceError> {
            Err(SourceError::Device("antenna timeout".into()))
        }

        fn uid(&self) -> Option<Vec<u8>> {
            None
        }
    }

    #[test]
    fn device_errors_propagate() {
        let mut reader = SpoolReader::new(FailingSource);
        let err = reader.read_spool().unwrap_err();
        assert_eq!(err.to_string(), "reader failure: antenna timeout");
    }
}
