//! reader.rs
//! Seam to the hardware reader and the dispatch between both decode paths.
//!
//! A buffer that starts with the tag magic, or is at least as long as the
//! protected region, goes to `TagCodec`. Only short, unframed buffers are
//! handed to `PayloadNormalizer`. Truncated reads, damaged magic and bad
//! checksums are surfaced as-is and never retried through the forgiving
//! path.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, warn};

use crate::payload::{Payload, PayloadNormalizer};
use crate::record::SpoolRecord;
use crate::tag::{claims_tag_image, TagCodec};
use crate::telemetry::DecodeCounters;
use crate::types::DecodeError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("no tag present")]
    NoTag,

    #[error("reader failure: {0}")]
    Device(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Hardware collaborator: raw bytes plus, when available, the tag UID.
pub trait TagSource {
    fn read(&mut self) -> Result<Vec<u8>, SourceError>;

    fn uid(&self) -> Option<Vec<u8>>;
}

/// In-memory source replaying a fixed list of reads.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    reads: VecDeque<Vec<u8>>,
    uid: Option<Vec<u8>>,
}

impl MemorySource {
    pub fn new(reads: Vec<Vec<u8>>) -> Self {
        Self { reads: reads.into(), uid: None }
    }

    pub fn with_uid(mut self, uid: impl Into<Vec<u8>>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn remaining(&self) -> usize {
        self.reads.len()
    }
}

impl TagSource for MemorySource {
    fn read(&mut self) -> Result<Vec<u8>, SourceError> {
        self.reads.pop_front().ok_or(SourceError::NoTag)
    }

    fn uid(&self) -> Option<Vec<u8>> {
        self.uid.clone()
    }
}

pub struct SpoolReader<S> {
    source: S,
    codec: TagCodec,
    normalizer: PayloadNormalizer,
    counters: DecodeCounters,
}

impl<S: TagSource> SpoolReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_codec(source, TagCodec::default())
    }

    pub fn with_codec(source: S, codec: TagCodec) -> Self {
        Self {
            source,
            codec,
            normalizer: PayloadNormalizer::default(),
            counters: DecodeCounters::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: PayloadNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn counters(&self) -> &DecodeCounters {
        &self.counters
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Read once from the source and decode whatever came back.
    pub fn read_spool(&mut self) -> Result<SpoolRecord, ReadError> {
        let raw = self.source.read()?;
        let uid = self.source.uid();
        Ok(self.decode_raw(&raw, uid.as_deref())?)
    }

    /// Dispatch one buffer to the tag codec or the forgiving decoder.
    pub fn decode_raw(&mut self, raw: &[u8], uid: Option<&[u8]>) -> Result<SpoolRecord, DecodeError> {
        if claims_tag_image(raw) {
            debug!(len = raw.len(), "buffer claimed by tag codec");
            return match self.codec.decode_tag(raw, uid) {
                Ok(tag) => {
                    self.counters.add_tag(&tag.issues);
                    Ok(tag.record)
                }
                Err(e) => {
                    self.counters.add_tag_rejected();
                    Err(e)
                }
            };
        }

        debug!(len = raw.len(), "buffer not framed, using forgiving decoder");
        match self.normalizer.decode_payload_report(Payload::from(raw)) {
            Ok(report) => {
                self.counters.add_payload(&report.issues);
                Ok(report.record)
            }
            Err(e) => {
                warn!("payload rejected: {}", e);
                self.counters.add_payload_rejected();
                Err(e)
            }
        }
    }
}
