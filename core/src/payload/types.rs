//! payload/types.rs
//! Input shapes and results of the forgiving decoder.

use serde_json::{Map, Value};

use crate::record::{FieldIssue, SpoolRecord};
use crate::telemetry::DecodeCounters;

/// Loosely structured input handed to `PayloadNormalizer`.
///
/// Built through the `From` impls; anything the normalizer cannot handle
/// ends up as `Missing` or `Unsupported` and is rejected with a typed error.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No payload at all (`None`, JSON `null`).
    Missing,
    /// Field map (dict / JSON object).
    Map(Map<String, Value>),
    /// JSON text or hex dump.
    Text(String),
    /// Raw bytes in the loose binary layout.
    Bytes(Vec<u8>),
    /// Any other shape; carries a short type name for diagnostics.
    Unsupported(&'static str),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Missing => "none",
            Payload::Map(_) => "map",
            Payload::Text(_) => "string",
            Payload::Bytes(_) => "bytes",
            Payload::Unsupported(kind) => kind,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Missing,
            Value::Object(map) => Payload::Map(map),
            Value::String(s) => Payload::Text(s),
            Value::Bool(_) => Payload::Unsupported("bool"),
            Value::Number(_) => Payload::Unsupported("number"),
            Value::Array(_) => Payload::Unsupported("list"),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Map(map)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&[u8]> for Payload {
    fn from(b: &[u8]) -> Self {
        Payload::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(b: Vec<u8>) -> Self {
        Payload::Bytes(b)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Payload::Missing, Into::into)
    }
}

/// Terminal state of a successful forgiving decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Every field was present and accepted.
    Success,
    /// At least one field fell back to its default.
    PartialSuccess,
}

/// Record plus everything that was recovered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadReport {
    pub record: SpoolRecord,
    pub outcome: DecodeOutcome,
    /// Fields that ended at their default (missing or rejected).
    pub defaulted: Vec<&'static str>,
    /// Recovered problems, each logged at warn level.
    pub issues: Vec<FieldIssue>,
}

impl PayloadReport {
    pub(crate) fn new(record: SpoolRecord, defaulted: Vec<&'static str>, issues: Vec<FieldIssue>) -> Self {
        let outcome = if defaulted.is_empty() {
            DecodeOutcome::Success
        } else {
            DecodeOutcome::PartialSuccess
        };
        Self { record, outcome, defaulted, issues }
    }

    pub fn counters(&self) -> DecodeCounters {
        let mut counters = DecodeCounters::default();
        counters.add_payload(&self.issues);
        counters
    }
}
