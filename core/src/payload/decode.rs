// ## 📂 File: `src/payload/decode.rs`

//! payload/decode.rs
//! Forgiving decoder for inputs that are not verified tag images.
//!
//! Design:
//! - RECEIVE -> dispatch on shape -> {map | string -> map/bytes | bytes}
//!   -> per-field validation -> Success / PartialSuccess / rejected.
//! - Field problems are recovered by default substitution and logged.
//! - Only shape errors and "nothing usable at all" are returned as errors.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::payload::binary::decode_bytes;
use crate::payload::fields::value_kind;
use crate::payload::map::decode_map;
use crate::payload::types::{Payload, PayloadReport};
use crate::record::SpoolRecord;
use crate::types::DecodeError;

/// Minimum byte length accepted by `validate_payload_integrity`.
const MIN_INTEGRITY_BYTES: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PayloadNormalizer {
    /// Warn when temperatures fall outside the material's usual window.
    pub check_temperature_profiles: bool,
}

impl Default for PayloadNormalizer {
    fn default() -> Self {
        Self { check_temperature_profiles: true }
    }
}

impl PayloadNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode_payload(&self, input: impl Into<Payload>) -> Result<SpoolRecord, DecodeError> {
        self.decode_payload_report(input).map(|report| report.record)
    }

    pub fn decode_payload_report(&self, input: impl Into<Payload>) -> Result<PayloadReport, DecodeError> {
        let payload = input.into();
        debug!(kind = payload.kind(), "dispatching payload");

        let report = match payload {
            Payload::Map(map) => decode_map(&map)?,
            Payload::Text(text) => decode_text(&text)?,
            Payload::Bytes(bytes) => decode_bytes(&bytes)?,
            other => {
                warn!(kind = other.kind(), "unsupported payload type");
                return Err(DecodeError::UnsupportedPayloadType { kind: other.kind().to_string() });
            }
        };

        if self.check_temperature_profiles {
            check_temperature_profile(&report.record);
        }
        info!(
            outcome = ?report.outcome,
            defaulted = report.defaulted.len(),
            "payload decoded: {}",
            report.record.name
        );
        Ok(report)
    }
}

/// JSON first (must be an object); hex of the binary layout only when the
/// text is not JSON at all.
fn decode_text(text: &str) -> Result<PayloadReport, DecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::MalformedString("empty string".into()));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            debug!("string payload parsed as JSON object");
            return decode_map(&map);
        }
        Ok(other) => {
            warn!(kind = value_kind(&other), "JSON payload is not an object");
            return Err(DecodeError::MalformedString(format!(
                "JSON payload is not an object, got {}",
                value_kind(&other)
            )));
        }
        Err(e) => debug!("string payload is not JSON ({}), trying hex", e),
    }

    let bytes = parse_hex_payload(trimmed)?;
    decode_bytes(&bytes)
}

/// Hex with `0x` markers anywhere, whitespace and dashes between digits.
fn parse_hex_payload(text: &str) -> Result<Vec<u8>, DecodeError> {
    let cleaned: String = text
        .replace("0x", "")
        .replace("0X", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(DecodeError::MalformedString("no hex digits".into()));
    }
    if cleaned.len() % 2 != 0 {
        return Err(DecodeError::MalformedString(format!(
            "neither JSON nor even-length hex ({} hex chars)",
            cleaned.len()
        )));
    }
    hex::decode(&cleaned)
        .map_err(|e| DecodeError::MalformedString(format!("neither JSON nor hex: {}", e)))
}

/// Advisory only: never substitutes a value.
fn check_temperature_profile(record: &SpoolRecord) {
    let Some(profile) = record.material_type.temperature_profile() else {
        return;
    };
    if !profile.nozzle_ok(record.nozzle_temp) {
        warn!(
            material = %record.material_type,
            "nozzle temperature {} outside typical range {}-{}",
            record.nozzle_temp, profile.nozzle.0, profile.nozzle.1
        );
    }
    if !profile.bed_ok(record.bed_temp) {
        warn!(
            material = %record.material_type,
            "bed temperature {} outside typical range {}-{}",
            record.bed_temp, profile.bed.0, profile.bed.1
        );
    }
}

/// Decode with the default normalizer.
pub fn decode_payload(input: impl Into<Payload>) -> Result<SpoolRecord, DecodeError> {
    PayloadNormalizer::default().decode_payload(input)
}

/// Decode with the default normalizer, keeping outcome and issues.
pub fn decode_payload_report(input: impl Into<Payload>) -> Result<PayloadReport, DecodeError> {
    PayloadNormalizer::default().decode_payload_report(input)
}

/// Cheap pre-check before a full decode. Passing it does not guarantee the
/// decode succeeds.
pub fn validate_payload_integrity(payload: &Payload) -> bool {
    match payload {
        Payload::Map(map) => !map.is_empty(),
        Payload::Text(text) => !text.trim().is_empty(),
        Payload::Bytes(bytes) => bytes.len() >= MIN_INTEGRITY_BYTES,
        Payload::Missing | Payload::Unsupported(_) => false,
    }
}
