// ## 📂 File: `src/payload/binary.rs`

//! payload/binary.rs
//! Best-effort binary layout for non-authoritative sources (simulated or
//! partial reads). NOT the tag image format: no encryption, no checksum,
//! different offsets.
//!
//! | Offset | Size | Field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 4    | magic "BLMF" (LE u32), mismatch warned  |
//! | 4      | 2    | nozzle temp u16                         |
//! | 6      | 2    | bed temp u16                            |
//! | 8      | 4    | density f32                             |
//! | 12     | 4    | diameter f32                            |
//! | 16     | ..   | NUL-separated strings: name, maker      |
//!
//! Anything past the available length keeps its default.

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, warn};

use crate::constants::loose;
use crate::payload::map::FieldCollector;
use crate::payload::types::PayloadReport;
use crate::record::{specs, FieldIssue, FloatSpec, IntSpec, SpoolRecord};
use crate::types::DecodeError;

fn take_int(c: &mut FieldCollector, spec: &IntSpec, raw: u16) -> u16 {
    if spec.accepts(i64::from(raw)) {
        c.accepted += 1;
        return raw;
    }
    reject(c, spec.field, spec.out_of_range(raw));
    spec.default
}

fn take_float(c: &mut FieldCollector, spec: &FloatSpec, raw: f32) -> f32 {
    if spec.accepts(f64::from(raw)) {
        c.accepted += 1;
        return raw;
    }
    reject(c, spec.field, spec.out_of_range(f64::from(raw)));
    spec.default
}

fn reject(c: &mut FieldCollector, field: &'static str, issue: FieldIssue) {
    issue.log();
    c.issues.push(issue);
    c.defaulted.push(field);
}

pub fn decode_bytes(payload: &[u8]) -> Result<PayloadReport, DecodeError> {
    debug!(len = payload.len(), "decoding binary payload");

    if payload.len() < loose::MIN_LEN {
        return Err(DecodeError::TooShort { have: payload.len(), need: loose::MIN_LEN });
    }

    let magic = LittleEndian::read_u32(&payload[..4]);
    if magic != loose::MAGIC {
        warn!("unexpected binary payload magic: 0x{:08X}", magic);
    }

    let mut c = FieldCollector::default();
    let mut record = SpoolRecord::default();

    // Always present: MIN_LEN covers the temperature words.
    let t = loose::TEMPS;
    record.nozzle_temp = take_int(&mut c, &specs::NOZZLE_TEMP, LittleEndian::read_u16(&payload[t..]));
    record.bed_temp = take_int(&mut c, &specs::BED_TEMP, LittleEndian::read_u16(&payload[t + 2..]));

    let m = loose::FLOATS;
    if payload.len() >= m + 8 {
        record.density = take_float(&mut c, &specs::DENSITY, LittleEndian::read_f32(&payload[m..]));
        record.diameter = take_float(&mut c, &specs::DIAMETER, LittleEndian::read_f32(&payload[m + 4..]));
    } else {
        c.defaulted.extend([specs::DENSITY.field, specs::DIAMETER.field]);
    }

    let mut strings = payload
        .get(loose::STRINGS..)
        .unwrap_or_default()
        .split(|&b| b == 0)
        .map(String::from_utf8_lossy);

    match strings.next().filter(|s| !s.is_empty()) {
        Some(name) => {
            c.accepted += 1;
            let (name, note) = specs::NAME.bound(&name);
            if let Some(note) = note {
                note.log();
                c.issues.push(note);
            }
            record.name = name;
        }
        None => c.defaulted.push(specs::NAME.field),
    }
    match strings.next().filter(|s| !s.is_empty()) {
        Some(maker) => {
            c.accepted += 1;
            let (maker, note) = specs::MANUFACTURER.bound(&maker);
            if let Some(note) = note {
                note.log();
                c.issues.push(note);
            }
            record.manufacturer = maker;
        }
        None => c.defaulted.push(specs::MANUFACTURER.field),
    }

    // Never carried by this layout.
    c.defaulted.extend([
        specs::MATERIAL.field,
        specs::COLOR.field,
        specs::REMAINING_LENGTH.field,
        specs::REMAINING_WEIGHT.field,
    ]);

    Ok(c.into_report(record))
}
