//! payload/map.rs
//! Field-map path: read every known field, coerce it, fall back to the
//! documented default on any problem.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::constants::defaults;
use crate::payload::fields::{coerce_color, coerce_date, coerce_float, coerce_int, coerce_material, coerce_str, value_kind, Accepted};
use crate::payload::types::PayloadReport;
use crate::record::{specs, FieldIssue, FieldIssueKind, ManufacturingInfo, MaterialType, Rgb, SpoolRecord};
use crate::types::DecodeError;

/// Collects per-field results while a record is assembled.
#[derive(Default)]
pub(crate) struct FieldCollector {
    pub(crate) accepted: usize,
    pub(crate) defaulted: Vec<&'static str>,
    pub(crate) issues: Vec<FieldIssue>,
}

impl FieldCollector {
    /// Resolve one field: accepted value, or `default` when missing/rejected.
    pub(crate) fn take<T>(
        &mut self,
        field: &'static str,
        raw: Option<&Value>,
        default: T,
        coerce: impl FnOnce(&Value) -> Result<Accepted<T>, FieldIssue>,
    ) -> T {
        let Some(raw) = raw else {
            debug!(field, "field missing, using default");
            self.defaulted.push(field);
            return default;
        };
        match coerce(raw) {
            Ok((value, note)) => {
                self.accepted += 1;
                if let Some(note) = note {
                    note.log();
                    self.issues.push(note);
                }
                value
            }
            Err(issue) => {
                issue.log();
                self.issues.push(issue);
                self.defaulted.push(field);
                default
            }
        }
    }

    pub(crate) fn into_report(self, record: SpoolRecord) -> PayloadReport {
        PayloadReport::new(record, self.defaulted, self.issues)
    }
}

fn plain<T>(r: Result<T, FieldIssue>) -> Result<Accepted<T>, FieldIssue> {
    r.map(|v| (v, None))
}

pub fn decode_map(map: &Map<String, Value>) -> Result<PayloadReport, DecodeError> {
    debug!(fields = map.len(), "decoding map payload");

    let mut c = FieldCollector::default();

    let name = c.take(specs::NAME.field, map.get("name"), defaults::NAME.to_string(), |v| {
        coerce_str(&specs::NAME, v)
    });
    let material_type = c.take(specs::MATERIAL.field, map.get("type"), MaterialType::default(), |v| {
        coerce_material(&specs::MATERIAL, v)
    });
    let color = c.take(specs::COLOR.field, map.get("color"), Rgb(defaults::COLOR), |v| {
        coerce_color(&specs::COLOR, v)
    });
    let manufacturer = c.take(
        specs::MANUFACTURER.field,
        map.get("manufacturer"),
        defaults::MANUFACTURER.to_string(),
        |v| coerce_str(&specs::MANUFACTURER, v),
    );
    let density = c.take(specs::DENSITY.field, map.get("density"), specs::DENSITY.default, |v| {
        plain(coerce_float(&specs::DENSITY, v))
    });
    let diameter = c.take(specs::DIAMETER.field, map.get("diameter"), specs::DIAMETER.default, |v| {
        plain(coerce_float(&specs::DIAMETER, v))
    });
    let nozzle_temp = c.take(specs::NOZZLE_TEMP.field, map.get("nozzle_temp"), specs::NOZZLE_TEMP.default, |v| {
        plain(coerce_int(&specs::NOZZLE_TEMP, v))
    });
    let bed_temp = c.take(specs::BED_TEMP.field, map.get("bed_temp"), specs::BED_TEMP.default, |v| {
        plain(coerce_int(&specs::BED_TEMP, v))
    });
    let remaining_length = c.take(
        specs::REMAINING_LENGTH.field,
        map.get("remaining_length"),
        specs::REMAINING_LENGTH.default,
        |v| plain(coerce_float(&specs::REMAINING_LENGTH, v)),
    );
    let remaining_weight = c.take(
        specs::REMAINING_WEIGHT.field,
        map.get("remaining_weight"),
        specs::REMAINING_WEIGHT.default,
        |v| plain(coerce_float(&specs::REMAINING_WEIGHT, v)),
    );
    let manufacturing_info = take_manufacturing_info(&mut c, map.get("manufacturing_info"));

    if !map.is_empty() && c.accepted == 0 {
        warn!(provided = map.len(), "no valid fields found in non-empty payload");
        return Err(DecodeError::NoSalvageableData { provided: map.len() });
    }

    let record = SpoolRecord {
        material_type,
        color,
        diameter,
        nozzle_temp,
        bed_temp,
        density,
        remaining_length,
        remaining_weight,
        manufacturer,
        name,
        manufacturing_info,
    };
    Ok(c.into_report(record))
}

/// Nested `{"serial": .., "date": ..}`. Optional as a whole: only a present
/// but broken block counts against the outcome.
fn take_manufacturing_info(c: &mut FieldCollector, raw: Option<&Value>) -> ManufacturingInfo {
    let nested = match raw {
        None => return ManufacturingInfo::default(),
        Some(Value::Object(m)) => m,
        Some(other) => {
            let issue = FieldIssue::new(
                "manufacturing_info",
                FieldIssueKind::FieldTypeInvalid,
                format!("expected map, got {}", value_kind(other)),
            );
            issue.log();
            c.issues.push(issue);
            c.defaulted.push("manufacturing_info");
            return ManufacturingInfo::default();
        }
    };

    let serial = c.take(specs::SERIAL.field, nested.get("serial"), defaults::SERIAL.to_string(), |v| {
        coerce_str(&specs::SERIAL, v)
    });
    let date = c.take("date", nested.get("date"), defaults::MFG_DATE, |v| plain(coerce_date("date", v)));
    ManufacturingInfo { serial, date }
}
