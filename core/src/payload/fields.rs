//! payload/fields.rs
//! Per-field coercion of loosely typed values.
//!
//! Every function returns either the accepted value or a `FieldIssue`; the
//! caller substitutes the default. Numeric strings are accepted, booleans,
//! lists and objects are not. NaN and infinities count as out of range.

use serde_json::Value;

use crate::record::{FieldIssue, FieldIssueKind, FloatSpec, IntSpec, MaterialType, Rgb, StrSpec};

/// Accepted value plus an optional non-fatal note (truncation).
pub type Accepted<T> = (T, Option<FieldIssue>);

fn type_invalid(field: &'static str, expected: &str, got: &Value) -> FieldIssue {
    FieldIssue::new(
        field,
        FieldIssueKind::FieldTypeInvalid,
        format!("expected {}, got {}", expected, value_kind(got)),
    )
}

pub fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Numbers and numeric strings as f64 (may be non-finite).
fn as_number(field: &'static str, v: &Value) -> Result<f64, FieldIssue> {
    match v {
        Value::Number(n) => n.as_f64().ok_or_else(|| type_invalid(field, "number", v)),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            FieldIssue::new(
                field,
                FieldIssueKind::FieldTypeInvalid,
                format!("string {:?} is not numeric", s),
            )
        }),
        other => Err(type_invalid(field, "number", other)),
    }
}

pub fn coerce_str(spec: &StrSpec, v: &Value) -> Result<Accepted<String>, FieldIssue> {
    let raw = match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(type_invalid(spec.field, "string", other)),
    };
    Ok(spec.bound(&raw))
}

pub fn coerce_float(spec: &FloatSpec, v: &Value) -> Result<f32, FieldIssue> {
    let f = as_number(spec.field, v)?;
    if !spec.accepts(f) {
        return Err(spec.out_of_range(f));
    }
    Ok(f as f32)
}

/// Integers truncate toward zero, so `"215.7"` reads as 215.
pub fn coerce_int(spec: &IntSpec, v: &Value) -> Result<u16, FieldIssue> {
    let f = as_number(spec.field, v)?;
    if !f.is_finite() {
        return Err(spec.out_of_range(f));
    }
    let i = f.trunc() as i64;
    if !spec.accepts(i) {
        return Err(spec.out_of_range(i));
    }
    // accepts() keeps i inside the u16 field range.
    Ok(i as u16)
}

/// Over-long strings are cut to 7 bytes first, so `#1E88E5FF` reads as
/// `#1E88E5` with a truncation note.
pub fn coerce_color(spec: &StrSpec, v: &Value) -> Result<Accepted<Rgb>, FieldIssue> {
    let Value::String(s) = v else {
        return Err(type_invalid(spec.field, "#RRGGBB string", v));
    };
    let (bounded, note) = spec.bound(s.trim());
    let rgb = bounded.parse::<Rgb>().map_err(|e| {
        FieldIssue::new(spec.field, FieldIssueKind::FieldOutOfRange, format!("{}, using default {}", e, spec.default))
    })?;
    Ok((rgb, note))
}

/// Material by name (case-insensitive) or by raw code.
///
/// Unknown names are rejected; unknown codes become `MaterialType::Unknown`.
pub fn coerce_material(spec: &StrSpec, v: &Value) -> Result<Accepted<MaterialType>, FieldIssue> {
    match v {
        Value::Number(_) => {
            let code = as_number(spec.field, v)?;
            if !code.is_finite() || code < 0.0 || code > f64::from(u16::MAX) || code.fract() != 0.0 {
                return Err(FieldIssue::new(
                    spec.field,
                    FieldIssueKind::FieldOutOfRange,
                    format!("material code {} is not a u16", code),
                ));
            }
            Ok((MaterialType::from_code(code as u16), None))
        }
        Value::String(s) => {
            let (name, note) = spec.bound(s);
            MaterialType::from_name(&name)
                .map(|m| (m, note))
                .ok_or_else(|| {
                    FieldIssue::new(
                        spec.field,
                        FieldIssueKind::FieldOutOfRange,
                        format!("unknown material {:?}, using default {}", name, spec.default),
                    )
                })
        }
        other => Err(type_invalid(spec.field, "material name or code", other)),
    }
}

pub fn coerce_date(field: &'static str, v: &Value) -> Result<u32, FieldIssue> {
    let f = as_number(field, v)?;
    if !f.is_finite() || f < 0.0 || f > f64::from(u32::MAX) {
        return Err(FieldIssue::new(
            field,
            FieldIssueKind::FieldOutOfRange,
            format!("timestamp {} outside u32 range", f),
        ));
    }
    Ok(f.trunc() as u32)
}
