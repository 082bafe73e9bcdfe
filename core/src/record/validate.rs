//! record/validate.rs
//! Field specs (ranges, byte limits, defaults) and the recovered-issue type.
//!
//! Both decode paths resolve violations by substitution: an out-of-range or
//! non-finite number becomes the field default, an over-long string is cut
//! at a char boundary. Nothing here fails.

use std::fmt;
use serde::Serialize;
use tracing::warn;

use crate::constants::{defaults, limits};
use crate::record::SpoolRecord;
use crate::utils::truncate_utf8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FieldIssueKind {
    /// Value could not be coerced to the declared type.
    FieldTypeInvalid,
    /// Value coerced but lies outside the declared range (or is NaN/inf).
    FieldOutOfRange,
    /// String longer than its byte limit; kept truncated.
    Truncated,
}

/// A field-level problem that was recovered locally.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub kind: FieldIssueKind,
    pub detail: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, kind: FieldIssueKind, detail: impl Into<String>) -> Self {
        Self { field, kind, detail: detail.into() }
    }

    /// True when the field ended up at its default.
    pub fn defaulted(&self) -> bool {
        self.kind != FieldIssueKind::Truncated
    }

    pub(crate) fn log(&self) {
        warn!(field = self.field, kind = ?self.kind, "{}", self.detail);
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}: {}", self.field, self.kind, self.detail)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatSpec {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f32,
}

impl FloatSpec {
    pub fn accepts(&self, v: f64) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }

    pub fn out_of_range(&self, v: f64) -> FieldIssue {
        FieldIssue::new(
            self.field,
            FieldIssueKind::FieldOutOfRange,
            format!("value {} outside [{}, {}], using default {}", v, self.min, self.max, self.default),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntSpec {
    pub field: &'static str,
    pub min: u16,
    pub max: u16,
    pub default: u16,
}

impl IntSpec {
    pub fn accepts(&self, v: i64) -> bool {
        v >= i64::from(self.min) && v <= i64::from(self.max)
    }

    pub fn out_of_range(&self, v: impl fmt::Display) -> FieldIssue {
        FieldIssue::new(
            self.field,
            FieldIssueKind::FieldOutOfRange,
            format!("value {} outside [{}, {}], using default {}", v, self.min, self.max, self.default),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StrSpec {
    pub field: &'static str,
    pub max_bytes: usize,
    pub default: &'static str,
}

impl StrSpec {
    /// Truncate to the byte limit, reporting when it happened.
    pub fn bound(&self, s: &str) -> (String, Option<FieldIssue>) {
        let cut = truncate_utf8(s, self.max_bytes);
        if cut.len() == s.len() {
            return (s.to_string(), None);
        }
        let issue = FieldIssue::new(
            self.field,
            FieldIssueKind::Truncated,
            format!("string truncated from {} to {} bytes", s.len(), cut.len()),
        );
        (cut.to_string(), Some(issue))
    }
}

pub mod specs {
    use super::*;

    pub const NAME: StrSpec = StrSpec { field: "name", max_bytes: limits::NAME, default: defaults::NAME };
    pub const MATERIAL: StrSpec = StrSpec { field: "type", max_bytes: limits::MATERIAL, default: "PLA" };
    pub const COLOR: StrSpec = StrSpec { field: "color", max_bytes: limits::COLOR, default: "#FFFFFF" };
    pub const MANUFACTURER: StrSpec =
        StrSpec { field: "manufacturer", max_bytes: limits::MANUFACTURER, default: defaults::MANUFACTURER };
    pub const SERIAL: StrSpec = StrSpec { field: "serial", max_bytes: limits::SERIAL, default: defaults::SERIAL };

    pub const DENSITY: FloatSpec = FloatSpec { field: "density", min: 0.5, max: 5.0, default: defaults::DENSITY };
    pub const DIAMETER: FloatSpec = FloatSpec { field: "diameter", min: 1.0, max: 3.0, default: defaults::DIAMETER };
    pub const REMAINING_LENGTH: FloatSpec =
        FloatSpec { field: "remaining_length", min: 0.0, max: 10_000.0, default: defaults::REMAINING_LENGTH };
    pub const REMAINING_WEIGHT: FloatSpec =
        FloatSpec { field: "remaining_weight", min: 0.0, max: 5_000.0, default: defaults::REMAINING_WEIGHT };

    pub const NOZZLE_TEMP: IntSpec = IntSpec { field: "nozzle_temp", min: 150, max: 350, default: defaults::NOZZLE_TEMP };
    pub const BED_TEMP: IntSpec = IntSpec { field: "bed_temp", min: 0, max: 150, default: defaults::BED_TEMP };
}

fn bound_float(spec: &FloatSpec, value: &mut f32, issues: &mut Vec<FieldIssue>) {
    if !spec.accepts(f64::from(*value)) {
        issues.push(spec.out_of_range(f64::from(*value)));
        *value = spec.default;
    }
}

fn bound_int(spec: &IntSpec, value: &mut u16, issues: &mut Vec<FieldIssue>) {
    if !spec.accepts(i64::from(*value)) {
        issues.push(spec.out_of_range(*value));
        *value = spec.default;
    }
}

fn bound_str(spec: &StrSpec, value: &mut String, issues: &mut Vec<FieldIssue>) {
    let (bounded, issue) = spec.bound(value);
    if let Some(issue) = issue {
        issues.push(issue);
        *value = bounded;
    }
}

impl SpoolRecord {
    /// Pull every field back inside its documented range.
    ///
    /// Returns the recovered issues; logging them is up to the caller. A
    /// record that is already valid comes back unchanged with an empty list.
    pub fn enforce_ranges(&mut self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        bound_float(&specs::DIAMETER, &mut self.diameter, &mut issues);
        bound_float(&specs::DENSITY, &mut self.density, &mut issues);
        bound_float(&specs::REMAINING_LENGTH, &mut self.remaining_length, &mut issues);
        bound_float(&specs::REMAINING_WEIGHT, &mut self.remaining_weight, &mut issues);
        bound_int(&specs::NOZZLE_TEMP, &mut self.nozzle_temp, &mut issues);
        bound_int(&specs::BED_TEMP, &mut self.bed_temp, &mut issues);
        bound_str(&specs::NAME, &mut self.name, &mut issues);
        bound_str(&specs::MANUFACTURER, &mut self.manufacturer, &mut issues);
        bound_str(&specs::SERIAL, &mut self.manufacturing_info.serial, &mut issues);
        issues
    }

    /// True when every field already lies within its documented range.
    pub fn is_within_ranges(&self) -> bool {
        self.clone().enforce_ranges().is_empty()
    }
}
