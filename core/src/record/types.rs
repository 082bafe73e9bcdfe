// ## 📂 File: `src/record/types.rs`

//! record/types.rs
//! The decoded spool value handed back to callers.
//!
//! A `SpoolRecord` is a plain value: built by `TagCodec::decode` or
//! `PayloadNormalizer::decode_payload`, consumed by the caller, never mutated
//! in place by this crate.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::record::{MaterialType, Rgb};

/// Serial number and production date printed on the spool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManufacturingInfo {
    pub serial: String,
    /// Unix timestamp (seconds).
    pub date: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoolRecord {
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub color: Rgb,
    /// Filament diameter in mm.
    pub diameter: f32,
    /// Nozzle temperature in degrees Celsius.
    pub nozzle_temp: u16,
    /// Bed temperature in degrees Celsius.
    pub bed_temp: u16,
    /// Material density in g/cm3.
    pub density: f32,
    /// Remaining filament length in m.
    pub remaining_length: f32,
    /// Remaining filament weight in g.
    pub remaining_weight: f32,
    pub manufacturer: String,
    pub name: String,
    #[serde(default)]
    pub manufacturing_info: ManufacturingInfo,
}

impl Default for SpoolRecord {
    /// Every field at the forgiving decoder's documented default.
    fn default() -> Self {
        Self {
            material_type: MaterialType::default(),
            color: Rgb(defaults::COLOR),
            diameter: defaults::DIAMETER,
            nozzle_temp: defaults::NOZZLE_TEMP,
            bed_temp: defaults::BED_TEMP,
            density: defaults::DENSITY,
            remaining_length: defaults::REMAINING_LENGTH,
            remaining_weight: defaults::REMAINING_WEIGHT,
            manufacturer: defaults::MANUFACTURER.to_string(),
            name: defaults::NAME.to_string(),
            manufacturing_info: ManufacturingInfo {
                serial: defaults::SERIAL.to_string(),
                date: defaults::MFG_DATE,
            },
        }
    }
}

impl SpoolRecord {
    /// Reference Bambu PLA Matte spool.
    pub fn sample() -> Self {
        Self {
            material_type: MaterialType::Pla,
            color: Rgb::new(0x1E, 0x88, 0xE5),
            diameter: 1.75,
            nozzle_temp: 220,
            bed_temp: 60,
            density: 1.24,
            remaining_length: 240.0,
            remaining_weight: 1000.0,
            manufacturer: "Bambu Lab".to_string(),
            name: "Bambu PLA Matte".to_string(),
            manufacturing_info: ManufacturingInfo {
                serial: "BL12345678".to_string(),
                date: 1_626_912_000,
            },
        }
    }

    /// Manufacturing date as UTC, `None` when unset (0).
    pub fn manufactured_at(&self) -> Option<DateTime<Utc>> {
        match self.manufacturing_info.date {
            0 => None,
            secs => Utc.timestamp_opt(i64::from(secs), 0).single(),
        }
    }

    /// Field-wise equality with the tolerances a float32 round trip allows.
    pub fn approx_eq(&self, other: &SpoolRecord) -> bool {
        self.material_type == other.material_type
            && self.color == other.color
            && (self.diameter - other.diameter).abs() <= 0.01
            && (self.density - other.density).abs() <= 0.01
            && self.nozzle_temp == other.nozzle_temp
            && self.bed_temp == other.bed_temp
            && (self.remaining_length - other.remaining_length).abs() <= 0.1
            && (self.remaining_weight.round() - other.remaining_weight.round()).abs() <= 1.0
            && self.manufacturer == other.manufacturer
            && self.name == other.name
            && self.manufacturing_info == other.manufacturing_info
    }
}
