//! record/material.rs
//! Closed material registry with an explicit `Unknown(code)` escape.
//!
//! `from_code` and `code` are exhaustive inverses for every known code, and
//! `Unknown(c).code() == c` so foreign tags re-encode unchanged.

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialType {
    PlaBasic,
    Pla,
    PetgBasic,
    Petg,
    Abs,
    Tpu,
    PlaCf,
    PaCf,
    PetCf,
    Asa,
    Pc,
    Pa,
    Support,
    Pva,
    Hips,
    Unknown(u16),
}

impl MaterialType {
    pub const KNOWN: [MaterialType; 15] = [
        MaterialType::PlaBasic,
        MaterialType::Pla,
        MaterialType::PetgBasic,
        MaterialType::Petg,
        MaterialType::Abs,
        MaterialType::Tpu,
        MaterialType::PlaCf,
        MaterialType::PaCf,
        MaterialType::PetCf,
        MaterialType::Asa,
        MaterialType::Pc,
        MaterialType::Pa,
        MaterialType::Support,
        MaterialType::Pva,
        MaterialType::Hips,
    ];

    pub fn from_code(code: u16) -> Self {
        match code {
            0 => MaterialType::PlaBasic,
            1 => MaterialType::Pla,
            2 => MaterialType::PetgBasic,
            3 => MaterialType::Petg,
            4 => MaterialType::Abs,
            5 => MaterialType::Tpu,
            6 => MaterialType::PlaCf,
            7 => MaterialType::PaCf,
            8 => MaterialType::PetCf,
            9 => MaterialType::Asa,
            10 => MaterialType::Pc,
            11 => MaterialType::Pa,
            12 => MaterialType::Support,
            13 => MaterialType::Pva,
            14 => MaterialType::Hips,
            other => MaterialType::Unknown(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            MaterialType::PlaBasic => 0,
            MaterialType::Pla => 1,
            MaterialType::PetgBasic => 2,
            MaterialType::Petg => 3,
            MaterialType::Abs => 4,
            MaterialType::Tpu => 5,
            MaterialType::PlaCf => 6,
            MaterialType::PaCf => 7,
            MaterialType::PetCf => 8,
            MaterialType::Asa => 9,
            MaterialType::Pc => 10,
            MaterialType::Pa => 11,
            MaterialType::Support => 12,
            MaterialType::Pva => 13,
            MaterialType::Hips => 14,
            MaterialType::Unknown(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialType::PlaBasic => "PLA Basic",
            MaterialType::Pla => "PLA",
            MaterialType::PetgBasic => "PETG Basic",
            MaterialType::Petg => "PETG",
            MaterialType::Abs => "ABS",
            MaterialType::Tpu => "TPU",
            MaterialType::PlaCf => "PLA-CF",
            MaterialType::PaCf => "PA-CF",
            MaterialType::PetCf => "PET-CF",
            MaterialType::Asa => "ASA",
            MaterialType::Pc => "PC",
            MaterialType::Pa => "PA",
            MaterialType::Support => "Support",
            MaterialType::Pva => "PVA",
            MaterialType::Hips => "HIPS",
            MaterialType::Unknown(_) => "Unknown",
        }
    }

    /// Case-insensitive lookup of a known material name.
    ///
    /// `-`, `_` and spaces are interchangeable (`pla_cf`, `PLA CF`, `PLA-CF`).
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = canonical(name);
        if wanted.is_empty() {
            return None;
        }
        Self::KNOWN
            .iter()
            .copied()
            .find(|m| canonical(m.name()) == wanted)
    }

    pub fn is_known(self) -> bool {
        !matches!(self, MaterialType::Unknown(_))
    }

    /// Typical nozzle and bed windows, used only for advisory warnings.
    pub fn temperature_profile(self) -> Option<TemperatureProfile> {
        let p = |nozzle: (u16, u16), bed: (u16, u16)| Some(TemperatureProfile { nozzle, bed });
        match self {
            MaterialType::Pla | MaterialType::PlaBasic => p((180, 230), (0, 80)),
            MaterialType::Petg | MaterialType::PetgBasic => p((230, 270), (70, 90)),
            MaterialType::Abs | MaterialType::Asa => p((240, 280), (80, 110)),
            MaterialType::Tpu => p((200, 240), (30, 70)),
            MaterialType::PlaCf | MaterialType::PaCf | MaterialType::PetCf => p((250, 290), (60, 90)),
            MaterialType::Support => p((180, 220), (30, 60)),
            MaterialType::Pva => p((190, 230), (45, 80)),
            _ => None,
        }
    }
}

fn canonical(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c.to_ascii_uppercase() })
        .collect()
}

impl Default for MaterialType {
    fn default() -> Self {
        MaterialType::Pla
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialType::Unknown(code) => write!(f, "Unknown(0x{:04x})", code),
            known => f.write_str(known.name()),
        }
    }
}

/// Advisory temperature windows (inclusive, degrees Celsius).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TemperatureProfile {
    pub nozzle: (u16, u16),
    pub bed: (u16, u16),
}

impl TemperatureProfile {
    pub fn nozzle_ok(&self, t: u16) -> bool {
        (self.nozzle.0..=self.nozzle.1).contains(&t)
    }

    pub fn bed_ok(&self, t: u16) -> bool {
        (self.bed.0..=self.bed.1).contains(&t)
    }
}

// Known materials serialize by name, unknown ones by raw code.
impl Serialize for MaterialType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaterialType::Unknown(code) => serializer.serialize_u16(*code),
            known => serializer.serialize_str(known.name()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialRepr {
    Code(u16),
    Name(String),
}

impl<'de> Deserialize<'de> for MaterialType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MaterialRepr::deserialize(deserializer)? {
            MaterialRepr::Code(code) => Ok(MaterialType::from_code(code)),
            MaterialRepr::Name(name) => MaterialType::from_name(&name).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown material name: {}", name))
            }),
        }
    }
}
