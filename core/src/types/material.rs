use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error, Clone, PartialEq, Eq)]
    pub enum MaterialParseError {
        #[error("invalid unit: {0}")]
        InvalidUnit(String),

        #[error("invalid material type: {0}")]
        InvalidMaterialType(String),

        #[error("invalid quantity: {0}")]
        InvalidQuantity(String),
    }
}

use error::MaterialParseError;

/// Grams per kilogram.
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Paper,
    Plastic,
    Glass,
    Metal,
    Organic,
    Electronic,
    Other,
}

impl MaterialType {
    pub const ALL: [MaterialType; 7] = [
        MaterialType::Paper,
        MaterialType::Plastic,
        MaterialType::Glass,
        MaterialType::Metal,
        MaterialType::Organic,
        MaterialType::Electronic,
        MaterialType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaterialType::Paper => "PAPER",
            MaterialType::Plastic => "PLASTIC",
            MaterialType::Glass => "GLASS",
            MaterialType::Metal => "METAL",
            MaterialType::Organic => "ORGANIC",
            MaterialType::Electronic => "ELECTRONIC",
            MaterialType::Other => "OTHER",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = MaterialParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MaterialType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MaterialParseError::InvalidMaterialType(s.to_string()))
    }
}

/// Unit a material quantity was weighed in.
///
/// Older documents spell the variants `KG` and `GRAMS`; both are still read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "KILOGRAM", alias = "KG")]
    Kilogram,
    #[serde(rename = "GRAM", alias = "GRAMS")]
    Gram,
}

impl WeightUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "KILOGRAM",
            WeightUnit::Gram => "GRAM",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = MaterialParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KILOGRAM" | "KILOGRAMS" | "KG" => Ok(WeightUnit::Kilogram),
            "GRAM" | "GRAMS" | "G" => Ok(WeightUnit::Gram),
            _ => Err(MaterialParseError::InvalidUnit(s.to_string())),
        }
    }
}

/// Converts a quantity to kilograms. No rounding is applied.
pub fn to_kilograms(quantity: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kilogram => quantity,
        WeightUnit::Gram => quantity / GRAMS_PER_KILOGRAM,
    }
}

/// One (type, quantity, unit) triple within a delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub quantity: f64,
    pub unit: WeightUnit,
}

impl Material {
    pub fn new(material_type: MaterialType, quantity: f64, unit: WeightUnit) -> Self {
        Self {
            material_type,
            quantity,
            unit,
        }
    }

    pub fn kilograms(&self) -> f64 {
        to_kilograms(self.quantity, self.unit)
    }
}

impl FromStr for Material {
    type Err = MaterialParseError;

    /// Parses `TYPE:QUANTITY:UNIT`, e.g. `PAPER:500:GRAM`.
    ///
    /// The quantity is only checked for being a number; positivity is
    /// enforced when the delivery is stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let material_type = parts.next().unwrap_or_default().parse::<MaterialType>()?;
        let quantity = parts
            .next()
            .and_then(|q| q.trim().parse::<f64>().ok())
            .ok_or_else(|| MaterialParseError::InvalidQuantity(s.to_string()))?;
        let unit = match parts.next() {
            Some(unit) => unit.parse::<WeightUnit>()?,
            None => return Err(MaterialParseError::InvalidUnit(s.to_string())),
        };
        Ok(Self::new(material_type, quantity, unit))
    }
}
