use chrono::{DateTime, NaiveDate, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::material::Material;

/// Calendar dates are stored as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored calendar date. Time components are not accepted.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct DeliveryId(String);

impl DeliveryId {
    /// Generates a fresh id of the form `<prefix>-<uuid>`.
    pub fn generate(prefix: &str) -> Self {
        Self::try_new(format!("{prefix}-{}", Uuid::new_v4()))
            .expect("uuid-based id is never empty")
    }
}

/// Delivery fields as submitted, before an id and timestamps are assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub date: String,
    pub class_id: String,
    pub class_name: String,
    pub unit: String,
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A stored delivery record.
///
/// Records are never edited after creation, so `updated_at` always equals
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: DeliveryId,
    pub date: String,
    pub class_id: String,
    pub class_name: String,
    pub unit: String,
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn from_new(new: NewDelivery, id: DeliveryId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            date: new.date,
            class_id: new.class_id,
            class_name: new.class_name,
            unit: new.unit,
            materials: new.materials,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Sum of all materials in kilograms.
    pub fn total_kilograms(&self) -> f64 {
        self.materials.iter().map(Material::kilograms).sum()
    }
}
