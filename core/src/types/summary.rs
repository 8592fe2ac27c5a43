//! Derived aggregate view over all deliveries. Never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::material::MaterialType;

/// How many classes the ranking keeps.
pub const TOP_CLASSES_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingSummary {
    /// Kilograms across every material of every delivery.
    pub total_recycled: f64,
    /// Kilograms per material; only materials that occur are present.
    pub material_breakdown: BTreeMap<MaterialType, f64>,
    pub top_classes: Vec<ClassTotal>,
    pub weekly_progress: Vec<WeeklyTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTotal {
    pub class_id: String,
    pub class_name: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotal {
    /// The Sunday that opens the week.
    pub week_start_date: NaiveDate,
    pub total: f64,
}
