//! Aggregation engine: turns the full delivery list into a [`RecyclingSummary`].
//!
//! Pure and stateless. Every call recomputes from the records it is given;
//! nothing is cached between calls.

use crate::types::{ClassTotal, Delivery, RecyclingSummary, TOP_CLASSES_LIMIT, WeeklyTotal};
use chrono::{Datelike, Days, NaiveDate};
use error::SummaryError;
use std::collections::{BTreeMap, HashMap};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error, Clone, PartialEq, Eq)]
    pub enum SummaryError {
        #[error("delivery {id} has an invalid date: {date:?}")]
        InvalidDate { id: String, date: String },
    }
}

/// Returns the Sunday that starts the week containing `date`.
///
/// `None` when that Sunday falls before [`NaiveDate::MIN`].
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset))
}

/// Computes totals, per-material breakdown, class ranking and weekly series.
///
/// Quantities are normalized to kilograms. Classes are keyed by `class_id`;
/// the name from the first delivery seen for an id is the one reported.
/// Ties in the ranking keep first-seen order.
pub fn summarize(deliveries: &[Delivery]) -> Result<RecyclingSummary, SummaryError> {
    let mut total_recycled = 0.0;
    let mut material_breakdown = BTreeMap::new();
    let mut class_totals: Vec<ClassTotal> = Vec::new();
    let mut class_index: HashMap<&str, usize> = HashMap::new();
    let mut weekly_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for delivery in deliveries {
        // Only materials contribute; a delivery without any leaves no trace.
        if delivery.materials.is_empty() {
            continue;
        }

        let week = delivery
            .parsed_date()
            .and_then(week_start)
            .ok_or_else(|| SummaryError::InvalidDate {
                id: delivery.id.to_string(),
                date: delivery.date.clone(),
            })?;

        let slot = *class_index
            .entry(delivery.class_id.as_str())
            .or_insert_with(|| {
                class_totals.push(ClassTotal {
                    class_id: delivery.class_id.clone(),
                    class_name: delivery.class_name.clone(),
                    total: 0.0,
                });
                class_totals.len() - 1
            });

        for material in &delivery.materials {
            let kilograms = material.kilograms();

            total_recycled += kilograms;
            *material_breakdown
                .entry(material.material_type)
                .or_insert(0.0) += kilograms;
            class_totals[slot].total += kilograms;
            *weekly_totals.entry(week).or_insert(0.0) += kilograms;
        }
    }

    // `sort_by` is stable, so equal totals stay in first-seen order.
    let mut top_classes = class_totals;
    top_classes.sort_by(|a, b| b.total.total_cmp(&a.total));
    top_classes.truncate(TOP_CLASSES_LIMIT);

    let weekly_progress = weekly_totals
        .into_iter()
        .map(|(week_start_date, total)| WeeklyTotal {
            week_start_date,
            total,
        })
        .collect();

    Ok(RecyclingSummary {
        total_recycled,
        material_breakdown,
        top_classes,
        weekly_progress,
    })
}
