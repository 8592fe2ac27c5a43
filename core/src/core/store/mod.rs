//! Delivery store: the durable, append-ordered collection of deliveries.
//!
//! The whole collection is one JSON document under [`DELIVERIES_KEY`]. Every
//! mutation reads the document, changes it and writes it back in full; there
//! is no per-record addressing. With [`WriteMode::Unguarded`] two concurrent
//! appends on a shared store can both read the same collection and the later
//! write drops the earlier append. [`WriteMode::Serialized`] closes that race
//! with a store-wide lock.

use crate::aggregate::week_start;
use crate::core::db::{Database, DocumentMedium};
use crate::types::{Delivery, DeliveryId, NewDelivery, WriteMode, parse_date};
use chrono::{DateTime, Utc};
use error::{StoreError, ValidationError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Key of the single document holding every delivery.
pub const DELIVERIES_KEY: &str = "recyclafy-deliveries";

/// Prefix of ids assigned to submitted deliveries.
pub const DELIVERY_ID_PREFIX: &str = "delivery";

pub mod error {
    use crate::core::db::error::DatabaseError;
    use thiserror::Error;

    #[derive(Debug, Error, Clone, PartialEq)]
    pub enum ValidationError {
        #[error("missing required field: {0}")]
        MissingField(&'static str),

        #[error("no materials")]
        NoMaterials,

        #[error("materials[{index}].quantity must be a positive number, got {quantity}")]
        NonPositiveQuantity { index: usize, quantity: f64 },

        #[error("date is not a YYYY-MM-DD calendar date: {0:?}")]
        InvalidDate(String),
    }

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("validation error: {0}")]
        Validation(#[from] ValidationError),

        #[error("storage error: {0}")]
        Storage(#[from] DatabaseError),

        #[error("stored deliveries could not be decoded: {0}")]
        Corrupt(#[from] serde_json::Error),

        #[error("delivery {id} has a quantity that cannot be stored: {quantity}")]
        NonFiniteQuantity { id: String, quantity: f64 },
    }
}

/// Checks a submission before anything is written.
pub fn validate(new: &NewDelivery) -> Result<(), ValidationError> {
    let required = [
        ("date", &new.date),
        ("classId", &new.class_id),
        ("className", &new.class_name),
        ("unit", &new.unit),
    ];
    if let Some((field, _)) = required.into_iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(field));
    }

    // A date whose week cannot be bucketed would make every later summary fail.
    if parse_date(&new.date).and_then(week_start).is_none() {
        return Err(ValidationError::InvalidDate(new.date.clone()));
    }

    if new.materials.is_empty() {
        return Err(ValidationError::NoMaterials);
    }

    for (index, material) in new.materials.iter().enumerate() {
        // NaN fails the comparison and is rejected with the rest.
        if !(material.quantity > 0.0 && material.quantity.is_finite()) {
            return Err(ValidationError::NonPositiveQuantity {
                index,
                quantity: material.quantity,
            });
        }
    }

    Ok(())
}

pub struct DeliveryStore<M = Database> {
    medium: M,
    write_mode: WriteMode,
    write_lock: Mutex<()>,
}

impl<M: DocumentMedium> DeliveryStore<M> {
    pub fn new(medium: M, write_mode: WriteMode) -> Self {
        Self {
            medium,
            write_mode,
            write_lock: Mutex::new(()),
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }
}

/// Read operations.
impl<M: DocumentMedium> DeliveryStore<M> {
    /// Returns every stored delivery in append order.
    pub fn list_all(&self) -> Result<Vec<Delivery>, StoreError> {
        self.read_all()
    }
}

/// Write operations.
impl<M: DocumentMedium> DeliveryStore<M> {
    /// Validates and stores a new delivery at the end of the collection.
    ///
    /// The stored record gets a fresh id and `created_at = updated_at = now`.
    /// A rejected submission leaves the stored collection untouched.
    pub fn append(&self, new: NewDelivery, now: DateTime<Utc>) -> Result<Delivery, StoreError> {
        if let Err(err) = validate(&new) {
            warn!(class_id = %new.class_id, reason = %err, "delivery rejected");
            return Err(err.into());
        }

        let _guard = self.guard();

        let mut deliveries = self.read_all()?;
        let delivery = Delivery::from_new(new, DeliveryId::generate(DELIVERY_ID_PREFIX), now);
        deliveries.push(delivery.clone());
        self.write_all(&deliveries)?;

        info!(id = %delivery.id, count = deliveries.len(), "delivery appended");
        Ok(delivery)
    }

    /// Removes every delivery. Clearing an empty store is a no-op.
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.guard();

        self.medium.remove(DELIVERIES_KEY)?;
        info!("deliveries cleared");
        Ok(())
    }

    /// Replaces the whole collection with `deliveries` as given.
    ///
    /// Only the document shape is enforced here; the records are trusted to
    /// come from the demo generator or another system source. Non-finite
    /// quantities are refused since they cannot be read back.
    pub fn seed(&self, deliveries: &[Delivery]) -> Result<(), StoreError> {
        let _guard = self.guard();

        self.write_all(deliveries)?;
        info!(count = deliveries.len(), "deliveries seeded");
        Ok(())
    }
}

impl<M: DocumentMedium> DeliveryStore<M> {
    fn guard(&self) -> Option<MutexGuard<'_, ()>> {
        match self.write_mode {
            WriteMode::Unguarded => None,
            // The lock protects no data of its own, so a poisoned lock is still usable.
            WriteMode::Serialized => Some(
                self.write_lock
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            ),
        }
    }

    fn read_all(&self) -> Result<Vec<Delivery>, StoreError> {
        match self.medium.load(DELIVERIES_KEY)? {
            None => Ok(Vec::new()),
            Some(document) => Ok(serde_json::from_str(&document)?),
        }
    }

    fn write_all(&self, deliveries: &[Delivery]) -> Result<(), StoreError> {
        // serde_json writes NaN and infinity as `null`, which would not read back.
        for delivery in deliveries {
            if let Some(material) = delivery
                .materials
                .iter()
                .find(|m| !m.quantity.is_finite())
            {
                return Err(StoreError::NonFiniteQuantity {
                    id: delivery.id.to_string(),
                    quantity: material.quantity,
                });
            }
        }

        let document = serde_json::to_string(deliveries)?;
        self.medium.store(DELIVERIES_KEY, &document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
