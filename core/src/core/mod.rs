//! Core facade combining the delivery store with aggregation and demo data.
//!
//! These are the operations the front ends call: submit a delivery, list
//! deliveries, get the summary, and the two administrative actions.

use crate::aggregate::error::SummaryError;
use crate::aggregate::summarize;
use crate::core::db::Database;
use crate::core::db::error::DatabaseError;
use crate::core::store::DeliveryStore;
use crate::core::store::error::StoreError;
use crate::demo::{DemoOptions, generate_with};
use crate::types::{Config, Delivery, NewDelivery, RecyclingSummary, WriteMode};
use chrono::{DateTime, NaiveDate, Utc};
use error::RecyclafyError;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod db;
pub mod store;

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum RecyclafyError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error(transparent)]
        Store(#[from] StoreError),

        #[error("Summary error: {0}")]
        Summary(#[from] SummaryError),
    }
}

pub struct RecyclafyCore {
    base_path: PathBuf,
    store: DeliveryStore<Database>,
}

impl RecyclafyCore {
    pub fn open(config: Config) -> Result<Self, RecyclafyError> {
        let db = Database::new(&config)?;
        info!(
            path = %config.base_path.display(),
            write_mode = %config.write_mode,
            "recyclafy opened"
        );
        Ok(Self {
            base_path: config.base_path,
            store: DeliveryStore::new(db, config.write_mode),
        })
    }

    /// Returns the base data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.base_path
    }

    pub fn write_mode(&self) -> WriteMode {
        self.store.write_mode()
    }
}

/// Read operations.
impl RecyclafyCore {
    /// All deliveries in submission order.
    pub fn deliveries(&self) -> Result<Vec<Delivery>, RecyclafyError> {
        Ok(self.store.list_all()?)
    }

    /// Summary of the store as it is right now.
    pub fn summary(&self) -> Result<RecyclingSummary, RecyclafyError> {
        let deliveries = self.store.list_all()?;
        Ok(summarize(&deliveries)?)
    }
}

/// Write operations.
impl RecyclafyCore {
    pub fn submit_delivery(
        &self,
        delivery: NewDelivery,
        now: DateTime<Utc>,
    ) -> Result<Delivery, RecyclafyError> {
        Ok(self.store.append(delivery, now)?)
    }

    /// Replaces every stored delivery with a freshly generated demo batch.
    ///
    /// Returns the number of records seeded.
    pub fn add_demo_data<R: Rng + ?Sized>(
        &self,
        options: DemoOptions,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<usize, RecyclafyError> {
        let deliveries = generate_with(options, today, rng);
        self.store.seed(&deliveries)?;
        Ok(deliveries.len())
    }

    pub fn clear_all_data(&self) -> Result<(), RecyclafyError> {
        Ok(self.store.clear()?)
    }
}
