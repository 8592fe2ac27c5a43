pub mod aggregate;
pub mod core;
pub mod demo;
pub mod types;

pub use aggregate::error::SummaryError;
pub use aggregate::{summarize, week_start};
pub use crate::core::RecyclafyCore;
pub use crate::core::db::error::DatabaseError;
pub use crate::core::db::{Database, DocumentMedium, MemoryMedium};
pub use crate::core::error::RecyclafyError;
pub use crate::core::store::error::{StoreError, ValidationError};
pub use crate::core::store::{DELIVERIES_KEY, DeliveryStore};
pub use demo::DemoOptions;
