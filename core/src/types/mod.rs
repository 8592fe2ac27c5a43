pub(crate) mod config;
pub use config::{AppConfig, AppConfigError, Config, DemoConfig, StoreConfig, WriteMode};

pub(crate) mod material;
pub use material::error::MaterialParseError;
pub use material::{GRAMS_PER_KILOGRAM, Material, MaterialType, WeightUnit, to_kilograms};

pub(crate) mod delivery;
pub use delivery::{
    DATE_FORMAT, Delivery, DeliveryId, DeliveryIdError, NewDelivery, format_date, parse_date,
};

pub(crate) mod summary;
pub use summary::{ClassTotal, RecyclingSummary, TOP_CLASSES_LIMIT, WeeklyTotal};
