mod app;
mod core;

pub use app::{AppConfig, AppConfigError, DemoConfig, StoreConfig};
pub use self::core::{Config, WriteMode};
