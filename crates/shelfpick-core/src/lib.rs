pub mod app_config;
pub mod config;
pub mod discount;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use discount::{Discount, DiscountField, DiscountType};
pub use products::{ProductEntry, ProductImage, VariantEntry, PLACEHOLDER_ID};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
