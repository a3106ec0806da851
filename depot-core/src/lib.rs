pub mod app_config;
pub mod telemetry;

pub use app_config::{AnalyticsConfig, Config};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration failed: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Tracing setup failed: {0}")]
    Telemetry(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
