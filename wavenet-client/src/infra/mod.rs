//! HTTP adapters, configuration, logging and test doubles.

pub mod api_client;
pub mod config;
pub mod logging;
pub mod services;
pub mod testing;

pub use api_client::{ApiClient, ApiError};
pub use config::{Config, FormConfig};
