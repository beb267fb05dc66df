//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BUILDCOST` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use buildcost::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Default area: {} sq.ft", config.estimate.default_area);
//! ```

mod ai;
mod error;
mod estimate;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use estimate::EstimateConfig;

use secrecy::Secret;
use serde::Deserialize;

/// Unprefixed variable accepted as the API key when the prefixed one is unset.
pub const LEGACY_API_KEY_VAR: &str = "API_KEY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI advisor configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Estimate defaults and catalog source
    #[serde(default)]
    pub estimate: EstimateConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BUILDCOST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `API_KEY` when `BUILDCOST__AI__API_KEY` is unset
    ///
    /// # Environment Variable Format
    ///
    /// - `BUILDCOST__AI__MODEL=gemini-2.0-flash` -> `ai.model`
    /// - `BUILDCOST__ESTIMATE__DEFAULT_AREA=1200` -> `estimate.default_area`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BUILDCOST")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if !config.ai.has_api_key() {
            if let Ok(key) = std::env::var(LEGACY_API_KEY_VAR) {
                if !key.trim().is_empty() {
                    config.ai.api_key = Some(Secret::new(key));
                }
            }
        }

        Ok(config)
    }

    /// Validate configuration needed for estimation
    ///
    /// The AI section is checked separately with [`AiConfig::validate`] so a
    /// missing key only disables the advisor.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any estimate setting is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.estimate.validate()?;
        Ok(())
    }
}
