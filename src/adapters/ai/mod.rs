//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models via `generateContent`
//! - `MockAIProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};

use crate::config::AiConfig;
use crate::ports::AIError;

/// Builds the Gemini provider described by `config`.
///
/// Fails with `MissingCredentials` when no API key is configured.
pub fn provider_from_config(config: &AiConfig) -> Result<GeminiProvider, AIError> {
    let api_key = config.api_key.clone().ok_or(AIError::MissingCredentials)?;

    let gemini = GeminiConfig::from_secret(api_key)
        .with_model(&config.model)
        .with_base_url(&config.base_url)
        .with_timeout(config.timeout());

    GeminiProvider::new(gemini)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AIProvider;
    use secrecy::Secret;

    #[test]
    fn missing_key_is_reported() {
        assert!(matches!(
            provider_from_config(&AiConfig::default()),
            Err(AIError::MissingCredentials)
        ));
    }

    #[test]
    fn provider_uses_configured_model() {
        let config = AiConfig {
            api_key: Some(Secret::new("AIza-test".to_string())),
            model: "gemini-1.5-pro".to_string(),
            ..Default::default()
        };

        let provider = provider_from_config(&config).unwrap();
        assert_eq!(provider.provider_info().model, "gemini-1.5-pro");
    }
}
