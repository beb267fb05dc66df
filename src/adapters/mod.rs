//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - AI provider implementations (Gemini, mock)

pub mod ai;

pub use ai::{provider_from_config, GeminiConfig, GeminiProvider, MockAIProvider};
