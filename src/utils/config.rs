//! Environment-driven configuration for the production capability wiring.

use serde::Deserialize;
use std::env;

/// Runtime configuration for the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Generation backend settings.
    pub llm: LlmConfig,
    /// Retrieval backend settings.
    pub retrieval: RetrievalConfig,
}

/// Settings for the OpenAI-compatible generation backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Default API key. A credential passed to `run` takes precedence.
    pub api_key: Option<String>,
}

/// Settings for the web retrieval backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of source documents fetched per run.
    pub max_sources: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                api_base: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: None,
            },
            retrieval: RetrievalConfig { max_sources: 5 },
        }
    }
}

impl EngineConfig {
    /// Build a configuration from environment variables, loading `.env`
    /// first. Unset variables fall back to the defaults above.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(EngineConfig {
            llm: LlmConfig {
                api_base: env::var("DOSSIER_API_BASE").unwrap_or(defaults.llm.api_base),
                model: env::var("DOSSIER_MODEL").unwrap_or(defaults.llm.model),
                api_key: env::var("OPENAI_API_KEY").ok(),
            },
            retrieval: RetrievalConfig {
                max_sources: match env::var("DOSSIER_MAX_SOURCES") {
                    Ok(raw) => raw.parse()?,
                    Err(_) => defaults.retrieval.max_sources,
                },
            },
        })
    }
}
