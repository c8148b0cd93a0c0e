use std::sync::Arc;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

use crate::interpreter::{LlmConfig, LlmQueryInterpreter, PassthroughInterpreter, QueryInterpreter};
use crate::service::{DEFAULT_TOP_K, MAX_TOP_K};

/// How free-text queries are interpreted
#[derive(Debug, Clone)]
pub enum InterpreterConfig {
    Llm(LlmConfig),
    Passthrough,
}

impl InterpreterConfig {
    pub fn build(self) -> Arc<dyn QueryInterpreter> {
        match self {
            InterpreterConfig::Llm(config) => Arc::new(LlmQueryInterpreter::new(config)),
            InterpreterConfig::Passthrough => Arc::new(PassthroughInterpreter),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub interpreter: InterpreterConfig,
    pub default_top_k: u32,
}

impl FromEnv for SearchConfig {
    /// - SEARCH_INTERPRETER: llm (default) or none
    /// - SEARCH_DEFAULT_TOP_K: defaults to 100, max 1000
    fn from_env() -> Result<Self, ConfigError> {
        let interpreter = match env_or_default("SEARCH_INTERPRETER", "llm")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "llm" => InterpreterConfig::Llm(LlmConfig::from_env()?),
            "none" => InterpreterConfig::Passthrough,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "SEARCH_INTERPRETER".to_string(),
                    details: format!("expected llm or none, got '{}'", other),
                });
            }
        };

        let default_top_k: u32 = env_parse("SEARCH_DEFAULT_TOP_K", &DEFAULT_TOP_K.to_string())?;
        if !(1..=MAX_TOP_K).contains(&default_top_k) {
            return Err(ConfigError::InvalidValue {
                key: "SEARCH_DEFAULT_TOP_K".to_string(),
                details: format!("must be between 1 and {}", MAX_TOP_K),
            });
        }

        Ok(Self {
            interpreter,
            default_top_k,
        })
    }
}
