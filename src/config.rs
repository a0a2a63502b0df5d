use crate::ai::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::error::ConfigError;
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "EXAM_DRILL_MODEL";
pub const MAX_TOKENS_VAR: &str = "EXAM_DRILL_MAX_TOKENS";
pub const LOG_VAR: &str = "EXAM_DRILL_LOG";

pub const DEFAULT_LOG_FILE: &str = "exam_drill.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub max_tokens: u32,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // The key itself is read by openrouter_api; it only has to exist here.
        match lookup(API_KEY_VAR) {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing(API_KEY_VAR)),
        }

        let model = lookup(MODEL_VAR)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_tokens = match lookup(MAX_TOKENS_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: MAX_TOKENS_VAR,
                        value: raw,
                    });
                }
            },
            None => DEFAULT_MAX_TOKENS,
        };

        let log_path = lookup(LOG_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            model,
            max_tokens,
            log_path,
        })
    }
}
