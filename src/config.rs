use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub llm: Option<LlmConfig>,
}

/// Settings for the workout suggestion endpoint. Absent when `LLM_ENDPOINT`
/// is not set.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:ironlog.db?mode=rwc".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            llm: LlmConfig::from_env(),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LlmConfig {
    pub fn from_env() -> Option<Self> {
        let endpoint = env::var("LLM_ENDPOINT").ok().filter(|e| !e.trim().is_empty())?;
        let timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);

        Some(Self {
            endpoint,
            api_key: env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
