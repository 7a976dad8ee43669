use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::scoring::ScoringPolicy;

/// Settings the orchestrator needs for a single invocation
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub provider_timeout: Duration,
    pub template_lookback_sessions: usize,
    pub policy: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_millis(2000),
            template_lookback_sessions: 5,
            policy: ScoringPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub log_level: String,
    pub provider_timeout_ms: u64,
    pub scoring_policy_path: Option<PathBuf>,
    pub fixture_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let provider_timeout_ms = env::var("PROVIDER_TIMEOUT_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()
            .context("PROVIDER_TIMEOUT_MS must be a whole number of milliseconds")?;
        let scoring_policy_path = env::var("SCORING_POLICY_PATH").ok().map(PathBuf::from);
        let fixture_path = env::var("FIXTURE_PATH").ok().map(PathBuf::from);

        Ok(AppConfig {
            environment,
            log_level,
            provider_timeout_ms,
            scoring_policy_path,
            fixture_path,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Build the engine configuration, loading the scoring policy override if one is set
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let policy = match &self.scoring_policy_path {
            Some(path) => ScoringPolicy::from_file(path)?,
            None => ScoringPolicy::default(),
        };

        Ok(EngineConfig {
            provider_timeout: Duration::from_millis(self.provider_timeout_ms),
            policy,
            ..EngineConfig::default()
        })
    }
}
