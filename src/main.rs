use adaptive_coach::config::AppConfig;
use adaptive_coach::services::{AdaptiveWorkoutService, Fixture};
use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FIXTURE_PATH: &str = "fixtures/demo.json";

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let fixture_path = config
        .fixture_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_PATH));
    info!(
        environment = %config.environment,
        fixture = %fixture_path.display(),
        "Adaptive coach starting"
    );

    let fixture = Fixture::load(&fixture_path)?;
    let user_id = fixture.user_id;
    let now = fixture.now.unwrap_or_else(Utc::now);
    let providers = fixture.into_providers()?;

    let engine_config = config.engine_config()?;
    if config.is_development() {
        debug!(?engine_config, "Engine configuration");
    }

    let service = AdaptiveWorkoutService::new(
        providers.history,
        providers.templates,
        providers.catalog,
        engine_config,
    );

    let outcome = service.suggest_adaptive_workout(user_id, now).await;
    for notice in &outcome.notices {
        warn!("{}", notice.message());
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
