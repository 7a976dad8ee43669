pub mod app;
pub mod scoring;

pub use app::{AppConfig, EngineConfig};
pub use scoring::{FrequencySignal, RecoverySignal, ScoringPolicy, TrendSignal, VolumeSignal};
