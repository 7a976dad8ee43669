// Engine services and the provider boundary

pub mod providers;
pub mod recommendation_rules;
pub mod fatigue_analysis_service;
pub mod workout_adaptation_service;
pub mod preset_workout_service;
pub mod adaptive_workout_service;
pub mod in_memory;

pub use providers::{
    ExerciseCatalogProvider, ProviderError, SessionHistoryProvider, TemplateProvider,
};
pub use fatigue_analysis_service::FatigueAnalysisService;
pub use workout_adaptation_service::WorkoutAdaptationService;
pub use preset_workout_service::PresetWorkoutService;
pub use adaptive_workout_service::AdaptiveWorkoutService;
pub use in_memory::{
    Fixture, FixtureProviders, InMemoryCatalog, InMemorySessionHistory, InMemoryTemplates,
};
