use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExercisePrescription, FatigueAnalysis, Recommendation};

/// How personalized a suggestion is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,   // adapted from the user's own template
    Medium, // generic preset
    Low,    // preset without catalog data
}

/// Today's workout, adapted to the user's current fatigue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptedWorkout {
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub exercises: Vec<ExercisePrescription>,
    pub estimated_duration_minutes: u32,
    pub confidence: Confidence,
    pub reason: String,
    pub fatigue_score: u8,
    pub adaptation_type: Recommendation,
    pub adaptation_reason: String,
    pub volume_adjustment_pct: i32,
}

/// Non-adaptive shape used by preview/launcher screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedWorkout {
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub exercises: Vec<ExercisePrescription>,
    pub estimated_duration_minutes: u32,
    pub confidence: Confidence,
    pub reason: String,
}

impl From<AdaptedWorkout> for SuggestedWorkout {
    fn from(workout: AdaptedWorkout) -> Self {
        Self {
            template_id: workout.template_id,
            template_name: workout.template_name,
            exercises: workout.exercises,
            estimated_duration_minutes: workout.estimated_duration_minutes,
            confidence: workout.confidence,
            reason: workout.reason,
        }
    }
}

/// Non-fatal conditions the caller should surface to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineNotice {
    HistoryUnavailable,
    RecentSessionsUnavailable,
    TemplateUnavailable { template_id: Uuid },
    CatalogUnavailable,
}

impl EngineNotice {
    pub fn message(&self) -> &'static str {
        match self {
            EngineNotice::HistoryUnavailable => {
                "Training history is temporarily unavailable - personalization is limited"
            }
            EngineNotice::RecentSessionsUnavailable => {
                "Recent workouts could not be loaded - using a preset workout"
            }
            EngineNotice::TemplateUnavailable { .. } => {
                "Your usual template could not be loaded - using a preset workout"
            }
            EngineNotice::CatalogUnavailable => "Exercise catalog is temporarily unavailable",
        }
    }
}

/// Engine result plus any degraded-mode notices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveWorkoutOutcome {
    pub workout: AdaptedWorkout,
    pub notices: Vec<EngineNotice>,
}

impl AdaptiveWorkoutOutcome {
    /// True when the fatigue score fell back to the cold-start default
    pub fn personalization_limited(&self) -> bool {
        self.notices.contains(&EngineNotice::HistoryUnavailable)
    }
}

/// Standalone fatigue assessment plus any degraded-mode notices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueOutcome {
    pub analysis: FatigueAnalysis,
    pub notices: Vec<EngineNotice>,
}
