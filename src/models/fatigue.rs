use serde::{Deserialize, Serialize};

/// Sentinel used for `days_since_last_workout` when there is no usable history
pub const NO_HISTORY_DAYS: i64 = 999;

/// Categorical training-load guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Rest,
    Volume,
    Intensity,
}

impl Recommendation {
    /// Fixed volume adjustment reported alongside an adapted workout
    pub fn volume_adjustment_pct(&self) -> i32 {
        match self {
            Recommendation::Rest => -30,
            Recommendation::Volume => 0,
            Recommendation::Intensity => 15,
        }
    }

    /// Multiplier applied to the per-exercise time estimate
    pub fn duration_multiplier(&self) -> f64 {
        match self {
            Recommendation::Rest => 0.7,
            Recommendation::Volume => 1.0,
            Recommendation::Intensity => 1.2,
        }
    }

    /// Short marker used to decorate workout display names
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Rest => "Recovery",
            Recommendation::Volume => "Standard",
            Recommendation::Intensity => "Intensity",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Rest => "REST",
            Recommendation::Volume => "VOLUME",
            Recommendation::Intensity => "INTENSITY",
        }
    }
}

/// Week-over-week direction of training volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTrend {
    Increasing,
    Stable,
    Decreasing,
}

/// Intermediate measurements the fatigue score is derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueMetrics {
    pub recent_volume_kg: f64,
    pub avg_volume_kg: f64,
    pub workouts_last_7_days: u32,
    pub days_since_last_workout: i64,
    pub volume_trend: VolumeTrend,
}

impl FatigueMetrics {
    /// Zeroed metrics reported for a cold start
    pub fn baseline() -> Self {
        Self {
            recent_volume_kg: 0.0,
            avg_volume_kg: 0.0,
            workouts_last_7_days: 0,
            days_since_last_workout: NO_HISTORY_DAYS,
            volume_trend: VolumeTrend::Stable,
        }
    }
}

/// Result of running the fatigue analyzer over a user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueAnalysis {
    pub fatigue_score: u8, // 0-100, higher = more fatigued
    pub recommendation: Recommendation,
    pub reason: String,
    pub metrics: FatigueMetrics,
}
