use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Volume overload signal: recent 7-day volume against the 30-day average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSignal {
    pub high_ratio: f64,
    pub high_points: i32,
    pub moderate_ratio: f64,
    pub moderate_points: i32,
}

impl Default for VolumeSignal {
    fn default() -> Self {
        Self {
            high_ratio: 1.5,
            high_points: 25,
            moderate_ratio: 1.2,
            moderate_points: 15,
        }
    }
}

/// Training frequency signal: workouts in the trailing 7 days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySignal {
    pub very_high_count: u32,
    pub very_high_points: i32,
    pub high_count: u32,
    pub high_points: i32,
    pub elevated_count: u32,
    pub elevated_points: i32,
}

impl Default for FrequencySignal {
    fn default() -> Self {
        Self {
            very_high_count: 6, // this many or more
            very_high_points: 25,
            high_count: 5,
            high_points: 15,
            elevated_count: 4,
            elevated_points: 10,
        }
    }
}

/// Recovery debt/credit signal: days since the last workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoverySignal {
    pub same_day_points: i32,
    pub next_day_points: i32,
    pub short_break_min_days: i64,
    pub short_break_points: i32,
    pub long_break_min_days: i64,
    pub long_break_points: i32,
}

impl Default for RecoverySignal {
    fn default() -> Self {
        Self {
            same_day_points: 25,
            next_day_points: 15,
            short_break_min_days: 4,
            short_break_points: -10,
            long_break_min_days: 7,
            long_break_points: -20,
        }
    }
}

/// Trend pressure signal: week-over-week volume change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSignal {
    pub change_threshold_pct: f64,
    pub increasing_points: i32,
    pub decreasing_points: i32,
}

impl Default for TrendSignal {
    fn default() -> Self {
        Self {
            change_threshold_pct: 20.0,
            increasing_points: 20,
            decreasing_points: -10,
        }
    }
}

/// Heuristic weights and thresholds behind the fatigue score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub min_sessions: usize,
    pub cold_start_score: u8,
    pub volume: VolumeSignal,
    pub frequency: FrequencySignal,
    pub recovery: RecoverySignal,
    pub trend: TrendSignal,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            min_sessions: 2,
            cold_start_score: 30,
            volume: VolumeSignal::default(),
            frequency: FrequencySignal::default(),
            recovery: RecoverySignal::default(),
            trend: TrendSignal::default(),
        }
    }
}

impl ScoringPolicy {
    /// Load a policy override from a JSON file; omitted fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring policy from {}", path.display()))?;
        let policy = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid scoring policy in {}", path.display()))?;
        Ok(policy)
    }
}
