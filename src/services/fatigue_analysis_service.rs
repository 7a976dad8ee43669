use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringPolicy;
use crate::models::{CompletedSession, FatigueAnalysis, FatigueMetrics, Recommendation, VolumeTrend};
use crate::services::recommendation_rules::select_rule;

/// Trailing window of history the analyzer looks at
pub const HISTORY_WINDOW_DAYS: i64 = 30;
const RECENT_WINDOW_DAYS: i64 = 7;
const PREVIOUS_WINDOW_DAYS: i64 = 14;

pub const COLD_START_REASON: &str = "Building baseline — continue normal training";

/// Points contributed by each fatigue signal before clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub volume: i32,
    pub frequency: i32,
    pub recovery: i32,
    pub trend: i32,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> i32 {
        self.volume + self.frequency + self.recovery + self.trend
    }

    /// Total clamped into the 0-100 score range
    pub fn score(&self) -> u8 {
        self.raw_total().clamp(0, 100) as u8
    }
}

/// Turns a user's recent training history into a fatigue assessment
#[derive(Debug, Clone, Default)]
pub struct FatigueAnalysisService {
    policy: ScoringPolicy,
}

impl FatigueAnalysisService {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    /// Default analysis used when there is not enough history, or none could be read
    pub fn cold_start(&self) -> FatigueAnalysis {
        FatigueAnalysis {
            fatigue_score: self.policy.cold_start_score.min(100),
            recommendation: Recommendation::Volume,
            reason: COLD_START_REASON.to_string(),
            metrics: FatigueMetrics::baseline(),
        }
    }

    /// Analyze completed sessions relative to `now`
    pub fn analyze(&self, sessions: &[CompletedSession], now: DateTime<Utc>) -> FatigueAnalysis {
        let metrics = match self.compute_metrics(sessions, now) {
            Some(metrics) => metrics,
            None => {
                debug!(
                    "Fewer than {} sessions in window, using cold start",
                    self.policy.min_sessions
                );
                return self.cold_start();
            }
        };

        let breakdown = self.score_breakdown(&metrics);
        let fatigue_score = breakdown.score();
        let rule = select_rule(fatigue_score, metrics.days_since_last_workout);

        debug!(
            volume = breakdown.volume,
            frequency = breakdown.frequency,
            recovery = breakdown.recovery,
            trend = breakdown.trend,
            fatigue_score,
            rule = rule.name,
            "Computed fatigue score"
        );

        FatigueAnalysis {
            fatigue_score,
            recommendation: rule.recommendation,
            reason: rule.reason.to_string(),
            metrics: FatigueMetrics {
                recent_volume_kg: metrics.recent_volume_kg.round(),
                avg_volume_kg: metrics.avg_volume_kg.round(),
                ..metrics
            },
        }
    }

    /// Unrounded metrics, or `None` when the window holds too few sessions
    pub fn compute_metrics(
        &self,
        sessions: &[CompletedSession],
        now: DateTime<Utc>,
    ) -> Option<FatigueMetrics> {
        let window_start = now - Duration::days(HISTORY_WINDOW_DAYS);
        let mut in_window: Vec<&CompletedSession> = sessions
            .iter()
            .filter(|s| s.is_completed() && s.started_at >= window_start && s.started_at <= now)
            .collect();

        if in_window.len() < self.policy.min_sessions.max(1) {
            return None;
        }

        in_window.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        let recent_start = now - Duration::days(RECENT_WINDOW_DAYS);
        let previous_start = now - Duration::days(PREVIOUS_WINDOW_DAYS);

        let recent: Vec<_> = in_window
            .iter()
            .filter(|s| s.started_at >= recent_start)
            .collect();
        let recent_volume_kg: f64 = recent.iter().map(|s| s.volume_kg()).sum();
        let previous_week_volume_kg: f64 = in_window
            .iter()
            .filter(|s| s.started_at >= previous_start && s.started_at < recent_start)
            .map(|s| s.volume_kg())
            .sum();

        let total_volume: f64 = in_window.iter().map(|s| s.volume_kg()).sum();
        let avg_volume_kg = total_volume / in_window.len() as f64;

        // in_window is non-empty and sorted newest first
        let days_since_last_workout = (now - in_window[0].started_at).num_days().max(0);

        Some(FatigueMetrics {
            recent_volume_kg,
            avg_volume_kg,
            workouts_last_7_days: recent.len() as u32,
            days_since_last_workout,
            volume_trend: self.volume_trend(recent_volume_kg, previous_week_volume_kg),
        })
    }

    fn volume_trend(&self, recent_volume_kg: f64, previous_week_volume_kg: f64) -> VolumeTrend {
        if previous_week_volume_kg == 0.0 {
            return VolumeTrend::Stable;
        }

        let change_pct =
            (recent_volume_kg - previous_week_volume_kg) / previous_week_volume_kg * 100.0;
        let threshold = self.policy.trend.change_threshold_pct;

        if change_pct > threshold {
            VolumeTrend::Increasing
        } else if change_pct < -threshold {
            VolumeTrend::Decreasing
        } else {
            VolumeTrend::Stable
        }
    }

    /// Score each of the four signals independently
    pub fn score_breakdown(&self, metrics: &FatigueMetrics) -> ScoreBreakdown {
        let volume_policy = &self.policy.volume;
        let (recent, avg) = (metrics.recent_volume_kg, metrics.avg_volume_kg);
        let volume = if recent > volume_policy.high_ratio * avg {
            volume_policy.high_points
        } else if recent > volume_policy.moderate_ratio * avg {
            volume_policy.moderate_points
        } else {
            0
        };

        let frequency_policy = &self.policy.frequency;
        let workouts = metrics.workouts_last_7_days;
        let frequency = if workouts >= frequency_policy.very_high_count {
            frequency_policy.very_high_points
        } else if workouts >= frequency_policy.high_count {
            frequency_policy.high_points
        } else if workouts >= frequency_policy.elevated_count {
            frequency_policy.elevated_points
        } else {
            0
        };

        let recovery_policy = &self.policy.recovery;
        let recovery = match metrics.days_since_last_workout {
            0 => recovery_policy.same_day_points,
            1 => recovery_policy.next_day_points,
            d if d >= recovery_policy.long_break_min_days => recovery_policy.long_break_points,
            d if d >= recovery_policy.short_break_min_days => recovery_policy.short_break_points,
            _ => 0,
        };

        let trend_policy = &self.policy.trend;
        let trend = match metrics.volume_trend {
            VolumeTrend::Increasing if metrics.recent_volume_kg > metrics.avg_volume_kg => {
                trend_policy.increasing_points
            }
            VolumeTrend::Decreasing => trend_policy.decreasing_points,
            _ => 0,
        };

        ScoreBreakdown {
            volume,
            frequency,
            recovery,
            trend,
        }
    }
}
