use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a logged workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Completed,
    InProgress,
    Abandoned,
}

/// A finished workout as recorded by the logging flow. Never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: Option<i64>,
    pub total_volume_kg: Option<f64>, // sum of weight * reps across all sets
    pub status: SessionStatus,
}

impl CompletedSession {
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Volume contribution used by the analyzer; missing volume counts as zero
    pub fn volume_kg(&self) -> f64 {
        self.total_volume_kg.unwrap_or(0.0)
    }
}
