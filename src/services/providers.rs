//! Boundaries to the data the engine reads but does not own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::models::{
    CompletedSession, ExerciseCategory, ExerciseRef, MuscleGroup, ValidationError, WorkoutTemplate,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
    #[error("Record not found: {0}")]
    NotFound(Uuid),
    #[error("Malformed record: {0}")]
    Malformed(#[from] ValidationError),
}

/// Reads a user's completed workout sessions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionHistoryProvider: Send + Sync {
    /// Completed sessions started at or after `since`, in any order
    async fn fetch_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<CompletedSession>, ProviderError>;

    /// The user's `limit` most recent completed sessions regardless of age
    async fn fetch_recent(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CompletedSession>, ProviderError>;
}

/// Loads a saved template with each exercise's most recent sets
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TemplateProvider: Send + Sync {
    async fn fetch_template(&self, template_id: Uuid) -> Result<WorkoutTemplate, ProviderError>;
}

/// Filterable exercise catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExerciseCatalogProvider: Send + Sync {
    async fn fetch_exercises(
        &self,
        muscle_groups: Vec<MuscleGroup>,
        category: ExerciseCategory,
        limit: usize,
    ) -> Result<Vec<ExerciseRef>, ProviderError>;
}
