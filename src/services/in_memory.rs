//! In-memory providers backed by provider-shaped JSON records.
//!
//! Used by the demo binary and by tests. Templates are stored raw and only
//! validated when fetched, so a malformed record surfaces as
//! `ProviderError::Malformed` exactly as it would from a real store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    CompletedSession, ExerciseCategory, ExerciseRef, MuscleGroup, RawExercise, RawSession,
    RawWorkoutTemplate, ValidationError, WorkoutTemplate,
};
use crate::services::providers::{
    ExerciseCatalogProvider, ProviderError, SessionHistoryProvider, TemplateProvider,
};

fn newest_first(mut sessions: Vec<CompletedSession>) -> Vec<CompletedSession> {
    sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    sessions
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionHistory {
    sessions: Vec<CompletedSession>,
}

impl InMemorySessionHistory {
    pub fn new(sessions: Vec<CompletedSession>) -> Self {
        Self { sessions }
    }

    pub fn from_raw(records: Vec<RawSession>) -> Result<Self, ValidationError> {
        let sessions = records
            .into_iter()
            .map(CompletedSession::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(sessions))
    }

    fn completed_for(&self, user_id: Uuid) -> impl Iterator<Item = &CompletedSession> {
        self.sessions
            .iter()
            .filter(move |s| s.user_id == user_id && s.is_completed())
    }
}

#[async_trait]
impl SessionHistoryProvider for InMemorySessionHistory {
    async fn fetch_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<CompletedSession>, ProviderError> {
        let sessions = self
            .completed_for(user_id)
            .filter(|s| s.started_at >= since)
            .cloned()
            .collect();
        Ok(newest_first(sessions))
    }

    async fn fetch_recent(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CompletedSession>, ProviderError> {
        let sessions = newest_first(self.completed_for(user_id).cloned().collect());
        Ok(sessions.into_iter().take(limit).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    templates: HashMap<Uuid, RawWorkoutTemplate>,
}

impl InMemoryTemplates {
    pub fn new(records: Vec<RawWorkoutTemplate>) -> Self {
        let templates = records
            .into_iter()
            .filter_map(|raw| {
                // records without a parseable id can never be requested
                let id = Uuid::parse_str(raw.id.as_deref()?.trim()).ok()?;
                Some((id, raw))
            })
            .collect();
        Self { templates }
    }
}

#[async_trait]
impl TemplateProvider for InMemoryTemplates {
    async fn fetch_template(&self, template_id: Uuid) -> Result<WorkoutTemplate, ProviderError> {
        let raw = self
            .templates
            .get(&template_id)
            .ok_or(ProviderError::NotFound(template_id))?;
        Ok(WorkoutTemplate::try_from(raw.clone())?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    exercises: Vec<ExerciseRef>,
}

impl InMemoryCatalog {
    pub fn new(exercises: Vec<ExerciseRef>) -> Self {
        Self { exercises }
    }

    pub fn from_raw(records: Vec<RawExercise>) -> Result<Self, ValidationError> {
        let exercises = records
            .into_iter()
            .map(ExerciseRef::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(exercises))
    }
}

#[async_trait]
impl ExerciseCatalogProvider for InMemoryCatalog {
    async fn fetch_exercises(
        &self,
        muscle_groups: Vec<MuscleGroup>,
        category: ExerciseCategory,
        limit: usize,
    ) -> Result<Vec<ExerciseRef>, ProviderError> {
        Ok(self
            .exercises
            .iter()
            .filter(|e| e.category == category && muscle_groups.contains(&e.muscle_group))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// A JSON snapshot of one user's data, as served by the demo binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub user_id: Uuid,
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sessions: Vec<RawSession>,
    #[serde(default)]
    pub templates: Vec<RawWorkoutTemplate>,
    #[serde(default)]
    pub exercises: Vec<RawExercise>,
}

/// Providers built from a fixture
pub struct FixtureProviders {
    pub history: Arc<InMemorySessionHistory>,
    pub templates: Arc<InMemoryTemplates>,
    pub catalog: Arc<InMemoryCatalog>,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid fixture JSON in {}", path.display()))
    }

    pub fn into_providers(self) -> Result<FixtureProviders> {
        let history =
            InMemorySessionHistory::from_raw(self.sessions).context("Invalid session record")?;
        let catalog = InMemoryCatalog::from_raw(self.exercises).context("Invalid exercise record")?;

        Ok(FixtureProviders {
            history: Arc::new(history),
            templates: Arc::new(InMemoryTemplates::new(self.templates)),
            catalog: Arc::new(catalog),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionStatus;
    use assert_matches::assert_matches;
    use chrono::Duration;

    fn session(user_id: Uuid, days_ago: i64, status: SessionStatus) -> CompletedSession {
        CompletedSession {
            id: Uuid::new_v4(),
            user_id,
            template_id: None,
            started_at: Utc::now() - Duration::days(days_ago),
            duration_seconds: None,
            total_volume_kg: Some(1000.0),
            status,
        }
    }

    #[tokio::test]
    async fn test_history_filters_user_status_and_window() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let provider = InMemorySessionHistory::new(vec![
            session(user, 40, SessionStatus::Completed),
            session(user, 3, SessionStatus::Completed),
            session(user, 1, SessionStatus::InProgress),
            session(other, 1, SessionStatus::Completed),
            session(user, 10, SessionStatus::Completed),
        ]);

        let since = provider
            .fetch_since(user, Utc::now() - Duration::days(30))
            .await
            .unwrap();
        assert_eq!(since.len(), 2);
        assert!(since[0].started_at > since[1].started_at);

        let recent = provider.fetch_recent(user, 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].started_at, since[1].started_at);
    }

    #[tokio::test]
    async fn test_templates_validate_on_fetch() {
        let good = Uuid::new_v4();
        let empty = Uuid::new_v4();
        let provider = InMemoryTemplates::new(vec![
            serde_json::from_value(serde_json::json!({
                "id": good.to_string(),
                "name": "Pull Day",
                "exercises": [{
                    "exercise": {
                        "id": Uuid::new_v4().to_string(),
                        "name": "Pull Up",
                        "muscle_group": "back",
                        "category": "compound"
                    },
                    "sets": [{ "reps": 6 }]
                }]
            }))
            .unwrap(),
            serde_json::from_value(serde_json::json!({
                "id": empty.to_string(),
                "name": "Empty",
                "exercises": []
            }))
            .unwrap(),
        ]);

        assert_eq!(provider.fetch_template(good).await.unwrap().name, "Pull Day");
        assert_matches!(
            provider.fetch_template(empty).await,
            Err(ProviderError::Malformed(ValidationError::EmptyTemplate(_)))
        );
        assert_matches!(
            provider.fetch_template(Uuid::new_v4()).await,
            Err(ProviderError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn test_catalog_filters() {
        let catalog = InMemoryCatalog::from_raw(vec![
            RawExercise {
                id: Some(Uuid::new_v4().to_string()),
                name: Some("Plank".to_string()),
                muscle_group: Some("core".to_string()),
                equipment: None,
                category: Some("compound".to_string()),
            },
            RawExercise {
                id: Some(Uuid::new_v4().to_string()),
                name: Some("Crunch".to_string()),
                muscle_group: Some("core".to_string()),
                equipment: None,
                category: Some("isolation".to_string()),
            },
        ])
        .unwrap();

        let found = catalog
            .fetch_exercises(vec![MuscleGroup::Core], ExerciseCategory::Compound, 5)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Plank");
    }
}
