use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::models::{
    AdaptedWorkout, AdaptiveWorkoutOutcome, CompletedSession, Confidence, EngineNotice,
    FatigueAnalysis, FatigueOutcome, SuggestedWorkout, WorkoutTemplate,
};
use crate::services::fatigue_analysis_service::{FatigueAnalysisService, HISTORY_WINDOW_DAYS};
use crate::services::preset_workout_service::PresetWorkoutService;
use crate::services::providers::{
    ExerciseCatalogProvider, ProviderError, SessionHistoryProvider, TemplateProvider,
};
use crate::services::workout_adaptation_service::WorkoutAdaptationService;

/// Most frequently used template among the `lookback` most recent completed sessions.
///
/// Ties go to the template seen first when walking sessions newest to oldest.
pub fn select_base_template(sessions: &[CompletedSession], lookback: usize) -> Option<Uuid> {
    let mut recent: Vec<&CompletedSession> = sessions.iter().filter(|s| s.is_completed()).collect();
    recent.sort_by(|a, b| b.started_at.cmp(&a.started_at));

    // (template_id, uses) in first-seen order
    let mut tally: Vec<(Uuid, usize)> = Vec::new();
    for template_id in recent.iter().take(lookback).filter_map(|s| s.template_id) {
        match tally.iter_mut().find(|(id, _)| *id == template_id) {
            Some((_, uses)) => *uses += 1,
            None => tally.push((template_id, 1)),
        }
    }

    tally
        .into_iter()
        .fold(None, |best: Option<(Uuid, usize)>, (id, uses)| match best {
            Some((_, best_uses)) if best_uses >= uses => best,
            _ => Some((id, uses)),
        })
        .map(|(id, _)| id)
}

/// Composes fatigue analysis, template adaptation and preset synthesis into today's workout
#[derive(Clone)]
pub struct AdaptiveWorkoutService {
    history: Arc<dyn SessionHistoryProvider>,
    templates: Arc<dyn TemplateProvider>,
    catalog: Arc<dyn ExerciseCatalogProvider>,
    config: EngineConfig,
    fatigue: FatigueAnalysisService,
    adapter: WorkoutAdaptationService,
    presets: PresetWorkoutService,
}

impl AdaptiveWorkoutService {
    pub fn new(
        history: Arc<dyn SessionHistoryProvider>,
        templates: Arc<dyn TemplateProvider>,
        catalog: Arc<dyn ExerciseCatalogProvider>,
        config: EngineConfig,
    ) -> Self {
        let fatigue = FatigueAnalysisService::new(config.policy.clone());

        Self {
            history,
            templates,
            catalog,
            config,
            fatigue,
            adapter: WorkoutAdaptationService::new(),
            presets: PresetWorkoutService::new(),
        }
    }

    /// Run a provider read under the configured timeout; a timeout counts as a failure
    async fn bounded<T>(
        &self,
        read: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        match tokio::time::timeout(self.config.provider_timeout, read).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.config.provider_timeout)),
        }
    }

    fn analysis_from(
        &self,
        history: Result<Vec<CompletedSession>, ProviderError>,
        now: DateTime<Utc>,
        notices: &mut Vec<EngineNotice>,
    ) -> FatigueAnalysis {
        match history {
            Ok(sessions) => self.fatigue.analyze(&sessions, now),
            Err(e) => {
                warn!("Session history unavailable, using cold start: {}", e);
                notices.push(EngineNotice::HistoryUnavailable);
                self.fatigue.cold_start()
            }
        }
    }

    /// Fatigue assessment on its own, without building a workout
    #[instrument(skip(self))]
    pub async fn analyze_fatigue(&self, user_id: Uuid, now: DateTime<Utc>) -> FatigueOutcome {
        let since = now - Duration::days(HISTORY_WINDOW_DAYS);
        let history = self.bounded(self.history.fetch_since(user_id, since)).await;

        let mut notices = Vec::new();
        let analysis = self.analysis_from(history, now, &mut notices);

        info!(
            fatigue_score = analysis.fatigue_score,
            recommendation = analysis.recommendation.as_str(),
            "Fatigue analysis complete"
        );

        FatigueOutcome { analysis, notices }
    }

    async fn load_template(
        &self,
        template_id: Option<Uuid>,
        notices: &mut Vec<EngineNotice>,
    ) -> Option<WorkoutTemplate> {
        let template_id = template_id?;
        match self.bounded(self.templates.fetch_template(template_id)).await {
            Ok(template) => Some(template),
            Err(e) => {
                warn!(
                    "Template {} could not be loaded, falling back to preset: {}",
                    template_id, e
                );
                notices.push(EngineNotice::TemplateUnavailable { template_id });
                None
            }
        }
    }

    /// Build today's adapted workout. Provider failures degrade the result, never fail it.
    #[instrument(skip(self))]
    pub async fn suggest_adaptive_workout(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AdaptiveWorkoutOutcome {
        let since = now - Duration::days(HISTORY_WINDOW_DAYS);
        let lookback = self.config.template_lookback_sessions;

        let (history, recent) = tokio::join!(
            self.bounded(self.history.fetch_since(user_id, since)),
            self.bounded(self.history.fetch_recent(user_id, lookback)),
        );

        let mut notices = Vec::new();
        let analysis = self.analysis_from(history, now, &mut notices);
        let recommendation = analysis.recommendation;

        let template_id = match recent {
            Ok(sessions) => select_base_template(&sessions, lookback),
            Err(e) => {
                warn!("Recent sessions unavailable, skipping template lookup: {}", e);
                notices.push(EngineNotice::RecentSessionsUnavailable);
                None
            }
        };
        debug!(template_id = ?template_id, "Selected base template");

        let workout = match self.load_template(template_id, &mut notices).await {
            Some(template) => {
                let adapted = self.adapter.adapt_template(recommendation, &template);
                AdaptedWorkout {
                    template_id: Some(template.id),
                    template_name: adapted.template_name,
                    exercises: adapted.exercises,
                    estimated_duration_minutes: adapted.estimated_duration_minutes,
                    confidence: Confidence::High,
                    reason: format!("Based on your recent {} workout", template.name),
                    fatigue_score: analysis.fatigue_score,
                    adaptation_type: recommendation,
                    adaptation_reason: analysis.reason,
                    volume_adjustment_pct: recommendation.volume_adjustment_pct(),
                }
            }
            None => {
                let query = self.presets.catalog_query(recommendation);
                let catalog = match self
                    .bounded(self.catalog.fetch_exercises(
                        query.muscle_groups,
                        query.category,
                        query.limit,
                    ))
                    .await
                {
                    Ok(exercises) => Some(exercises),
                    Err(e) => {
                        warn!("Exercise catalog unavailable: {}", e);
                        notices.push(EngineNotice::CatalogUnavailable);
                        None
                    }
                };

                let preset = self.presets.build(recommendation, catalog);
                AdaptedWorkout {
                    template_id: None,
                    template_name: preset.template_name,
                    exercises: preset.exercises,
                    estimated_duration_minutes: preset.estimated_duration_minutes,
                    confidence: preset.confidence,
                    reason: format!(
                        "No recent template available, using a generic {} preset",
                        recommendation.label().to_lowercase()
                    ),
                    fatigue_score: analysis.fatigue_score,
                    adaptation_type: recommendation,
                    adaptation_reason: analysis.reason,
                    volume_adjustment_pct: recommendation.volume_adjustment_pct(),
                }
            }
        };

        info!(
            fatigue_score = workout.fatigue_score,
            recommendation = recommendation.as_str(),
            template_id = ?workout.template_id,
            exercises = workout.exercises.len(),
            notices = notices.len(),
            "Adaptive workout ready"
        );

        AdaptiveWorkoutOutcome { workout, notices }
    }

    /// Non-adaptive shape for preview/launcher screens
    pub async fn suggest_workout(&self, user_id: Uuid, now: DateTime<Utc>) -> SuggestedWorkout {
        self.suggest_adaptive_workout(user_id, now).await.workout.into()
    }
}
