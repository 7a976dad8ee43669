use tracing::debug;

use crate::models::{ExercisePrescription, Recommendation, TemplateExercise, WorkoutTemplate};

/// Planning estimate for one exercise including rest between sets
pub const BASE_MINUTES_PER_EXERCISE: f64 = 8.0;

pub const MIN_TARGET_SETS: u32 = 2;
pub const MAX_TARGET_SETS: u32 = 6;

const DEFAULT_BASE_SETS: u32 = 3;
const DEFAULT_REFERENCE_REPS: u32 = 10;
const DELOAD_SETS_PCT: u32 = 70;
const DELOAD_WEIGHT_FACTOR: f64 = 0.7;
const REP_PROGRESSION_CEILING: u32 = 12;

/// Estimated session length for `exercise_count` exercises under a recommendation
pub fn estimate_duration_minutes(recommendation: Recommendation, exercise_count: usize) -> u32 {
    let minutes =
        exercise_count as f64 * BASE_MINUTES_PER_EXERCISE * recommendation.duration_multiplier();
    minutes.round() as u32
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Template exercises scaled to today's recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedTemplate {
    pub template_name: String,
    pub exercises: Vec<ExercisePrescription>,
    pub estimated_duration_minutes: u32,
}

/// Scales a base template's sets, reps and weights to a recommendation
#[derive(Debug, Clone, Default)]
pub struct WorkoutAdaptationService;

impl WorkoutAdaptationService {
    pub fn new() -> Self {
        Self
    }

    /// Adapt a whole template, keeping exercise order
    pub fn adapt_template(
        &self,
        recommendation: Recommendation,
        template: &WorkoutTemplate,
    ) -> AdaptedTemplate {
        let exercises = self.adapt_exercises(recommendation, &template.exercises);
        debug!(
            template_id = %template.id,
            exercises = exercises.len(),
            recommendation = recommendation.as_str(),
            "Adapted template"
        );

        AdaptedTemplate {
            template_name: self.display_name(recommendation, &template.name),
            estimated_duration_minutes: estimate_duration_minutes(recommendation, exercises.len()),
            exercises,
        }
    }

    pub fn adapt_exercises(
        &self,
        recommendation: Recommendation,
        exercises: &[TemplateExercise],
    ) -> Vec<ExercisePrescription> {
        exercises
            .iter()
            .map(|exercise| self.adapt_exercise(recommendation, exercise))
            .collect()
    }

    pub fn adapt_exercise(
        &self,
        recommendation: Recommendation,
        base: &TemplateExercise,
    ) -> ExercisePrescription {
        let base_sets = match base.recent_sets.len() {
            0 => DEFAULT_BASE_SETS,
            n => n as u32,
        };
        let (reps, weight_kg) = base
            .recent_sets
            .first()
            .map(|set| (set.reps, set.weight_kg))
            .unwrap_or((DEFAULT_REFERENCE_REPS, None));

        let (target_sets, target_reps, target_weight_kg) = match recommendation {
            Recommendation::Rest => {
                let sets = (base_sets * DELOAD_SETS_PCT / 100).max(MIN_TARGET_SETS);
                (
                    sets.min(MAX_TARGET_SETS),
                    reps,
                    weight_kg.map(|w| round_to_tenth(w * DELOAD_WEIGHT_FACTOR)),
                )
            }
            Recommendation::Intensity => {
                let sets = (base_sets + 1).min(MAX_TARGET_SETS).max(MIN_TARGET_SETS);
                let reps = if reps < REP_PROGRESSION_CEILING { reps + 1 } else { reps };
                (sets, reps, weight_kg)
            }
            // Maintain: the last session is repeated, set count kept in range
            Recommendation::Volume => (
                base_sets.clamp(MIN_TARGET_SETS, MAX_TARGET_SETS),
                reps,
                weight_kg,
            ),
        };

        ExercisePrescription {
            exercise: base.exercise.clone(),
            target_sets,
            target_reps,
            target_weight_kg,
        }
    }

    /// Base template name decorated with the recommendation marker
    pub fn display_name(&self, recommendation: Recommendation, base_name: &str) -> String {
        format!("{} · {}", recommendation.label(), base_name)
    }
}
