use tracing::debug;

use crate::models::{
    Confidence, ExerciseCategory, ExercisePrescription, ExerciseRef, MuscleGroup, Recommendation,
};
use crate::services::workout_adaptation_service::estimate_duration_minutes;

/// Catalog filter for a preset workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetQuery {
    pub muscle_groups: Vec<MuscleGroup>,
    pub category: ExerciseCategory,
    pub limit: usize,
}

/// A generic workout synthesized without a base template
#[derive(Debug, Clone, PartialEq)]
pub struct PresetWorkout {
    pub template_name: String,
    pub exercises: Vec<ExercisePrescription>,
    pub estimated_duration_minutes: u32,
    pub confidence: Confidence,
}

/// Builds small compound-movement workouts when no usable template exists
#[derive(Debug, Clone, Default)]
pub struct PresetWorkoutService;

impl PresetWorkoutService {
    pub fn new() -> Self {
        Self
    }

    /// Which catalog exercises a preset draws from
    pub fn catalog_query(&self, recommendation: Recommendation) -> PresetQuery {
        match recommendation {
            Recommendation::Rest => PresetQuery {
                muscle_groups: vec![MuscleGroup::Core, MuscleGroup::Back],
                category: ExerciseCategory::Compound,
                limit: 3,
            },
            Recommendation::Volume | Recommendation::Intensity => PresetQuery {
                muscle_groups: vec![MuscleGroup::Chest, MuscleGroup::Back, MuscleGroup::Legs],
                category: ExerciseCategory::Compound,
                limit: 5,
            },
        }
    }

    /// Uniform (sets, reps) prescribed for every preset exercise
    pub fn prescription(&self, recommendation: Recommendation) -> (u32, u32) {
        match recommendation {
            Recommendation::Rest => (2, 12),
            Recommendation::Volume => (3, 10),
            Recommendation::Intensity => (4, 10),
        }
    }

    pub fn preset_name(&self, recommendation: Recommendation) -> String {
        let label = match recommendation {
            Recommendation::Rest => "Recovery",
            Recommendation::Volume => "Volume",
            Recommendation::Intensity => "Intensity",
        };
        format!("{} Preset", label)
    }

    /// Build the preset from catalog results. `None` means the catalog could not be read.
    pub fn build(
        &self,
        recommendation: Recommendation,
        catalog: Option<Vec<ExerciseRef>>,
    ) -> PresetWorkout {
        let query = self.catalog_query(recommendation);
        let (target_sets, target_reps) = self.prescription(recommendation);

        let confidence = if catalog.is_some() {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        let exercises: Vec<ExercisePrescription> = catalog
            .unwrap_or_default()
            .into_iter()
            .filter(|e| {
                e.category == query.category && query.muscle_groups.contains(&e.muscle_group)
            })
            .take(query.limit)
            .map(|exercise| ExercisePrescription {
                exercise,
                target_sets,
                target_reps,
                target_weight_kg: None,
            })
            .collect();

        debug!(
            recommendation = recommendation.as_str(),
            exercises = exercises.len(),
            "Synthesized preset workout"
        );

        PresetWorkout {
            template_name: self.preset_name(recommendation),
            estimated_duration_minutes: estimate_duration_minutes(recommendation, exercises.len()),
            exercises,
            confidence,
        }
    }
}
