use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary muscle group an exercise targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    FullBody,
    Other,
}

impl MuscleGroup {
    /// Parse a catalog value; unrecognised groups map to `Other`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "chest" => MuscleGroup::Chest,
            "back" => MuscleGroup::Back,
            "legs" | "quads" | "hamstrings" | "glutes" => MuscleGroup::Legs,
            "shoulders" => MuscleGroup::Shoulders,
            "arms" | "biceps" | "triceps" => MuscleGroup::Arms,
            "core" | "abs" => MuscleGroup::Core,
            "full_body" => MuscleGroup::FullBody,
            _ => MuscleGroup::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Core => "core",
            MuscleGroup::FullBody => "full_body",
            MuscleGroup::Other => "other",
        }
    }
}

/// Movement category used to filter the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Compound,
    Isolation,
    Cardio,
    Mobility,
}

impl ExerciseCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "compound" => Some(ExerciseCategory::Compound),
            "isolation" => Some(ExerciseCategory::Isolation),
            "cardio" => Some(ExerciseCategory::Cardio),
            "mobility" | "stretching" => Some(ExerciseCategory::Mobility),
            _ => None,
        }
    }
}

/// Catalog entry referenced by templates and prescriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRef {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Option<String>,
    pub category: ExerciseCategory,
}

/// One recorded set from the last time an exercise was performed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedSet {
    pub reps: u32,
    pub weight_kg: Option<f64>,
}

/// An exercise within a saved template, with its most recent sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    pub exercise: ExerciseRef,
    pub recent_sets: Vec<RecordedSet>,
}

/// A user's saved workout template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

/// Sets/reps/weight target for one exercise in a generated workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    pub exercise: ExerciseRef,
    pub target_sets: u32,
    pub target_reps: u32,
    pub target_weight_kg: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muscle_group_parse() {
        assert_eq!(MuscleGroup::parse("Chest"), MuscleGroup::Chest);
        assert_eq!(MuscleGroup::parse(" back "), MuscleGroup::Back);
        assert_eq!(MuscleGroup::parse("Full Body"), MuscleGroup::FullBody);
        assert_eq!(MuscleGroup::parse("quads"), MuscleGroup::Legs);
        assert_eq!(MuscleGroup::parse("forearms?"), MuscleGroup::Other);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(ExerciseCategory::parse("COMPOUND"), Some(ExerciseCategory::Compound));
        assert_eq!(ExerciseCategory::parse("plyometric"), None);
    }
}
