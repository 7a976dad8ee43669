//! Loosely-typed provider records and their validation into engine models.
//!
//! Storage hands back nested JSON with optional fields everywhere. These raw
//! shapes are converted once at the provider boundary; malformed records are
//! rejected here so the scoring and adaptation code only sees typed data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{
    CompletedSession, ExerciseCategory, ExerciseRef, MuscleGroup, RecordedSet, SessionStatus,
    TemplateExercise, WorkoutTemplate,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
    #[error("Template {0} has no exercises")]
    EmptyTemplate(Uuid),
}

fn invalid(field: &'static str, value: impl ToString) -> ValidationError {
    ValidationError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_id(field: &'static str, value: Option<&str>) -> Result<Uuid, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField(field))?;
    Uuid::parse_str(raw.trim()).map_err(|_| invalid(field, raw))
}

fn required_name(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        Some(_) => Err(invalid(field, "<empty>")),
        None => Err(ValidationError::MissingField(field)),
    }
}

/// Validate an optional weight: finite and non-negative
fn validate_weight(
    field: &'static str,
    weight: Option<f64>,
) -> Result<Option<f64>, ValidationError> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => Err(invalid(field, w)),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSet {
    pub reps: Option<i64>,
    pub weight_kg: Option<f64>,
}

impl TryFrom<RawSet> for RecordedSet {
    type Error = ValidationError;

    fn try_from(raw: RawSet) -> Result<Self, Self::Error> {
        let reps = raw.reps.ok_or(ValidationError::MissingField("sets.reps"))?;
        if reps < 1 {
            return Err(invalid("sets.reps", reps));
        }
        let reps = u32::try_from(reps).map_err(|_| invalid("sets.reps", reps))?;

        Ok(RecordedSet {
            reps,
            weight_kg: validate_weight("sets.weight_kg", raw.weight_kg)?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExercise {
    pub id: Option<String>,
    pub name: Option<String>,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub category: Option<String>,
}

impl TryFrom<RawExercise> for ExerciseRef {
    type Error = ValidationError;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        let id = parse_id("exercise.id", raw.id.as_deref())?;
        let name = required_name("exercise.name", raw.name.as_deref())?;
        let muscle_group = raw
            .muscle_group
            .as_deref()
            .map(MuscleGroup::parse)
            .ok_or(ValidationError::MissingField("exercise.muscle_group"))?;

        // Uncategorised exercises are treated as isolation work so they never
        // land in compound-only preset selections.
        let category = match raw.category.as_deref() {
            Some(value) => {
                ExerciseCategory::parse(value).ok_or_else(|| invalid("exercise.category", value))?
            }
            None => ExerciseCategory::Isolation,
        };

        let equipment = raw
            .equipment
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(ExerciseRef {
            id,
            name,
            muscle_group,
            equipment,
            category,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTemplateExercise {
    pub exercise: Option<RawExercise>,
    pub sets: Option<Vec<RawSet>>,
}

impl TryFrom<RawTemplateExercise> for TemplateExercise {
    type Error = ValidationError;

    fn try_from(raw: RawTemplateExercise) -> Result<Self, Self::Error> {
        let exercise = raw
            .exercise
            .ok_or(ValidationError::MissingField("exercises.exercise"))?
            .try_into()?;

        let recent_sets = raw
            .sets
            .unwrap_or_default()
            .into_iter()
            .map(RecordedSet::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TemplateExercise {
            exercise,
            recent_sets,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWorkoutTemplate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub exercises: Option<Vec<RawTemplateExercise>>,
}

impl TryFrom<RawWorkoutTemplate> for WorkoutTemplate {
    type Error = ValidationError;

    fn try_from(raw: RawWorkoutTemplate) -> Result<Self, Self::Error> {
        let id = parse_id("template.id", raw.id.as_deref())?;
        let name = required_name("template.name", raw.name.as_deref())?;

        let exercises = raw
            .exercises
            .unwrap_or_default()
            .into_iter()
            .map(TemplateExercise::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if exercises.is_empty() {
            return Err(ValidationError::EmptyTemplate(id));
        }

        Ok(WorkoutTemplate { id, name, exercises })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSession {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub template_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub total_volume_kg: Option<f64>,
    pub status: Option<String>,
}

impl TryFrom<RawSession> for CompletedSession {
    type Error = ValidationError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        let id = parse_id("session.id", raw.id.as_deref())?;
        let user_id = parse_id("session.user_id", raw.user_id.as_deref())?;
        let template_id = match raw.template_id.as_deref() {
            Some(value) => Some(parse_id("session.template_id", Some(value))?),
            None => None,
        };
        let started_at = raw
            .started_at
            .ok_or(ValidationError::MissingField("session.started_at"))?;

        if let Some(secs) = raw.duration_seconds {
            if secs < 0 {
                return Err(invalid("session.duration_seconds", secs));
            }
        }

        let status = match raw.status.as_deref().map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "completed" => SessionStatus::Completed,
            Some(s) if s == "in_progress" => SessionStatus::InProgress,
            Some(s) if s == "abandoned" => SessionStatus::Abandoned,
            Some(s) => return Err(invalid("session.status", s)),
            None => return Err(ValidationError::MissingField("session.status")),
        };

        Ok(CompletedSession {
            id,
            user_id,
            template_id,
            started_at,
            duration_seconds: raw.duration_seconds,
            total_volume_kg: validate_weight("session.total_volume_kg", raw.total_volume_kg)?,
            status,
        })
    }
}
