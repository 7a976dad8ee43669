use adaptive_coach::config::EngineConfig;
use adaptive_coach::models::{
    Confidence, EngineNotice, Recommendation, SuggestedWorkout, VolumeTrend, NO_HISTORY_DAYS,
};
use adaptive_coach::services::{AdaptiveWorkoutService, Fixture};
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use uuid::Uuid;

const USER_ID: &str = "2f1e0d9c-8b7a-4654-9321-0fedcba98765";
const TEMPLATE_ID: &str = "4b3a2918-0716-4253-a4b5-c6d7e8f90a1b";

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-14T18:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn session(days_ago: i64, volume: f64, template_id: Option<&str>) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "user_id": USER_ID,
        "template_id": template_id,
        "started_at": (now() - Duration::days(days_ago)).to_rfc3339(),
        "duration_seconds": 3600,
        "total_volume_kg": volume,
        "status": "completed"
    })
}

fn squat_template() -> serde_json::Value {
    json!({
        "id": TEMPLATE_ID,
        "name": "Leg Day",
        "exercises": [{
            "exercise": {
                "id": Uuid::new_v4().to_string(),
                "name": "Back Squat",
                "muscle_group": "legs",
                "equipment": "barbell",
                "category": "compound"
            },
            "sets": [
                { "reps": 8, "weight_kg": 100.0 },
                { "reps": 8, "weight_kg": 100.0 },
                { "reps": 8, "weight_kg": 100.0 },
                { "reps": 8, "weight_kg": 100.0 }
            ]
        }]
    })
}

fn catalog_entry(name: &str, muscle_group: &str, category: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "name": name,
        "muscle_group": muscle_group,
        "category": category
    })
}

fn catalog() -> serde_json::Value {
    json!([
        catalog_entry("Plank", "core", "compound"),
        catalog_entry("Deadlift", "back", "compound"),
        catalog_entry("Push Up", "chest", "compound"),
        catalog_entry("Lunge", "legs", "compound"),
        catalog_entry("Bicep Curl", "arms", "isolation"),
    ])
}

fn service_for(sessions: Vec<serde_json::Value>) -> AdaptiveWorkoutService {
    let fixture: Fixture = serde_json::from_value(json!({
        "user_id": USER_ID,
        "sessions": sessions,
        "templates": [squat_template()],
        "exercises": catalog(),
    }))
    .expect("fixture should deserialize");

    let providers = fixture.into_providers().expect("fixture should validate");
    AdaptiveWorkoutService::new(
        providers.history,
        providers.templates,
        providers.catalog,
        EngineConfig::default(),
    )
}

fn user() -> Uuid {
    Uuid::parse_str(USER_ID).unwrap()
}

#[tokio::test]
async fn test_new_user_gets_volume_preset() {
    let service = service_for(vec![]);

    let fatigue = service.analyze_fatigue(user(), now()).await;
    assert_eq!(fatigue.analysis.fatigue_score, 30);
    assert_eq!(fatigue.analysis.recommendation, Recommendation::Volume);
    assert_eq!(fatigue.analysis.metrics.days_since_last_workout, NO_HISTORY_DAYS);
    assert!(fatigue.notices.is_empty());

    let outcome = service.suggest_adaptive_workout(user(), now()).await;
    let workout = outcome.workout;
    assert!(outcome.notices.is_empty());
    assert_eq!(workout.template_id, None);
    assert_eq!(workout.template_name, "Volume Preset");
    assert_eq!(workout.confidence, Confidence::Medium);
    assert_eq!(workout.adaptation_type, Recommendation::Volume);
    assert_eq!(workout.volume_adjustment_pct, 0);

    let names: Vec<_> = workout.exercises.iter().map(|e| e.exercise.name.as_str()).collect();
    assert_eq!(names, vec!["Deadlift", "Push Up", "Lunge"]);
    assert_eq!(workout.estimated_duration_minutes, 24);
}

#[tokio::test]
async fn test_daily_training_deloads_template() {
    let sessions = (0..7)
        .map(|d| session(d, 5000.0, Some(TEMPLATE_ID)))
        .collect();
    let service = service_for(sessions);

    let outcome = service.suggest_adaptive_workout(user(), now()).await;
    let workout = &outcome.workout;

    assert_eq!(workout.fatigue_score, 75);
    assert_eq!(workout.adaptation_type, Recommendation::Rest);
    assert_eq!(
        workout.adaptation_reason,
        "High fatigue detected — deload recommended for recovery"
    );
    assert_eq!(workout.template_id, Some(Uuid::parse_str(TEMPLATE_ID).unwrap()));
    assert_eq!(workout.template_name, "Recovery · Leg Day");
    assert_eq!(workout.confidence, Confidence::High);
    assert_eq!(workout.volume_adjustment_pct, -30);

    let squat = &workout.exercises[0];
    assert_eq!(squat.target_sets, 2);
    assert_eq!(squat.target_reps, 8);
    assert_eq!(squat.target_weight_kg, Some(70.0));
}

#[tokio::test]
async fn test_long_break_pushes_intensity() {
    let service = service_for(vec![
        session(8, 3000.0, Some(TEMPLATE_ID)),
        session(12, 3000.0, Some(TEMPLATE_ID)),
    ]);

    let fatigue = service.analyze_fatigue(user(), now()).await.analysis;
    assert_eq!(fatigue.fatigue_score, 0);
    assert_eq!(fatigue.metrics.days_since_last_workout, 8);
    assert_eq!(fatigue.metrics.workouts_last_7_days, 0);
    assert_eq!(fatigue.metrics.volume_trend, VolumeTrend::Decreasing);
    assert_eq!(fatigue.reason, "Well recovered — push for progressive overload");

    let workout = service.suggest_adaptive_workout(user(), now()).await.workout;
    assert_eq!(workout.adaptation_type, Recommendation::Intensity);
    assert_eq!(workout.template_name, "Intensity · Leg Day");
    assert_eq!(workout.volume_adjustment_pct, 15);
    assert_eq!(workout.exercises[0].target_sets, 5);
    assert_eq!(workout.exercises[0].target_reps, 9);
    assert_eq!(workout.exercises[0].target_weight_kg, Some(100.0));
    assert_eq!(workout.estimated_duration_minutes, 10);
}

#[tokio::test]
async fn test_missing_template_falls_back_to_preset() {
    let missing = Uuid::new_v4();
    let service = service_for(vec![
        session(1, 4000.0, Some(&missing.to_string())),
        session(2, 4000.0, Some(&missing.to_string())),
        session(3, 4000.0, Some(TEMPLATE_ID)),
    ]);

    let outcome = service.suggest_adaptive_workout(user(), now()).await;
    assert_eq!(
        outcome.notices,
        vec![EngineNotice::TemplateUnavailable { template_id: missing }]
    );
    assert!(!outcome.personalization_limited());
    assert_eq!(outcome.workout.template_id, None);
    assert_eq!(outcome.workout.confidence, Confidence::Medium);
}

#[tokio::test]
async fn test_suggested_workout_serializes_launcher_fields() {
    let service = service_for(vec![
        session(2, 4000.0, Some(TEMPLATE_ID)),
        session(4, 4000.0, Some(TEMPLATE_ID)),
    ]);

    let suggestion: SuggestedWorkout = service.suggest_workout(user(), now()).await;
    let value = serde_json::to_value(&suggestion).unwrap();

    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "confidence",
            "estimated_duration_minutes",
            "exercises",
            "reason",
            "template_id",
            "template_name",
        ]
    );
    assert_eq!(value["confidence"], "high");
    assert_eq!(value["template_id"], TEMPLATE_ID);
    assert_eq!(value["exercises"][0]["exercise"]["muscle_group"], "legs");
}

#[tokio::test]
async fn test_adaptive_outcome_json_shape() {
    let service = service_for(vec![]);
    let outcome = service.suggest_adaptive_workout(user(), now()).await;
    let value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(value["workout"]["adaptation_type"], "VOLUME");
    assert_eq!(value["workout"]["fatigue_score"], 30);
    assert_eq!(value["workout"]["confidence"], "medium");
    assert_eq!(value["notices"], json!([]));
}

#[test]
fn test_demo_fixture_recommends_recovery_push_day() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/demo.json");
    let fixture = Fixture::load(&path).expect("demo fixture should load");
    let user_id = fixture.user_id;
    let now = fixture.now.expect("demo fixture pins the clock");
    let providers = fixture.into_providers().expect("demo fixture should validate");

    let service = AdaptiveWorkoutService::new(
        providers.history,
        providers.templates,
        providers.catalog,
        EngineConfig::default(),
    );
    let outcome = tokio_test::block_on(service.suggest_adaptive_workout(user_id, now));
    let workout = outcome.workout;

    assert!(outcome.notices.is_empty());
    assert_eq!(workout.fatigue_score, 60);
    assert_eq!(workout.adaptation_reason, "Moderate fatigue — lighter session recommended");
    assert_eq!(workout.template_name, "Recovery · Push Day");
    assert_eq!(workout.estimated_duration_minutes, 17);

    let prescribed: Vec<_> = workout
        .exercises
        .iter()
        .map(|e| (e.exercise.name.as_str(), e.target_sets, e.target_reps, e.target_weight_kg))
        .collect();
    assert_eq!(
        prescribed,
        vec![
            ("Bench Press", 2, 8, Some(56.0)),
            ("Overhead Press", 2, 6, Some(35.0)),
            ("Dip", 2, 12, None),
        ]
    );
}
