//! Persistence format tests: the state blob must tolerate missing fields
//! and survive a save/load cycle byte-faithfully at the model level.

use atomik::models::AppState;
use atomik::{Urgency, engine};

#[test]
fn partial_blobs_fill_in_defaults() {
    // A blob written before habits existed should still load
    let json = r#"{
        "today_tasks": [
            {"id": "a", "name": "old task", "points": 10, "completed": true, "urgency": "medium"}
        ],
        "total_xp": 120
    }"#;
    let state: AppState = serde_json::from_str(json).unwrap();

    assert_eq!(state.today_tasks.len(), 1);
    assert_eq!(state.today_tasks[0].urgency, Some(Urgency::Medium));
    assert!(state.tomorrow_tasks.is_empty());
    assert!(state.habits.is_empty());
    assert_eq!(state.weekly_goal, 250);
    assert_eq!(state.total_xp, 120);
    // The achievement catalog seeds even for old blobs
    assert_eq!(state.achievements.len(), 3);
    assert_eq!(engine::level_info(state.total_xp).level, 2);
}

#[test]
fn urgency_serializes_lowercase() {
    let json = serde_json::to_string(&Urgency::High).unwrap();
    assert_eq!(json, "\"high\"");
    let back: Urgency = serde_json::from_str("\"low\"").unwrap();
    assert_eq!(back, Urgency::Low);
}

#[test]
fn generated_tasks_round_trip_without_urgency() {
    let state = AppState::default();
    let scored = vec![atomik::scoring::ScoredTask {
        name: "plan sprint".to_string(),
        points: 4,
    }];
    let next = engine::add_generated_tasks(&state, &scored).state;

    let json = serde_json::to_string(&next).unwrap();
    let back: AppState = serde_json::from_str(&json).unwrap();
    let task = back.tomorrow_tasks.last().unwrap();
    assert_eq!(task.name, "plan sprint");
    assert_eq!(task.points, 4);
    assert_eq!(task.urgency, None);
}
