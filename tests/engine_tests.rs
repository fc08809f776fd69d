//! State engine integration tests.
//!
//! Every transition is pure, so these tests drive the engine directly on
//! in-memory states and assert on the returned outcomes.

use atomik::engine::{
    self, Notice, TASK_LIST_CAP, TaskList, add_generated_tasks, add_habit, add_task, delete_habit,
    delete_task, level_info, toggle_habit, toggle_task, update_habit, update_task,
};
use atomik::models::AppState;
use atomik::scoring::ScoredTask;
use atomik::{Task, Urgency};

use proptest::prelude::*;

/// Default state minus the seeded sample tasks, for tests that want to
/// build lists from scratch.
fn empty_state() -> AppState {
    AppState {
        today_tasks: Vec::new(),
        ..AppState::default()
    }
}

// =============================================================================
// Level curve
// =============================================================================

#[test]
fn level_curve_starts_at_level_one() {
    let info = level_info(0);
    assert_eq!(info.level, 1);
    assert_eq!(info.xp, 0);
    assert_eq!(info.xp_to_next_level, 100);

    let info = level_info(99);
    assert_eq!(info.level, 1);
    assert_eq!(info.xp, 99);
}

#[test]
fn level_thresholds_grow_by_half() {
    // 100 XP ends level 1; the next threshold is 150, then 225, then 337
    let info = level_info(100);
    assert_eq!(info.level, 2);
    assert_eq!(info.xp, 0);
    assert_eq!(info.xp_to_next_level, 150);

    let info = level_info(120);
    assert_eq!(info.level, 2);
    assert_eq!(info.xp, 20);

    let info = level_info(250);
    assert_eq!(info.level, 3);
    assert_eq!(info.xp_to_next_level, 225);

    // 100 + 150 + 225 + 337 = 812 total XP reaches level 5
    let info = level_info(812);
    assert_eq!(info.level, 5);
    assert_eq!(info.xp, 0);
    assert_eq!(info.xp_to_next_level, 505);

    let info = level_info(811);
    assert_eq!(info.level, 4);
}

proptest! {
    /// Progress within a level is always a valid fraction of its threshold,
    /// and walking the thresholds back recovers the input.
    #[test]
    fn level_info_is_consistent(total_xp in 0i64..50_000_000) {
        let info = level_info(total_xp);
        prop_assert!(info.xp >= 0);
        prop_assert!(info.xp < info.xp_to_next_level);

        let mut accumulated = 0i64;
        let mut threshold = 100i64;
        for _ in 1..info.level {
            accumulated += threshold;
            threshold = threshold * 3 / 2;
        }
        prop_assert_eq!(threshold, info.xp_to_next_level);
        prop_assert_eq!(accumulated + info.xp, total_xp);
    }
}

// =============================================================================
// Task completion and scoring
// =============================================================================

#[test]
fn toggling_a_task_moves_points_weekly_xp_and_history() {
    let state = AppState::default();
    // t1 is the seeded high-urgency task, worth 20 points
    let outcome = toggle_task(&state, "t1");
    assert!(outcome.changed);
    let next = outcome.state;

    assert!(next.today_tasks[0].completed);
    assert_eq!(next.weekly_points, 20);
    assert_eq!(next.total_xp, 200);
    assert_eq!(next.history.len(), 1);
    assert_eq!(next.history[0].points, 20);
    assert_eq!(outcome.notice, Some(Notice::PointsEarned { points: 20 }));
}

#[test]
fn untoggling_reverts_the_same_points() {
    let state = AppState::default();
    let done = toggle_task(&state, "t1").state;
    let outcome = toggle_task(&done, "t1");
    let next = outcome.state;

    assert!(!next.today_tasks[0].completed);
    assert_eq!(next.weekly_points, 0);
    assert_eq!(next.total_xp, 0);
    // Day record nets out rather than disappearing
    assert_eq!(next.history.len(), 1);
    assert_eq!(next.history[0].points, 0);
    assert_eq!(outcome.notice, Some(Notice::PointsReverted { points: 20 }));
}

#[test]
fn big_wins_get_the_loud_notice() {
    assert_eq!(
        Notice::PointsEarned { points: 20 }.to_string(),
        "Huge win! +20 points"
    );
    assert_eq!(Notice::PointsEarned { points: 10 }.to_string(), "+10 points");
}

#[test]
fn weekly_points_and_xp_clamp_at_zero() {
    let mut state = AppState::default();
    state = toggle_task(&state, "t4").state; // low urgency, 5 points
    // Simulate an older blob where the counters were lower than the revert
    state.weekly_points = 3;
    state.total_xp = 30;

    let next = toggle_task(&state, "t4").state;
    assert_eq!(next.weekly_points, 0);
    assert_eq!(next.total_xp, 0);
    // The daily record keeps the raw sum regardless of the clamps
    assert_eq!(next.history.last().map(|r| r.points), Some(0));
}

#[test]
fn unknown_task_id_is_a_silent_noop() {
    let state = AppState::default();
    let outcome = toggle_task(&state, "missing");
    assert!(!outcome.changed);
    assert_eq!(outcome.notice, None);
    assert_eq!(outcome.state.weekly_points, state.weekly_points);
}

// =============================================================================
// Adding, editing and deleting tasks
// =============================================================================

#[test]
fn add_task_rejects_blank_names() {
    let state = empty_state();
    let outcome = add_task(&state, TaskList::Today, "   ", Urgency::Medium);
    assert!(!outcome.changed);
    assert_eq!(outcome.notice, Some(Notice::EmptyName));
    assert!(outcome.state.today_tasks.is_empty());
}

#[test]
fn add_task_stops_at_the_list_cap() {
    let mut state = empty_state();
    for i in 0..TASK_LIST_CAP {
        let outcome = add_task(&state, TaskList::Today, &format!("task {i}"), Urgency::Low);
        assert!(outcome.changed);
        state = outcome.state;
    }
    assert_eq!(state.today_tasks.len(), TASK_LIST_CAP);

    let outcome = add_task(&state, TaskList::Today, "one too many", Urgency::Low);
    assert!(!outcome.changed);
    assert_eq!(outcome.notice, Some(Notice::ListFull { cap: TASK_LIST_CAP }));
    assert_eq!(outcome.state.today_tasks.len(), TASK_LIST_CAP);
}

#[test]
fn generated_tasks_keep_input_order_and_bypass_the_cap() {
    let mut state = empty_state();
    for i in 0..TASK_LIST_CAP {
        state = add_task(&state, TaskList::Tomorrow, &format!("task {i}"), Urgency::Low).state;
    }

    let scored = vec![
        ScoredTask {
            name: "write report".to_string(),
            points: 3,
        },
        ScoredTask {
            name: "ship release".to_string(),
            points: 7,
        },
    ];
    let outcome = add_generated_tasks(&state, &scored);
    assert!(outcome.changed);
    assert_eq!(outcome.notice, Some(Notice::TasksGenerated { count: 2 }));

    let tomorrow = &outcome.state.tomorrow_tasks;
    assert_eq!(tomorrow.len(), TASK_LIST_CAP + 2);
    let tail: Vec<_> = tomorrow[TASK_LIST_CAP..]
        .iter()
        .map(|t| (t.name.as_str(), t.points, t.completed, t.urgency))
        .collect();
    assert_eq!(
        tail,
        vec![
            ("write report", 3, false, None),
            ("ship release", 7, false, None)
        ]
    );
}

#[test]
fn editing_a_completed_task_propagates_the_point_delta() {
    let state = AppState::default();
    let done = toggle_task(&state, "t4").state; // low, 5 points earned
    assert_eq!(done.weekly_points, 5);

    let outcome = update_task(&done, "t4", "Schedule dentist appointment", Urgency::High);
    let next = outcome.state;
    assert_eq!(next.today_tasks[3].points, 20);
    // Delta of 15 points flows through weekly, XP and today's record
    assert_eq!(next.weekly_points, 20);
    assert_eq!(next.total_xp, 200);
    assert_eq!(next.history.last().map(|r| r.points), Some(20));
}

#[test]
fn editing_an_incomplete_task_does_not_touch_scores() {
    let state = AppState::default();
    let outcome = update_task(&state, "t4", "renamed", Urgency::High);
    let next = outcome.state;
    assert_eq!(next.today_tasks[3].name, "renamed");
    assert_eq!(next.today_tasks[3].points, 20);
    assert_eq!(next.weekly_points, 0);
    assert_eq!(next.total_xp, 0);
    assert!(next.history.is_empty());
}

#[test]
fn deleting_a_completed_task_keeps_its_earned_points() {
    // Deletion never reverses scores, so the earned points survive the task
    let state = AppState::default();
    let done = toggle_task(&state, "t1").state;
    let outcome = delete_task(&done, "t1");
    let next = outcome.state;

    assert!(next.today_tasks.iter().all(|t| t.id != "t1"));
    assert_eq!(next.weekly_points, 20);
    assert_eq!(next.total_xp, 200);
}

#[test]
fn delete_task_searches_both_lists() {
    let state = empty_state();
    let state = add_task(&state, TaskList::Tomorrow, "future work", Urgency::Low).state;
    let id = state.tomorrow_tasks[0].id.clone();

    let outcome = delete_task(&state, &id);
    assert!(outcome.changed);
    assert!(outcome.state.tomorrow_tasks.is_empty());

    let outcome = delete_task(&outcome.state, &id);
    assert!(!outcome.changed);
}

// =============================================================================
// Habits
// =============================================================================

#[test]
fn habit_scoring_mirrors_tasks() {
    let state = empty_state();
    let state = add_habit(&state, "Morning run", 15).state;
    let id = state.habits[0].id.clone();

    let outcome = toggle_habit(&state, &id);
    assert_eq!(outcome.state.weekly_points, 15);
    assert_eq!(outcome.state.total_xp, 150);
    assert_eq!(outcome.notice, Some(Notice::PointsEarned { points: 15 }));

    let outcome = toggle_habit(&outcome.state, &id);
    assert_eq!(outcome.state.weekly_points, 0);
    assert_eq!(outcome.state.total_xp, 0);
}

#[test]
fn habit_points_must_be_positive() {
    let state = empty_state();
    let outcome = add_habit(&state, "Free lunch", 0);
    assert!(!outcome.changed);
    assert_eq!(outcome.notice, Some(Notice::InvalidPoints));

    let state = add_habit(&state, "Morning run", 15).state;
    let id = state.habits[0].id.clone();
    let outcome = update_habit(&state, &id, "Morning run", -2);
    assert!(!outcome.changed);
    assert_eq!(outcome.notice, Some(Notice::InvalidPoints));
}

#[test]
fn editing_a_completed_habit_propagates_the_point_delta() {
    let state = empty_state();
    let state = add_habit(&state, "Meditate", 10).state;
    let id = state.habits[0].id.clone();
    let done = toggle_habit(&state, &id).state;
    assert_eq!(done.weekly_points, 10);

    let next = update_habit(&done, &id, "Meditate", 25).state;
    assert_eq!(next.habits[0].points, 25);
    assert_eq!(next.weekly_points, 25);
    assert_eq!(next.total_xp, 250);
}

#[test]
fn deleting_a_habit_keeps_earned_points() {
    let state = empty_state();
    let state = add_habit(&state, "Meditate", 10).state;
    let id = state.habits[0].id.clone();
    let done = toggle_habit(&state, &id).state;

    let next = delete_habit(&done, &id).state;
    assert!(next.habits.is_empty());
    assert_eq!(next.weekly_points, 10);
    assert_eq!(next.total_xp, 100);
}

// =============================================================================
// Achievements
// =============================================================================

#[test]
fn first_step_unlocks_on_first_completion_and_stays_unlocked() {
    let state = AppState::default();
    assert!(!state.achievements[0].unlocked);

    let done = toggle_task(&state, "t1").state;
    assert!(done.achievements[0].unlocked);

    // Unchecking the task does not take the badge back
    let undone = toggle_task(&done, "t1").state;
    assert!(undone.achievements[0].unlocked);
}

#[test]
fn level_achievements_unlock_at_their_thresholds() {
    let mut state = empty_state();
    // Level 5 needs 812 XP, i.e. 82 points; 81 completions of a 1-point habit
    // leave the badge locked, the 82nd unlocks it
    state = add_habit(&state, "Tick", 1).state;
    let id = state.habits[0].id.clone();

    for _ in 0..81 {
        state = toggle_habit(&state, &id).state;
        state.habits[0].completed = false; // re-arm without reverting points
    }
    assert_eq!(state.total_xp, 810);
    assert!(!state.achievements[1].unlocked, "Novice needs level 5");

    state = toggle_habit(&state, &id).state;
    assert_eq!(state.total_xp, 820);
    assert!(state.achievements[1].unlocked);
    assert!(!state.achievements[2].unlocked, "Adept needs level 10");
}

// =============================================================================
// Breakdown
// =============================================================================

#[test]
fn point_breakdown_groups_by_urgency_and_habits() {
    let mut state = AppState::default();
    state = toggle_task(&state, "t1").state; // high, 20
    state = toggle_task(&state, "t2").state; // medium, 10
    state = add_habit(&state, "Stretch", 5).state;
    let id = state.habits[0].id.clone();
    state = toggle_habit(&state, &id).state;

    let (low, medium, high, habits) = engine::point_breakdown(&state);
    assert_eq!(low, 0);
    assert_eq!(medium, 10);
    assert_eq!(high, 20);
    assert_eq!(habits, 5);
}

#[test]
fn tasks_created_by_hand_score_from_urgency() {
    let task = Task::new("x".to_string(), "thing".to_string(), Urgency::Medium);
    assert_eq!(task.points, 10);
    assert!(!task.completed);
    assert_eq!(task.urgency, Some(Urgency::Medium));
}
