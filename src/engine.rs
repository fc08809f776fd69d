//! State engine: every mutation rule over [`AppState`] lives here.
//!
//! Operations are pure transitions. Each takes the current state plus
//! arguments and returns an [`Outcome`] holding the next state; a failed
//! validation or an unknown id returns the input state unchanged. The
//! presentation layer owns the single live instance and re-renders on
//! change, so no operation is ever partially applied.

use crate::models::{AppState, DailyRecord, Habit, LevelInfo, Task, Urgency};
use crate::scoring::ScoredTask;
use crate::utils::today_string;
use std::fmt;

/// Hard cap on manually-added tasks per list.
pub const TASK_LIST_CAP: usize = 10;
/// XP earned per point.
pub const XP_PER_POINT: i64 = 10;
/// XP needed to leave level 1; grows x1.5 (integer floor) per level.
pub const BASE_LEVEL_XP: i64 = 100;
/// Completions worth at least this many points get the louder notice tier.
pub const BIG_WIN_POINTS: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskList {
    Today,
    Tomorrow,
}

/// Advisory message surfaced to the user alongside a transition. Validation
/// failures are advisory, never errors; unknown ids produce no message at
/// all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PointsEarned { points: i64 },
    PointsReverted { points: i64 },
    EmptyName,
    ListFull { cap: usize },
    InvalidPoints,
    TasksGenerated { count: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PointsEarned { points } if *points >= BIG_WIN_POINTS => {
                write!(f, "Huge win! +{} points", points)
            }
            Notice::PointsEarned { points } => write!(f, "+{} points", points),
            Notice::PointsReverted { points } => write!(f, "-{} points", points),
            Notice::EmptyName => write!(f, "Name cannot be empty"),
            Notice::ListFull { cap } => write!(f, "List is full ({} items max)", cap),
            Notice::InvalidPoints => write!(f, "Points must be a positive number"),
            Notice::TasksGenerated { count } => {
                write!(f, "Added {} generated tasks to tomorrow's plan", count)
            }
        }
    }
}

/// Result of a transition: the next state, whether anything changed, and an
/// optional user-facing notice.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub state: AppState,
    pub changed: bool,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn changed(state: AppState, notice: Option<Notice>) -> Self {
        Self {
            state,
            changed: true,
            notice,
        }
    }

    fn rejected(state: &AppState, notice: Notice) -> Self {
        Self {
            state: state.clone(),
            changed: false,
            notice: Some(notice),
        }
    }

    fn noop(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            changed: false,
            notice: None,
        }
    }
}

/// Fresh id for a new item: prefix, wall-clock millis and the position the
/// item will take in its list. Unique within a collection since two items
/// created in the same millisecond land at different positions.
fn fresh_id(prefix: &str, seq: usize) -> String {
    format!("{}-{}-{}", prefix, chrono::Utc::now().timestamp_millis(), seq)
}

/// Find or create today's [`DailyRecord`] and add the signed delta to it.
fn record_daily_points(history: &mut Vec<DailyRecord>, delta: i64) {
    let today = today_string();
    match history.iter_mut().find(|r| r.date == today) {
        Some(record) => record.points += delta,
        None => history.push(DailyRecord {
            date: today,
            points: delta,
        }),
    }
}

/// Apply a signed point delta to the three score fields that must move
/// together: weekly points, total XP (x10) and today's history record.
/// Weekly points and XP clamp at zero; the daily record keeps the raw sum.
fn apply_score_delta(state: &mut AppState, delta: i64) {
    state.weekly_points = (state.weekly_points + delta).max(0);
    state.total_xp = (state.total_xp + delta * XP_PER_POINT).max(0);
    record_daily_points(&mut state.history, delta);
}

/// Re-evaluate achievement unlocks. Triggers come from the catalog itself:
/// First Step on any task completion, Novice at level 5, Adept at level 10.
/// Unlocks are sticky and never revert.
fn refresh_achievements(state: &mut AppState, task_completed: bool) {
    let level = level_info(state.total_xp).level;
    for achievement in &mut state.achievements {
        let earned = match achievement.id.as_str() {
            "1" => task_completed,
            "2" => level >= 5,
            "3" => level >= 10,
            _ => false,
        };
        achievement.unlocked = achievement.unlocked || earned;
    }
}

/// Flip a today-task's completed flag and move its points through weekly
/// points, XP and today's record. Unknown ids are a silent no-op.
pub fn toggle_task(state: &AppState, task_id: &str) -> Outcome {
    let Some(pos) = state.today_tasks.iter().position(|t| t.id == task_id) else {
        return Outcome::noop(state);
    };

    let mut next = state.clone();
    let task = &mut next.today_tasks[pos];
    task.completed = !task.completed;
    let completed = task.completed;
    let points = task.points;
    let delta = if completed { points } else { -points };

    apply_score_delta(&mut next, delta);
    refresh_achievements(&mut next, completed);

    let notice = if completed {
        Notice::PointsEarned { points }
    } else {
        Notice::PointsReverted { points }
    };
    Outcome::changed(next, Some(notice))
}

/// Add a manually-entered task to the chosen list. Rejected when the name is
/// blank or the list already holds [`TASK_LIST_CAP`] items.
pub fn add_task(state: &AppState, list: TaskList, name: &str, urgency: Urgency) -> Outcome {
    let name = name.trim();
    if name.is_empty() {
        return Outcome::rejected(state, Notice::EmptyName);
    }

    let mut next = state.clone();
    let (prefix, tasks) = match list {
        TaskList::Today => ("t", &mut next.today_tasks),
        TaskList::Tomorrow => ("tm", &mut next.tomorrow_tasks),
    };
    if tasks.len() >= TASK_LIST_CAP {
        return Outcome::rejected(state, Notice::ListFull { cap: TASK_LIST_CAP });
    }

    let id = fresh_id(prefix, tasks.len());
    tasks.push(Task::new(id, name.to_string(), urgency));
    Outcome::changed(next, None)
}

/// Append scoring-service results as tomorrow tasks, in input order, all
/// incomplete and without urgency. This path deliberately skips the list
/// cap: either the whole batch lands or (upstream) none of it does.
pub fn add_generated_tasks(state: &AppState, items: &[ScoredTask]) -> Outcome {
    if items.is_empty() {
        return Outcome::noop(state);
    }

    let mut next = state.clone();
    for item in items {
        let id = fresh_id("tm", next.tomorrow_tasks.len());
        next.tomorrow_tasks
            .push(Task::scored(id, item.name.clone(), item.points));
    }
    let notice = Notice::TasksGenerated { count: items.len() };
    Outcome::changed(next, Some(notice))
}

/// Rename a today-task and recompute its points from the new urgency. When
/// the task is currently completed the point delta propagates to weekly
/// points, XP and today's record exactly like a toggle would.
pub fn update_task(state: &AppState, task_id: &str, new_name: &str, new_urgency: Urgency) -> Outcome {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Outcome::rejected(state, Notice::EmptyName);
    }
    let Some(pos) = state.today_tasks.iter().position(|t| t.id == task_id) else {
        return Outcome::noop(state);
    };

    let mut next = state.clone();
    let task = &mut next.today_tasks[pos];
    let old_points = task.points;
    task.name = new_name.to_string();
    task.urgency = Some(new_urgency);
    task.points = new_urgency.points();
    let delta = task.points - old_points;
    let completed = task.completed;

    if completed && delta != 0 {
        apply_score_delta(&mut next, delta);
        refresh_achievements(&mut next, false);
    }
    Outcome::changed(next, None)
}

/// Remove a task from whichever list holds it. A completed task's score
/// contribution is intentionally not reversed: deleting history-keeping
/// items must not take back points the user already earned.
pub fn delete_task(state: &AppState, task_id: &str) -> Outcome {
    let mut next = state.clone();
    let before = next.today_tasks.len() + next.tomorrow_tasks.len();
    next.today_tasks.retain(|t| t.id != task_id);
    next.tomorrow_tasks.retain(|t| t.id != task_id);
    if next.today_tasks.len() + next.tomorrow_tasks.len() == before {
        return Outcome::noop(state);
    }
    Outcome::changed(next, None)
}

/// Habit counterpart of [`toggle_task`]: same scoring shape, no urgency.
pub fn toggle_habit(state: &AppState, habit_id: &str) -> Outcome {
    let Some(pos) = state.habits.iter().position(|h| h.id == habit_id) else {
        return Outcome::noop(state);
    };

    let mut next = state.clone();
    let habit = &mut next.habits[pos];
    habit.completed = !habit.completed;
    let completed = habit.completed;
    let points = habit.points;
    let delta = if completed { points } else { -points };

    apply_score_delta(&mut next, delta);
    refresh_achievements(&mut next, false);

    let notice = if completed {
        Notice::PointsEarned { points }
    } else {
        Notice::PointsReverted { points }
    };
    Outcome::changed(next, Some(notice))
}

/// Add a habit with caller-supplied points (must be >= 1).
pub fn add_habit(state: &AppState, name: &str, points: i64) -> Outcome {
    let name = name.trim();
    if name.is_empty() {
        return Outcome::rejected(state, Notice::EmptyName);
    }
    if points < 1 {
        return Outcome::rejected(state, Notice::InvalidPoints);
    }

    let mut next = state.clone();
    let id = fresh_id("h", next.habits.len());
    next.habits.push(Habit::new(id, name.to_string(), points));
    Outcome::changed(next, None)
}

/// Rename a habit and change its points. Deltas on a completed habit
/// propagate through the score fields, mirroring [`update_task`].
pub fn update_habit(state: &AppState, habit_id: &str, new_name: &str, new_points: i64) -> Outcome {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Outcome::rejected(state, Notice::EmptyName);
    }
    if new_points < 1 {
        return Outcome::rejected(state, Notice::InvalidPoints);
    }
    let Some(pos) = state.habits.iter().position(|h| h.id == habit_id) else {
        return Outcome::noop(state);
    };

    let mut next = state.clone();
    let habit = &mut next.habits[pos];
    let delta = new_points - habit.points;
    habit.name = new_name.to_string();
    habit.points = new_points;
    let completed = habit.completed;

    if completed && delta != 0 {
        apply_score_delta(&mut next, delta);
        refresh_achievements(&mut next, false);
    }
    Outcome::changed(next, None)
}

/// Remove a habit. Like [`delete_task`], earned points stay earned.
pub fn delete_habit(state: &AppState, habit_id: &str) -> Outcome {
    let mut next = state.clone();
    let before = next.habits.len();
    next.habits.retain(|h| h.id != habit_id);
    if next.habits.len() == before {
        return Outcome::noop(state);
    }
    Outcome::changed(next, None)
}

/// Compute level progression from lifetime XP. Level starts at 1 with a
/// 100 XP threshold that grows x1.5 (integer floor) per level, so the walk
/// terminates for any non-negative input.
pub fn level_info(total_xp: i64) -> LevelInfo {
    let mut level = 1u32;
    let mut xp_for_next = BASE_LEVEL_XP;
    let mut accumulated = 0i64;

    while total_xp >= accumulated + xp_for_next {
        accumulated += xp_for_next;
        level += 1;
        xp_for_next = xp_for_next * 3 / 2;
    }

    LevelInfo {
        level,
        xp: total_xp - accumulated,
        xp_to_next_level: xp_for_next,
    }
}

/// Points earned today, grouped for the analytics breakdown chart:
/// (low, medium, high, habits).
pub fn point_breakdown(state: &AppState) -> (i64, i64, i64, i64) {
    let by_urgency = |u: Urgency| {
        state
            .today_tasks
            .iter()
            .filter(|t| t.completed && t.urgency == Some(u))
            .map(|t| t.points)
            .sum()
    };
    let habit_points = state
        .habits
        .iter()
        .filter(|h| h.completed)
        .map(|h| h.points)
        .sum();
    (
        by_urgency(Urgency::Low),
        by_urgency(Urgency::Medium),
        by_urgency(Urgency::High),
        habit_points,
    )
}
