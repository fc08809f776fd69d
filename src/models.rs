use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority tag on a task. Each urgency maps to a fixed point value,
/// so editing a task's urgency also recomputes its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Fixed urgency-to-points table: low 5, medium 10, high 20.
    pub fn points(self) -> i64 {
        match self {
            Urgency::Low => 5,
            Urgency::Medium => 10,
            Urgency::High => 20,
        }
    }

    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(format!("Unknown urgency: {} (expected low, medium or high)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub points: i64,
    pub completed: bool,
    /// Tasks created by the scoring service carry raw points and no urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl Task {
    pub fn new(id: String, name: String, urgency: Urgency) -> Self {
        Self {
            id,
            name,
            points: urgency.points(),
            completed: false,
            urgency: Some(urgency),
        }
    }

    /// Task with caller-supplied points and no urgency (scoring-service path).
    pub fn scored(id: String, name: String, points: i64) -> Self {
        Self {
            id,
            name,
            points,
            completed: false,
            urgency: None,
        }
    }
}

/// A recurring daily item. Same lifecycle as a task, but points are a
/// free-form positive integer and there is no urgency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub points: i64,
    pub completed: bool,
}

impl Habit {
    pub fn new(id: String, name: String, points: i64) -> Self {
        Self {
            id,
            name,
            points,
            completed: false,
        }
    }
}

/// Per-calendar-day point total. One record per distinct date; the value is
/// the sum of all signed deltas applied that day and may be negative
/// transiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: String, // ISO 8601: YYYY-MM-DD
    pub points: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementIcon {
    Footprints,
    Star,
    Gem,
}

impl AchievementIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            AchievementIcon::Footprints => "👣",
            AchievementIcon::Star => "★",
            AchievementIcon::Gem => "◆",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    pub icon: AchievementIcon,
}

/// The whole application state. Exactly one live instance per session; it is
/// serialized wholesale as the unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub today_tasks: Vec<Task>,
    #[serde(default)]
    pub tomorrow_tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub history: Vec<DailyRecord>,
    #[serde(default)]
    pub weekly_points: i64,
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal: i64,
    #[serde(default)]
    pub daily_streak: i64,
    #[serde(default)]
    pub total_xp: i64,
    #[serde(default = "initial_achievements")]
    pub achievements: Vec<Achievement>,
}

fn default_weekly_goal() -> i64 {
    250
}

pub fn initial_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: "1".to_string(),
            name: "First Step".to_string(),
            description: "Complete your first task.".to_string(),
            unlocked: false,
            icon: AchievementIcon::Footprints,
        },
        Achievement {
            id: "2".to_string(),
            name: "Novice".to_string(),
            description: "Reach level 5.".to_string(),
            unlocked: false,
            icon: AchievementIcon::Star,
        },
        Achievement {
            id: "3".to_string(),
            name: "Adept".to_string(),
            description: "Reach level 10.".to_string(),
            unlocked: false,
            icon: AchievementIcon::Gem,
        },
    ]
}

impl Default for AppState {
    /// Seed dataset used when nothing has been persisted yet.
    fn default() -> Self {
        Self {
            today_tasks: vec![
                Task::new("t1".to_string(), "Finalize Q3 report".to_string(), Urgency::High),
                Task::new("t2".to_string(), "Prep for team meeting".to_string(), Urgency::Medium),
                Task::new("t3".to_string(), "Reply to important emails".to_string(), Urgency::Medium),
                Task::new("t4".to_string(), "Schedule dentist appointment".to_string(), Urgency::Low),
            ],
            tomorrow_tasks: Vec::new(),
            habits: Vec::new(),
            history: Vec::new(),
            weekly_points: 0,
            weekly_goal: 250,
            daily_streak: 3,
            total_xp: 0,
            achievements: initial_achievements(),
        }
    }
}

/// Level progression derived from lifetime XP. Recomputed on every read,
/// never persisted, so it cannot drift from total_xp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u32,
    /// XP progress within the current level.
    pub xp: i64,
    /// XP required to advance from the current level.
    pub xp_to_next_level: i64,
}
