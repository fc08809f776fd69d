pub mod cli;
pub mod config;
pub mod engine;
pub mod models;
pub mod scoring;
pub mod store;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{AppState, DailyRecord, Habit, Task, Urgency};
pub use store::StateStore;
pub use utils::Profile;
