pub mod breakdown;
pub mod calendar;
pub mod color;
pub mod confirm_delete;
pub mod form;
pub mod habit_list;
pub mod help;
pub mod home;
pub mod input;
pub mod status_bar;
pub mod tabs;
pub mod task_list;
