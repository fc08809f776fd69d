use crate::engine::{Outcome, TaskList};
use crate::models::{AppState, Habit, Task, Urgency};
use crate::tui::widgets::input::Input;
use crate::{Config, StateStore};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// How long a status message stays visible before key hints return.
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Tasks,
    Analytics,
}

impl Tab {
    pub fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Tasks => 1,
            Tab::Analytics => 2,
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Home => Tab::Tasks,
            Tab::Tasks => Tab::Analytics,
            Tab::Analytics => Tab::Home,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::Home => Tab::Analytics,
            Tab::Tasks => Tab::Home,
            Tab::Analytics => Tab::Tasks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Create,
    Edit,
    Generate,
    Help,
}

/// Which task pane has focus on the Tasks tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TasksPane {
    Today,
    Tomorrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Urgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitField {
    Name,
    Points,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskField,
    pub name: Input,
    pub urgency_index: usize, // index into Urgency::ALL
    pub target: TaskList,
    pub editing_id: Option<String>, // None for new items, Some(id) for editing
}

impl TaskForm {
    pub fn new(target: TaskList) -> Self {
        Self {
            current_field: TaskField::Name,
            name: Input::new(),
            urgency_index: 1, // medium, the form default
            target,
            editing_id: None,
        }
    }

    pub fn editing(task: &Task) -> Self {
        let urgency_index = Urgency::ALL
            .iter()
            .position(|&u| Some(u) == task.urgency)
            .unwrap_or(1);
        Self {
            current_field: TaskField::Name,
            name: Input::from_string(task.name.clone()),
            urgency_index,
            target: TaskList::Today,
            editing_id: Some(task.id.clone()),
        }
    }

    pub fn urgency(&self) -> Urgency {
        Urgency::ALL[self.urgency_index % Urgency::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct HabitForm {
    pub current_field: HabitField,
    pub name: Input,
    pub points: Input,
    pub editing_id: Option<String>,
}

impl HabitForm {
    pub fn new() -> Self {
        Self {
            current_field: HabitField::Name,
            name: Input::new(),
            points: Input::from_string("10".to_string()),
            editing_id: None,
        }
    }

    pub fn editing(habit: &Habit) -> Self {
        Self {
            current_field: HabitField::Name,
            name: Input::from_string(habit.name.clone()),
            points: Input::from_string(habit.points.to_string()),
            editing_id: Some(habit.id.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ItemForm {
    Task(TaskForm),
    Habit(HabitForm),
}

#[derive(Debug, Clone)]
pub enum DeleteTarget {
    Task(Task),
    Habit(Habit),
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub delete_confirmation: Option<DeleteTarget>,
    pub delete_modal_selection: usize,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub store: StateStore,

    // The single live domain state; every mutation goes through
    // engine transitions committed by apply()
    pub state: AppState,

    // UI state
    pub tab: Tab,
    pub mode: Mode,
    pub tasks_pane: TasksPane,
    pub today_list: ListState,
    pub tomorrow_list: ListState,
    pub habit_list: ListState,
    pub form: Option<ItemForm>,
    pub generate_input: Input,
    pub modals: ModalState,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, store: StateStore) -> Self {
        let state = store.load_or_default();

        let mut app = Self {
            config,
            store,
            state,
            tab: Tab::Home,
            mode: Mode::View,
            tasks_pane: TasksPane::Today,
            today_list: ListState::default(),
            tomorrow_list: ListState::default(),
            habit_list: ListState::default(),
            form: None,
            generate_input: Input::new(),
            modals: ModalState::default(),
            status: StatusState::default(),
        };
        app.clamp_selections();
        app
    }

    /// Commit an engine transition: adopt the new state, persist it
    /// best-effort, and surface any advisory in the status bar.
    pub fn apply(&mut self, outcome: Outcome) {
        if outcome.changed {
            self.state = outcome.state;
            self.store.save_best_effort(&self.state);
            self.clamp_selections();
        }
        if let Some(notice) = outcome.notice {
            self.set_status_message(notice.to_string());
        }
    }

    /// Keep every list selection inside its list; select the first item
    /// when a list becomes non-empty.
    pub fn clamp_selections(&mut self) {
        clamp(&mut self.today_list, self.state.today_tasks.len());
        clamp(&mut self.tomorrow_list, self.state.tomorrow_tasks.len());
        clamp(&mut self.habit_list, self.state.habits.len());
    }

    pub fn selected_today_task(&self) -> Option<&Task> {
        self.today_list
            .selected()
            .and_then(|i| self.state.today_tasks.get(i))
    }

    pub fn selected_tomorrow_task(&self) -> Option<&Task> {
        self.tomorrow_list
            .selected()
            .and_then(|i| self.state.tomorrow_tasks.get(i))
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        self.habit_list
            .selected()
            .and_then(|i| self.state.habits.get(i))
    }

    /// The list the current tab and pane focus points at, with its length.
    fn focused_list(&mut self) -> Option<(&mut ListState, usize)> {
        match self.tab {
            Tab::Home => None,
            Tab::Tasks => match self.tasks_pane {
                TasksPane::Today => Some((&mut self.today_list, self.state.today_tasks.len())),
                TasksPane::Tomorrow => {
                    Some((&mut self.tomorrow_list, self.state.tomorrow_tasks.len()))
                }
            },
            Tab::Analytics => Some((&mut self.habit_list, self.state.habits.len())),
        }
    }

    pub fn move_selection_up(&mut self) {
        if let Some((list, len)) = self.focused_list() {
            if len == 0 {
                return;
            }
            let current = list.selected().unwrap_or(0);
            list.select(Some(if current == 0 { len - 1 } else { current - 1 }));
        }
    }

    pub fn move_selection_down(&mut self) {
        if let Some((list, len)) = self.focused_list() {
            if len == 0 {
                return;
            }
            let current = list.selected().unwrap_or(0);
            list.select(Some(if current + 1 >= len { 0 } else { current + 1 }));
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    /// Clear the status message once it has been on screen long enough.
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }
}

fn clamp(list: &mut ListState, len: usize) {
    match list.selected() {
        _ if len == 0 => list.select(None),
        None => list.select(Some(0)),
        Some(i) if i >= len => list.select(Some(len - 1)),
        _ => {}
    }
}
