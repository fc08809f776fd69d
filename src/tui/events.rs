use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;

use crate::engine;
use crate::models::Urgency;
use crate::scoring::ScoringClient;
use crate::tui::App;
use crate::tui::app::{
    DeleteTarget, HabitField, HabitForm, ItemForm, Mode, Tab, TaskField, TaskForm, TasksPane,
};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::parse_key_binding;

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the
/// user's shell becomes unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state on normal exit; afterwards the
    /// guard does nothing on drop.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors here, we are already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the
    // error message lands in the normal terminal.
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let terminal_size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Only Press events; Release would double-process on Windows.
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind == KeyEventKind::Press
                        && handle_key_event(&mut app, key_event)?
                    {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Layout recomputes from terminal.size() on the next draw
                }
                _ => {}
            }
        }
    }

    guard.restore()?;
    Ok(())
}

/// Top-level key dispatch. Returns Ok(true) when the app should quit.
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if app.modals.delete_confirmation.is_some() {
        return handle_delete_confirmation_modal(app, key_event);
    }

    match app.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Create | Mode::Edit => handle_form_mode(app, key_event),
        Mode::Generate => handle_generate_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Up | KeyCode::Down => {
            // Two options, so either direction flips the selection
            app.modals.delete_modal_selection = 1 - app.modals.delete_modal_selection;
        }
        KeyCode::Enter => {
            let confirmed = app.modals.delete_modal_selection == 0;
            let target = app.modals.delete_confirmation.take();
            app.modals.delete_modal_selection = 0;

            if confirmed {
                match target {
                    Some(DeleteTarget::Task(task)) => {
                        app.apply(engine::delete_task(&app.state, &task.id));
                        app.set_status_message("Task deleted".to_string());
                    }
                    Some(DeleteTarget::Habit(habit)) => {
                        app.apply(engine::delete_habit(&app.state, &habit.id));
                        app.set_status_message("Habit deleted".to_string());
                    }
                    None => {}
                }
            }
        }
        KeyCode::Esc => {
            app.modals.delete_confirmation = None;
            app.modals.delete_modal_selection = 0;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let is_help_key = parse_key_binding(&app.config.key_bindings.help)
        .map(|b| b.matches(&key_event))
        .unwrap_or(false);
    if key_event.code == KeyCode::Esc || is_help_key {
        app.mode = Mode::View;
    }
    Ok(false)
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc {
        app.form = None;
        app.mode = Mode::View;
        return Ok(false);
    }
    if key_event.code == KeyCode::Enter {
        submit_form(app);
        return Ok(false);
    }

    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::View;
        return Ok(false);
    };

    match form {
        ItemForm::Task(task_form) => handle_task_form_key(task_form, key_event),
        ItemForm::Habit(habit_form) => handle_habit_form_key(habit_form, key_event),
    }
    Ok(false)
}

fn handle_task_form_key(form: &mut TaskForm, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            form.current_field = match form.current_field {
                TaskField::Name => TaskField::Urgency,
                TaskField::Urgency => TaskField::Name,
            };
        }
        KeyCode::Left if form.current_field == TaskField::Urgency => {
            form.urgency_index =
                (form.urgency_index + Urgency::ALL.len() - 1) % Urgency::ALL.len();
        }
        KeyCode::Right if form.current_field == TaskField::Urgency => {
            form.urgency_index = (form.urgency_index + 1) % Urgency::ALL.len();
        }
        _ if form.current_field == TaskField::Name => {
            handle_input_key(&mut form.name, key_event);
        }
        _ => {}
    }
}

fn handle_habit_form_key(form: &mut HabitForm, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            form.current_field = match form.current_field {
                HabitField::Name => HabitField::Points,
                HabitField::Points => HabitField::Name,
            };
        }
        _ => {
            let input = match form.current_field {
                HabitField::Name => &mut form.name,
                HabitField::Points => &mut form.points,
            };
            handle_input_key(input, key_event);
        }
    }
}

/// Route a key into a single-line text input.
fn handle_input_key(input: &mut crate::tui::widgets::input::Input, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

fn submit_form(app: &mut App) {
    let Some(form) = app.form.take() else {
        app.mode = Mode::View;
        return;
    };

    let outcome = match &form {
        ItemForm::Task(task_form) => match &task_form.editing_id {
            Some(id) => {
                engine::update_task(&app.state, id, &task_form.name.value(), task_form.urgency())
            }
            None => engine::add_task(
                &app.state,
                task_form.target,
                &task_form.name.value(),
                task_form.urgency(),
            ),
        },
        ItemForm::Habit(habit_form) => {
            let points = habit_form.points.value().trim().parse::<i64>().unwrap_or(0);
            match &habit_form.editing_id {
                Some(id) => engine::update_habit(&app.state, id, &habit_form.name.value(), points),
                None => engine::add_habit(&app.state, &habit_form.name.value(), points),
            }
        }
    };

    // Rejected submissions keep the form open so the user can fix it
    let rejected = !outcome.changed && outcome.notice.is_some();
    app.apply(outcome);
    if rejected {
        app.form = Some(form);
    } else {
        app.mode = Mode::View;
    }
}

fn handle_generate_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => {
            app.generate_input.clear();
            app.mode = Mode::View;
        }
        KeyCode::Enter => {
            // Tasks arrive ';'-separated on one line; the scoring client
            // wants one per line.
            let raw = app
                .generate_input
                .value()
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");

            if raw.is_empty() {
                app.set_status_message("Nothing to plan. Type some tasks first.".to_string());
                return Ok(false);
            }

            // Synchronous call; the UI blocks for the duration of the request
            match ScoringClient::from_config(&app.config.scoring)
                .and_then(|client| client.assign_points(&raw))
            {
                Ok(scored) => {
                    app.apply(engine::add_generated_tasks(&app.state, &scored));
                    app.generate_input.clear();
                    app.mode = Mode::View;
                    app.tab = Tab::Tasks;
                    app.tasks_pane = TasksPane::Tomorrow;
                }
                Err(e) => {
                    app.set_status_message(format!("Scoring failed: {}", e));
                }
            }
        }
        _ => handle_input_key(&mut app.generate_input, key_event),
    }
    Ok(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();
    let pressed = |binding: &str| {
        parse_key_binding(binding)
            .map(|b| b.matches(&key_event))
            .unwrap_or(false)
    };

    if pressed(&kb.quit) {
        return Ok(true);
    }
    if pressed(&kb.help) {
        app.mode = Mode::Help;
        return Ok(false);
    }
    if pressed(&kb.tab_left) {
        app.tab = app.tab.prev();
        return Ok(false);
    }
    if pressed(&kb.tab_right) {
        app.tab = app.tab.next();
        return Ok(false);
    }
    if pressed(&kb.tab_1) {
        app.tab = Tab::Home;
        return Ok(false);
    }
    if pressed(&kb.tab_2) {
        app.tab = Tab::Tasks;
        return Ok(false);
    }
    if pressed(&kb.tab_3) {
        app.tab = Tab::Analytics;
        return Ok(false);
    }
    if pressed(&kb.list_up) {
        app.move_selection_up();
        return Ok(false);
    }
    if pressed(&kb.list_down) {
        app.move_selection_down();
        return Ok(false);
    }
    if pressed(&kb.switch_pane) && app.tab == Tab::Tasks {
        app.tasks_pane = match app.tasks_pane {
            TasksPane::Today => TasksPane::Tomorrow,
            TasksPane::Tomorrow => TasksPane::Today,
        };
        return Ok(false);
    }
    if pressed(&kb.toggle) {
        match app.tab {
            Tab::Tasks if app.tasks_pane == TasksPane::Today => {
                if let Some(task) = app.selected_today_task() {
                    let id = task.id.clone();
                    app.apply(engine::toggle_task(&app.state, &id));
                }
            }
            Tab::Analytics => {
                if let Some(habit) = app.selected_habit() {
                    let id = habit.id.clone();
                    app.apply(engine::toggle_habit(&app.state, &id));
                }
            }
            _ => {}
        }
        return Ok(false);
    }
    if pressed(&kb.new) {
        match app.tab {
            Tab::Tasks => {
                let target = match app.tasks_pane {
                    TasksPane::Today => crate::engine::TaskList::Today,
                    TasksPane::Tomorrow => crate::engine::TaskList::Tomorrow,
                };
                app.form = Some(ItemForm::Task(TaskForm::new(target)));
                app.mode = Mode::Create;
            }
            Tab::Analytics => {
                app.form = Some(ItemForm::Habit(HabitForm::new()));
                app.mode = Mode::Create;
            }
            Tab::Home => {}
        }
        return Ok(false);
    }
    if pressed(&kb.edit) {
        match app.tab {
            Tab::Tasks if app.tasks_pane == TasksPane::Today => {
                if let Some(task) = app.selected_today_task() {
                    app.form = Some(ItemForm::Task(TaskForm::editing(task)));
                    app.mode = Mode::Edit;
                }
            }
            Tab::Analytics => {
                if let Some(habit) = app.selected_habit() {
                    app.form = Some(ItemForm::Habit(HabitForm::editing(habit)));
                    app.mode = Mode::Edit;
                }
            }
            _ => {}
        }
        return Ok(false);
    }
    if pressed(&kb.delete) {
        let target = match app.tab {
            Tab::Tasks => match app.tasks_pane {
                TasksPane::Today => app.selected_today_task().cloned().map(DeleteTarget::Task),
                TasksPane::Tomorrow => {
                    app.selected_tomorrow_task().cloned().map(DeleteTarget::Task)
                }
            },
            Tab::Analytics => app.selected_habit().cloned().map(DeleteTarget::Habit),
            Tab::Home => None,
        };
        if let Some(target) = target {
            app.modals.delete_confirmation = Some(target);
            app.modals.delete_modal_selection = 0;
        }
        return Ok(false);
    }
    if pressed(&kb.plan) {
        app.generate_input.clear();
        app.mode = Mode::Generate;
        return Ok(false);
    }

    Ok(false)
}
