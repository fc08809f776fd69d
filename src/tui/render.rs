use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout as RatLayout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{ItemForm, Mode, Tab, TasksPane};
use crate::tui::{App, Layout};
use crate::tui::widgets::{
    breakdown::render_breakdown,
    calendar::render_calendar,
    color::parse_color,
    confirm_delete::render_confirm_delete,
    form::{render_generate_form, render_habit_form, render_task_form},
    habit_list::render_habit_list,
    help::render_help,
    home::render_home,
    status_bar::render_status_bar,
    tabs::render_tabs,
    task_list::render_task_list,
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("ATOMIK")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.tab, &app.config);

    match app.mode {
        Mode::View | Mode::Help => render_tab_content(f, app, layout),
        Mode::Create | Mode::Edit => match app.form {
            Some(ItemForm::Task(ref task_form)) => {
                render_task_form(f, layout.main_area, task_form, &app.config);
            }
            Some(ItemForm::Habit(ref habit_form)) => {
                render_habit_form(f, layout.main_area, habit_form, &app.config);
            }
            None => render_tab_content(f, app, layout),
        },
        Mode::Generate => {
            render_generate_form(f, layout.main_area, &app.generate_input, &app.config);
        }
    }

    // Overlays draw on top of whatever the mode rendered
    if app.mode == Mode::Help {
        render_help(f, layout.inner_area, &app.config);
    }
    if let Some(ref target) = app.modals.delete_confirmation {
        render_confirm_delete(
            f,
            layout.inner_area,
            target,
            app.modals.delete_modal_selection,
            &app.config,
        );
    }

    let hints = key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &hints,
        &app.config,
    );
}

fn render_tab_content(f: &mut Frame, app: &mut App, layout: &Layout) {
    match app.tab {
        Tab::Home => {
            render_home(f, layout.main_area, &app.state, &app.config);
        }
        Tab::Tasks => {
            let panes = RatLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout.main_area);

            render_task_list(
                f,
                panes[0],
                "Today",
                &app.state.today_tasks,
                &mut app.today_list,
                app.tasks_pane == TasksPane::Today,
                &app.config,
            );
            render_task_list(
                f,
                panes[1],
                "Tomorrow",
                &app.state.tomorrow_tasks,
                &mut app.tomorrow_list,
                app.tasks_pane == TasksPane::Tomorrow,
                &app.config,
            );
        }
        Tab::Analytics => {
            let rows = RatLayout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(6),     // Habit scorecard
                    Constraint::Length(10), // Calendar + breakdown
                ])
                .split(layout.main_area);
            let bottom = RatLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);

            render_habit_list(f, rows[0], &app.state.habits, &mut app.habit_list, &app.config);
            render_calendar(f, bottom[0], &app.state.history, &app.config);
            render_breakdown(f, bottom[1], &app.state, &app.config);
        }
    }
}

/// Key hints shown in the status bar when no message is up, per mode.
fn key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.mode {
        _ if app.modals.delete_confirmation.is_some() => vec![
            "↑↓ choose".to_string(),
            "Enter confirm".to_string(),
            "Esc cancel".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![
                format!("{} quit", kb.quit),
                format!("{} help", kb.help),
                format!("{}/{} tabs", kb.tab_left, kb.tab_right),
            ];
            match app.tab {
                Tab::Home => {}
                Tab::Tasks => {
                    hints.push(format!("{} switch pane", kb.switch_pane));
                    hints.push(format!("{} toggle", kb.toggle));
                    hints.push(format!("{} new", kb.new));
                    hints.push(format!("{} edit", kb.edit));
                    hints.push(format!("{} delete", kb.delete));
                    hints.push(format!("{} plan", kb.plan));
                }
                Tab::Analytics => {
                    hints.push(format!("{} toggle", kb.toggle));
                    hints.push(format!("{} new", kb.new));
                    hints.push(format!("{} edit", kb.edit));
                    hints.push(format!("{} delete", kb.delete));
                }
            }
            hints
        }
        Mode::Create | Mode::Edit => vec![
            format!("{} save", kb.confirm),
            "Tab next field".to_string(),
            "Esc cancel".to_string(),
        ],
        Mode::Generate => vec![
            format!("{} score tasks", kb.confirm),
            "Esc cancel".to_string(),
        ],
        Mode::Help => vec!["Esc close".to_string()],
    }
}
