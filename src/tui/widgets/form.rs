use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::engine::TaskList;
use crate::models::Urgency;
use crate::tui::app::{HabitField, HabitForm, TaskField, TaskForm};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::input::Input;

fn field_styles(config: &Config) -> (Style, Style) {
    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };
    let active = Style::default().bg(highlight_bg).fg(highlight_fg);
    let inactive = Style::default()
        .fg(parse_color(&active_theme.fg))
        .add_modifier(Modifier::DIM);
    (active, inactive)
}

/// Render a bordered single-line text field, returning the cursor position
/// when the field is active.
fn render_text_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    input: &Input,
    active: bool,
    style: Style,
) -> Option<(u16, u16)> {
    let content_width = area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = input.visible(content_width);
    let paragraph = Paragraph::new(Span::styled(visible_text, style))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);

    if active {
        Some((area.x + 1 + cursor_x as u16, area.y + 1))
    } else {
        None
    }
}

pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let (active_style, inactive_style) = field_styles(config);
    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Urgency
            Constraint::Min(0),
        ])
        .split(area);

    let is_name_active = form.current_field == TaskField::Name;
    let name_style = if is_name_active { active_style } else { inactive_style };
    let list_label = match form.target {
        TaskList::Today => "Task Name (today)",
        TaskList::Tomorrow => "Task Name (tomorrow)",
    };
    let cursor = render_text_field(f, field_areas[0], list_label, &form.name, is_name_active, name_style);

    // Urgency is a selector, not a text field; ← → cycles through the tiers.
    let is_urgency_active = form.current_field == TaskField::Urgency;
    let urgency_style = if is_urgency_active { active_style } else { inactive_style };
    let mut spans: Vec<Span> = Vec::new();
    for (i, urgency) in Urgency::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", urgency_style));
        }
        let selected = *urgency == form.urgency();
        let label = format!("{} ({} pts)", urgency, urgency.points());
        let style = if selected {
            urgency_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            urgency_style
        };
        spans.push(Span::styled(if selected { format!("[{label}]") } else { label }, style));
    }
    let urgency_paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Urgency"));
    f.render_widget(urgency_paragraph, field_areas[1]);

    if let Some((x, y)) = cursor {
        f.set_cursor_position((x, y));
    }
}

pub fn render_habit_form(f: &mut Frame, area: Rect, form: &HabitForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let (active_style, inactive_style) = field_styles(config);
    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Points
            Constraint::Min(0),
        ])
        .split(area);

    let is_name_active = form.current_field == HabitField::Name;
    let name_style = if is_name_active { active_style } else { inactive_style };
    let name_cursor =
        render_text_field(f, field_areas[0], "Habit Name", &form.name, is_name_active, name_style);

    let is_points_active = form.current_field == HabitField::Points;
    let points_style = if is_points_active { active_style } else { inactive_style };
    let points_cursor = render_text_field(
        f,
        field_areas[1],
        "Points per completion",
        &form.points,
        is_points_active,
        points_style,
    );

    if let Some((x, y)) = name_cursor.or(points_cursor) {
        f.set_cursor_position((x, y));
    }
}

/// The planning prompt: one input line where tasks are separated by ';',
/// sent off for scoring on Enter.
pub fn render_generate_form(f: &mut Frame, area: Rect, input: &Input, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let (active_style, _) = field_styles(config);
    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let cursor = render_text_field(
        f,
        field_areas[0],
        "Plan tomorrow (separate tasks with ;)",
        input,
        true,
        active_style,
    );

    let fg = parse_color(&config.get_active_theme().fg);
    let hint = Paragraph::new(Line::from(Span::styled(
        "Enter sends the list for scoring. Each task comes back worth 1 to 10 points.",
        Style::default().fg(fg).add_modifier(Modifier::DIM),
    )));
    f.render_widget(hint, field_areas[1]);

    if let Some((x, y)) = cursor {
        f.set_cursor_position((x, y));
    }
}
