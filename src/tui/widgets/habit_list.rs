use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget};

use crate::Config;
use crate::models::Habit;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Habit scorecard: check off daily habits, see their point values.
pub fn render_habit_list(
    f: &mut Frame,
    area: Rect,
    habits: &[Habit],
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    let done = habits.iter().filter(|h| h.completed).count();
    let title = format!("Habit Scorecard ({} of {} done)", done, habits.len());

    if habits.is_empty() {
        let empty = Paragraph::new("No habits yet. Press n to add one.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(fg_color));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = habits
        .iter()
        .map(|habit| {
            let status_indicator = if habit.completed { "✓" } else { "○" };
            let points_str = format!("{} pts", habit.points);

            let name_width = max_width.saturating_sub(2 + points_str.chars().count() + 2);
            let mut name = habit.name.clone();
            if name.chars().count() > name_width {
                name = name.chars().take(name_width.saturating_sub(3)).collect::<String>() + "...";
            }

            let name_style = if habit.completed {
                Style::default().fg(fg_color).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(fg_color)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", status_indicator), Style::default().fg(fg_color)),
                Span::styled(name, name_style),
                Span::styled(format!(" {}", points_str), Style::default().fg(accent)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, area, f.buffer_mut(), list_state);
}
