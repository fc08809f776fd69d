use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget};

use crate::Config;
use crate::models::{Task, Urgency};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Low => Color::Green,
        Urgency::Medium => Color::Yellow,
        Urgency::High => Color::Red,
    }
}

/// Render one task pane (today or tomorrow). The focused pane gets the
/// theme highlight on its selected row; the unfocused pane renders without
/// a selection highlight so focus is unambiguous.
pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    tasks: &[Task],
    list_state: &mut ListState,
    focused: bool,
    config: &Config,
) {
    let max_width = area.width.saturating_sub(4) as usize; // borders + padding
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let status_indicator = if task.completed { "✓" } else { "○" };
            let points_str = format!("{} pts", task.points);
            let urgency_str = task
                .urgency
                .map(|u| format!(" [{}]", u))
                .unwrap_or_default();

            // Leave room for the points column on the right
            let name_width = max_width
                .saturating_sub(2 + urgency_str.chars().count() + points_str.chars().count() + 2);
            let mut name = task.name.clone();
            if name.chars().count() > name_width {
                name = name.chars().take(name_width.saturating_sub(3)).collect::<String>() + "...";
            }

            let name_style = if task.completed {
                Style::default().fg(fg_color).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(fg_color)
            };

            let mut spans = vec![
                Span::styled(format!("{} ", status_indicator), Style::default().fg(fg_color)),
                Span::styled(name, name_style),
            ];
            if let Some(urgency) = task.urgency {
                spans.push(Span::styled(
                    urgency_str.clone(),
                    Style::default().fg(urgency_color(urgency)),
                ));
            }
            spans.push(Span::styled(
                format!(" {}", points_str),
                Style::default().fg(accent),
            ));

            ListItem::new(Line::from(spans))
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };

    let block_title = format!("{} ({})", title, tasks.len());
    let mut list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(block_title)
                .border_style(border_style),
        )
        .style(Style::default().fg(fg_color));

    if focused {
        list = list.highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));
    }

    if tasks.is_empty() {
        let empty = ratatui::widgets::Paragraph::new("No tasks here yet")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} (0)", title))
                    .border_style(border_style),
            )
            .style(Style::default().fg(fg_color));
        f.render_widget(empty, area);
        return;
    }

    StatefulWidget::render(list, area, f.buffer_mut(), list_state);
}
