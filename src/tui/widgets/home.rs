use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::Config;
use crate::engine::level_info;
use crate::models::AppState;
use crate::tui::widgets::color::parse_color;

/// Home dashboard: weekly goal progress, daily streak, level/XP and the
/// next locked achievement. Level numbers are derived from total_xp on
/// every render, never read from the blob.
pub fn render_home(f: &mut Frame, area: Rect, state: &AppState, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Weekly goal gauge
            Constraint::Length(3), // Level gauge
            Constraint::Length(3), // Streak + achievement
            Constraint::Min(0),
        ])
        .split(area);

    // Weekly goal progress
    let ratio = if state.weekly_goal > 0 {
        (state.weekly_points as f64 / state.weekly_goal as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let weekly = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Weekly Goal"))
        .gauge_style(Style::default().fg(accent))
        .ratio(ratio)
        .label(format!("{} / {} points", state.weekly_points, state.weekly_goal));
    f.render_widget(weekly, rows[0]);

    // Level and XP progress
    let info = level_info(state.total_xp);
    let xp_ratio = if info.xp_to_next_level > 0 {
        (info.xp as f64 / info.xp_to_next_level as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let level = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Level {}", info.level)),
        )
        .gauge_style(Style::default().fg(accent))
        .ratio(xp_ratio)
        .label(format!("{} / {} XP to next level", info.xp, info.xp_to_next_level));
    f.render_widget(level, rows[1]);

    // Streak and next achievement side by side
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);

    let streak = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("⚡ {} ", state.daily_streak),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("days in a row", Style::default().fg(fg_color)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Daily Streak"));
    f.render_widget(streak, columns[0]);

    let next = state.achievements.iter().find(|a| !a.unlocked);
    let achievement_line = match next {
        Some(a) => Line::from(vec![
            Span::styled(format!("{} ", a.icon.glyph()), Style::default().fg(accent)),
            Span::styled(
                format!("{}: ", a.name),
                Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(a.description.clone(), Style::default().fg(fg_color)),
        ]),
        None => Line::from(Span::styled(
            "All achievements unlocked!",
            Style::default().fg(accent),
        )),
    };
    let achievement = Paragraph::new(achievement_line)
        .block(Block::default().borders(Borders::ALL).title("Next Achievement"));
    f.render_widget(achievement, columns[1]);

    // Motto fills the rest
    if rows[3].height >= 3 {
        let motto = Paragraph::new(
            "Turn your goals into daily actions. Track progress, build streaks, level up.",
        )
        .style(Style::default().fg(fg_color))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(motto, rows[3]);
    }
}
