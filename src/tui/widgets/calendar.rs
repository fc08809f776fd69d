use chrono::{Datelike, Local, NaiveDate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use std::collections::HashMap;

use crate::Config;
use crate::models::DailyRecord;
use crate::tui::widgets::color::parse_color;

/// Calendar heatmap of the current month: each day is shaded by the points
/// earned that day relative to the best day on record. Days with no points
/// render plain; today is underlined.
pub fn render_calendar(f: &mut Frame, area: Rect, history: &[DailyRecord], config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);

    let today = Local::now().date_naive();
    let (points_by_day, max_points) = collect_month_points(history, today.year(), today.month());

    let title = format!("History — {}", today.format("%B %Y"));
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Mo Tu We Th Fr Sa Su",
        Style::default().fg(fg_color).add_modifier(Modifier::DIM),
    )));

    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today);
    let offset = first.weekday().num_days_from_monday() as usize;
    let days_in_month = days_in_month(today.year(), today.month());

    let mut week: Vec<Span> = Vec::new();
    for _ in 0..offset {
        week.push(Span::raw("   "));
    }
    for day in 1..=days_in_month {
        let earned = points_by_day.get(&day).copied().unwrap_or(0);
        let mut style = day_style(earned, max_points, accent, fg_color);
        if day == today.day() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        week.push(Span::styled(format!("{:2} ", day), style));

        let weekday_index = (offset + day as usize - 1) % 7;
        if weekday_index == 6 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color));
    f.render_widget(paragraph, area);
}

/// Sum history records per day-of-month for the given month, and find the
/// month's best positive day for scaling.
fn collect_month_points(
    history: &[DailyRecord],
    year: i32,
    month: u32,
) -> (HashMap<u32, i64>, i64) {
    let mut points_by_day = HashMap::new();
    let mut max_points = 0i64;

    for record in history {
        let Ok(date) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }
        let total = points_by_day.entry(date.day()).or_insert(0);
        *total += record.points;
        if *total > max_points {
            max_points = *total;
        }
    }
    (points_by_day, max_points)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (next, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 30,
    }
}

/// Shade a day by its share of the month's best day. RGB accents scale in
/// brightness; named accents fall back to dim/normal/bold steps.
fn day_style(earned: i64, max_points: i64, accent: Color, fg: Color) -> Style {
    if earned <= 0 || max_points <= 0 {
        return Style::default().fg(fg);
    }
    let ratio = (earned as f64 / max_points as f64).clamp(0.2, 1.0);

    if let Color::Rgb(r, g, b) = accent {
        let scale = |c: u8| ((c as f64) * ratio).round() as u8;
        Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(scale(r), scale(g), scale(b)))
    } else if ratio < 0.5 {
        Style::default().fg(accent).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    }
}
