use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use crate::Config;
use crate::engine::point_breakdown;
use crate::models::AppState;
use crate::tui::widgets::color::parse_color;

/// Bar chart of today's earned points, split by urgency tier and habits.
/// Zero-valued groups are dropped so empty tiers don't draw flat bars.
pub fn render_breakdown(f: &mut Frame, area: Rect, state: &AppState, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);

    let (low, medium, high, habits) = point_breakdown(state);
    let groups: Vec<(&str, i64, Color)> = [
        ("Low", low, Color::Green),
        ("Med", medium, Color::Yellow),
        ("High", high, Color::Red),
        ("Habit", habits, accent),
    ]
    .into_iter()
    .filter(|(_, value, _)| *value > 0)
    .collect();

    let block = Block::default().borders(Borders::ALL).title("Point Breakdown");

    if groups.is_empty() {
        let empty = Paragraph::new("No points earned today. Complete some tasks!")
            .style(Style::default().fg(fg_color))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = groups
        .iter()
        .map(|(label, value, color)| {
            Bar::default()
                .value(*value as u64)
                .label(ratatui::text::Line::from(*label))
                .style(Style::default().fg(*color))
                .value_style(Style::default().fg(Color::Black).bg(*color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(7)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars))
        .style(Style::default().fg(fg_color));

    f.render_widget(chart, area);
}
