use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// One-line status bar: an advisory message when there is one, otherwise
/// key hints for the current mode, fitted to the available width.
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let max_width = area.width as usize;
    let (content, style) = if let Some(msg) = message {
        let msg_fg = get_contrast_text_color(highlight_bg);
        (
            truncate(msg, max_width),
            Style::default()
                .fg(msg_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            fit_hints(key_hints, max_width),
            Style::default().fg(fg_color).bg(bg_color),
        )
    };

    let paragraph = Paragraph::new(content).style(style);
    f.render_widget(paragraph, area);
}

/// Join as many hints as fit, separated by bullets, ending with an ellipsis
/// when some had to be dropped.
fn fit_hints(hints: &[String], max_width: usize) -> String {
    let separator = " • ";
    let mut text = String::new();

    for (i, hint) in hints.iter().enumerate() {
        let added = if i == 0 {
            hint.chars().count()
        } else {
            separator.chars().count() + hint.chars().count()
        };
        if text.chars().count() + added > max_width {
            if !text.is_empty() {
                text = truncate(&format!("{}{}...", text, separator), max_width);
            } else {
                text = truncate(hint, max_width);
            }
            return text;
        }
        if i > 0 {
            text.push_str(separator);
        }
        text.push_str(hint);
    }
    text
}

fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
