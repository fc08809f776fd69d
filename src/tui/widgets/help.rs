use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::confirm_delete::popup_area;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 70);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Switch tabs\n", kb.tab_left, kb.tab_right));
    text.push_str(&format!(
        "  {} / {} / {}: Jump to Home / Tasks / Analytics\n",
        kb.tab_1, kb.tab_2, kb.tab_3
    ));
    text.push_str(&format!("  {} / {}: Move selection up/down\n", kb.list_up, kb.list_down));
    text.push_str(&format!("  {}: Switch between today and tomorrow\n", kb.switch_pane));

    text.push_str("\nTasks and habits:\n");
    text.push_str(&format!("  {}: Toggle completion\n", kb.toggle));
    text.push_str(&format!("  {}: New task or habit\n", kb.new));
    text.push_str(&format!("  {}: Edit selected item\n", kb.edit));
    text.push_str(&format!("  {}: Delete selected item\n", kb.delete));
    text.push_str(&format!("  {}: Plan tomorrow with scored tasks\n", kb.plan));

    text.push_str("\nForms:\n");
    text.push_str(&format!("  {}: Save\n", kb.confirm));
    text.push_str("  Tab / Up / Down: Move between fields\n");
    text.push_str("  Left / Right: Change urgency\n");
    text.push_str("  Esc: Cancel\n");

    text.push_str("\nGeneral:\n");
    text.push_str(&format!("  {}: Show this help\n", kb.help));
    text.push_str(&format!("  {}: Quit\n", kb.quit));
    text.push_str("\nPress Esc or F1 to close this window.\n");

    text
}
