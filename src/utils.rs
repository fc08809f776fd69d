use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application. Dev keeps its own config and state so
/// experiments never touch real data; selected by the --dev CLI flag only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "atomik-dev",
            Profile::Prod => "atomik",
        }
    }
}

/// Configuration directory for the current platform and profile.
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "atomik", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Data directory (state blob location) for the current platform and profile.
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "atomik", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Today as an ISO 8601 date string (YYYY-MM-DD). Local time, since daily
/// records track the user's calendar day.
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Parsed key binding from a config string.
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

impl ParsedKeyBinding {
    /// Whether a key event matches this binding.
    pub fn matches(&self, event: &crossterm::event::KeyEvent) -> bool {
        let ctrl = has_primary_modifier(event.modifiers);
        event.code == self.key_code && ctrl == self.requires_ctrl
    }
}

/// Check for the primary modifier: Ctrl everywhere, with Option/Alt accepted
/// as an alias on macOS.
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Parse a key binding string from config. Supports single characters
/// ("q", "j"), special keys ("Enter", "F1", "Space") and a Ctrl+ prefix.
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    use crossterm::event::KeyCode;

    match key_str {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Tab" => Ok(KeyCode::Tab),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "Delete" => Ok(KeyCode::Delete),
        _ => {
            if let Some(n) = key_str.strip_prefix('F') {
                if let Ok(n) = n.parse::<u8>() {
                    if (1..=12).contains(&n) {
                        return Ok(KeyCode::F(n));
                    }
                }
            }
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key binding: {}", key_str)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn parses_single_char_binding() {
        let parsed = parse_key_binding("q").unwrap();
        assert_eq!(parsed.key_code, KeyCode::Char('q'));
        assert!(!parsed.requires_ctrl);
    }

    #[test]
    fn parses_ctrl_binding() {
        let parsed = parse_key_binding("Ctrl+g").unwrap();
        assert_eq!(parsed.key_code, KeyCode::Char('g'));
        assert!(parsed.requires_ctrl);
    }

    #[test]
    fn parses_special_keys() {
        assert_eq!(parse_key_binding("Space").unwrap().key_code, KeyCode::Char(' '));
        assert_eq!(parse_key_binding("F1").unwrap().key_code, KeyCode::F(1));
        assert_eq!(parse_key_binding("Enter").unwrap().key_code, KeyCode::Enter);
    }

    #[test]
    fn rejects_unknown_binding() {
        assert!(parse_key_binding("SuperKey").is_err());
    }

    #[test]
    fn today_string_is_iso_date() {
        let today = today_string();
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
