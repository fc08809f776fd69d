use ratatui::style::Color;

/// Parse a color string from the theme config into a ratatui Color.
/// Supports the named terminal colors and hex (#RRGGBB). Unrecognized
/// strings fall back to white.
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => parse_hex_color(&s).unwrap_or(Color::White),
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Pick black or white text for readability against the given background.
pub fn get_contrast_text_color(bg: Color) -> Color {
    let (r, g, b) = match bg {
        Color::Rgb(r, g, b) => (r as u32, g as u32, b as u32),
        Color::Black | Color::DarkGray | Color::Red | Color::Blue | Color::Magenta => {
            return Color::White;
        }
        _ => return Color::Black,
    };
    // Perceived luminance (ITU-R BT.601)
    let luminance = (299 * r + 587 * g + 114 * b) / 1000;
    if luminance < 128 { Color::White } else { Color::Black }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color(" LightGreen "), Color::LightGreen);
        assert_eq!(parse_color("#E51A4C"), Color::Rgb(0xE5, 0x1A, 0x4C));
        assert_eq!(parse_color("not-a-color"), Color::White);
    }

    #[test]
    fn contrast_color_flips_on_luminance() {
        assert_eq!(get_contrast_text_color(Color::Rgb(10, 10, 10)), Color::White);
        assert_eq!(get_contrast_text_color(Color::Rgb(240, 240, 240)), Color::Black);
        assert_eq!(get_contrast_text_color(Color::Black), Color::White);
    }
}
