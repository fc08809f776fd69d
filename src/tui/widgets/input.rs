/// Single-line text input with a cursor and horizontal scrolling.
/// Cursor position is a character offset, not a byte offset, so multi-byte
/// input behaves correctly.
#[derive(Debug, Clone)]
pub struct Input {
    chars: Vec<char>,
    pub cursor: usize,
}

impl Input {
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
        }
    }

    pub fn from_string(content: String) -> Self {
        let chars: Vec<char> = content.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// The slice of text that fits a viewport of the given width with the
    /// cursor kept inside it, plus the cursor's x offset within that slice.
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let scroll = if self.cursor >= width {
            self.cursor + 1 - width
        } else {
            0
        };
        let visible: String = self.chars.iter().skip(scroll).take(width).collect();
        (visible, self.cursor - scroll)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace() {
        let mut input = Input::new();
        for ch in "habit".chars() {
            input.insert_char(ch);
        }
        assert_eq!(input.value(), "habit");
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "hab");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn cursor_movement_stays_in_bounds() {
        let mut input = Input::from_string("ab".to_string());
        input.move_right();
        assert_eq!(input.cursor, 2);
        input.move_left();
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn mid_string_edits_use_char_offsets() {
        let mut input = Input::from_string("ab👣cd".to_string());
        input.move_home();
        input.move_right();
        input.move_right();
        input.delete();
        assert_eq!(input.value(), "abcd");
        input.insert_char('x');
        assert_eq!(input.value(), "abxcd");
    }

    #[test]
    fn visible_window_follows_cursor() {
        let mut input = Input::from_string("0123456789".to_string());
        let (shown, cursor_x) = input.visible(5);
        // Cursor at end: window shows the tail
        assert_eq!(shown, "6789");
        assert_eq!(cursor_x, 4);

        input.move_home();
        let (shown, cursor_x) = input.visible(5);
        assert_eq!(shown, "01234");
        assert_eq!(cursor_x, 0);
    }
}
