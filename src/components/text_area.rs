use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::components::{Component, ComponentContext};
use crate::theme;
use crate::ui::UiFrame;

/// A bordered, unwrapped multi-line text box.
///
/// The cursor is a byte offset that always sits on a char boundary. Read-only
/// areas still move the cursor so long output can be scrolled.
#[derive(Debug, Clone)]
pub struct TextAreaComponent {
    title: String,
    text: String,
    cursor: usize,
    editable: bool,
    scroll: (u16, u16),
}

impl TextAreaComponent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            cursor: 0,
            editable: true,
            scroll: (0, 0),
        }
    }

    pub fn read_only(title: impl Into<String>) -> Self {
        Self {
            editable: false,
            ..Self::new(title)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole content and park the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.scroll = (0, 0);
    }

    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            let end = self.cursor + c.len_utf8();
            self.text.replace_range(self.cursor..end, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let col = self.text[start..self.cursor].chars().count();
        let prev_end = start - 1;
        let prev_start = self.line_start(prev_end);
        self.cursor = self.byte_at_col(prev_start, prev_end, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            return;
        }
        let col = self.text[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = self.byte_at_col(next_start, next_end, col);
    }

    /// Cursor as (row, column), both counted in lines and chars.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let row = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (row, col)
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.text[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.text.len())
    }

    fn byte_at_col(&self, start: usize, end: usize, col: usize) -> usize {
        self.text[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return false;
        }
        match key.code {
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Char(c) if self.editable => self.insert_char(c),
            KeyCode::Enter if self.editable => self.insert_char('\n'),
            KeyCode::Backspace if self.editable => self.backspace(),
            KeyCode::Delete if self.editable => self.delete(),
            _ => return false,
        }
        true
    }

    fn keep_cursor_visible(&mut self, height: u16, width: u16) {
        let (row, col) = self.cursor_position();
        let row = row.min(u16::MAX as usize) as u16;
        let col = col.min(u16::MAX as usize) as u16;
        let (mut top, mut left) = self.scroll;
        if row < top {
            top = row;
        } else if height > 0 && row >= top.saturating_add(height) {
            top = row - height + 1;
        }
        if col < left {
            left = col;
        } else if width > 0 && col >= left.saturating_add(width) {
            left = col - width + 1;
        }
        self.scroll = (top, left);
    }
}

impl Component for TextAreaComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let border = if ctx.focused() {
            Style::default().fg(theme::accent())
        } else {
            Style::default().fg(theme::border())
        };
        let title = if self.editable {
            format!(" {} ", self.title)
        } else {
            format!(" {} (read-only) ", self.title)
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        self.keep_cursor_visible(inner.height, inner.width);
        let paragraph = Paragraph::new(self.text.as_str()).scroll(self.scroll);
        frame.render_widget(paragraph, inner);

        if ctx.focused() {
            let (row, col) = self.cursor_position();
            let x = inner.x as usize + col - self.scroll.1 as usize;
            let y = inner.y as usize + row - self.scroll.0 as usize;
            if x < (inner.x + inner.width) as usize && y < (inner.y + inner.height) as usize {
                frame.set_cell_style(
                    x as u16,
                    y as u16,
                    Style::default().add_modifier(Modifier::REVERSED),
                );
            }
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if !ctx.focused() {
            return false;
        }
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) if self.editable => {
                self.insert_str(text);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_and_backspace() {
        let mut t = TextAreaComponent::new("t");
        let ctx = ComponentContext::new(true);
        for c in "héllo".chars() {
            assert!(t.handle_event(&key(KeyCode::Char(c)), &ctx));
        }
        t.handle_event(&key(KeyCode::Backspace), &ctx);
        assert_eq!(t.text(), "héll");
        t.handle_event(&key(KeyCode::Left), &ctx);
        t.handle_event(&key(KeyCode::Left), &ctx);
        t.handle_event(&key(KeyCode::Backspace), &ctx);
        assert_eq!(t.text(), "hll");
    }

    #[test]
    fn vertical_movement_clamps_column() {
        let mut t = TextAreaComponent::new("t");
        t.set_text("abcd\nx\nlonger");
        assert_eq!(t.cursor_position(), (2, 6));
        t.move_up();
        assert_eq!(t.cursor_position(), (1, 1));
        t.move_up();
        assert_eq!(t.cursor_position(), (0, 1));
        t.move_end();
        t.move_down();
        assert_eq!(t.cursor_position(), (1, 1));
        t.move_down();
        assert_eq!(t.cursor_position(), (2, 1));
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let mut t = TextAreaComponent::new("t");
        let ctx = ComponentContext::new(true);
        assert!(t.handle_event(&Event::Paste("a\r\nb".into()), &ctx));
        assert_eq!(t.text(), "a\nb");
    }

    #[test]
    fn read_only_ignores_edits_but_moves() {
        let mut t = TextAreaComponent::read_only("out");
        t.set_text("ab");
        let ctx = ComponentContext::new(true);
        assert!(!t.handle_event(&key(KeyCode::Char('x')), &ctx));
        assert!(!t.handle_event(&Event::Paste("zz".into()), &ctx));
        assert!(t.handle_event(&key(KeyCode::Left), &ctx));
        assert_eq!(t.text(), "ab");
        assert_eq!(t.cursor_position(), (0, 1));
    }

    #[test]
    fn control_chords_are_left_to_keybindings() {
        let mut t = TextAreaComponent::new("t");
        let ctx = ComponentContext::new(true);
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert!(!t.handle_event(&ev, &ctx));
        assert!(t.is_empty());
    }

    #[test]
    fn unfocused_area_ignores_input() {
        let mut t = TextAreaComponent::new("t");
        assert!(!t.handle_event(&key(KeyCode::Char('a')), &ComponentContext::new(false)));
    }

    #[test]
    fn render_scrolls_to_cursor() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let mut t = TextAreaComponent::new("t");
        t.set_text("1\n2\n3\n4\n5");
        t.render(&mut frame, area, &ComponentContext::new(true));
        // two inner rows; the last two lines are visible
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), "4");
        assert_eq!(buf.cell((1, 2)).unwrap().symbol(), "5");
    }
}
