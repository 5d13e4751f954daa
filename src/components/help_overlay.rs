use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::components::{Component, ComponentContext};
use crate::keybindings::KeyBindings;
use crate::theme;
use crate::ui::{UiFrame, centered_rect};

/// Centered dialog listing every key binding.
#[derive(Debug, Clone)]
pub struct HelpOverlayComponent {
    lines: Vec<String>,
}

impl HelpOverlayComponent {
    pub fn new(bindings: &KeyBindings) -> Self {
        let entries = bindings.help_entries();
        let label_width = entries
            .iter()
            .map(|(action, _)| action.to_string().chars().count())
            .max()
            .unwrap_or(0);
        let mut lines: Vec<String> = entries
            .into_iter()
            .map(|(action, combos)| {
                format!(
                    "{:<width$}  {}",
                    action.to_string(),
                    combos.join(", "),
                    width = label_width
                )
            })
            .collect();
        lines.push(String::new());
        lines.push("Terminal paste (e.g. Ctrl+Shift+V) inserts into the input.".to_string());
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Component for HelpOverlayComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = self
            .lines
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0)
            .saturating_add(4);
        let height = (self.lines.len() as u16).saturating_add(2);
        let rect = centered_rect(area, width, height);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .style(Style::default().bg(theme::dialog_bg()).fg(theme::dialog_fg()));
        let text: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(format!(" {l}")))
            .collect();
        frame.render_widget(Paragraph::new(text).block(block), rect);
    }
}
