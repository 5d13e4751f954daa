use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::actions::Action;
use crate::components::{Component, ComponentContext};
use crate::keybindings::KeyBindings;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

const GAP: u16 = 1;

#[derive(Debug, Clone)]
struct Button {
    action: Action,
    label: String,
    rect: Rect,
}

/// The row of clickable triggers: Format, Paste & Format, Clear, Copy.
///
/// Hit rectangles are recomputed on every render, so a click is resolved
/// against what the user actually saw.
#[derive(Debug, Clone)]
pub struct ButtonBarComponent {
    buttons: Vec<Button>,
}

impl ButtonBarComponent {
    pub fn new(bindings: &KeyBindings) -> Self {
        let buttons = [
            Action::Format,
            Action::PasteAndFormat,
            Action::Clear,
            Action::Copy,
        ]
        .into_iter()
        .map(|action| {
            let label = match bindings.first_combo(action) {
                Some(combo) => format!(" {action} [{combo}] "),
                None => format!(" {action} "),
            };
            Button {
                action,
                label,
                rect: Rect::default(),
            }
        })
        .collect();
        Self { buttons }
    }

    /// Action of the button under `(column, row)`, if any.
    pub fn action_at(&self, column: u16, row: u16) -> Option<Action> {
        self.buttons
            .iter()
            .find(|b| {
                b.rect.width > 0
                    && column >= b.rect.x
                    && column < b.rect.x + b.rect.width
                    && row >= b.rect.y
                    && row < b.rect.y + b.rect.height
            })
            .map(|b| b.action)
    }

    /// Resolve a left click to the button's action.
    pub fn click(&self, event: &Event) -> Option<Action> {
        match event {
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.action_at(mouse.column, mouse.row)
            }
            _ => None,
        }
    }
}

impl Component for ButtonBarComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let bounds = area.intersection(frame.area());
        let mut x = area.x;
        for button in &mut self.buttons {
            let width = button.label.chars().count() as u16;
            let remaining = (area.x + area.width).saturating_sub(x);
            if bounds.width == 0 || bounds.height == 0 || remaining < width {
                button.rect = Rect::default();
                continue;
            }
            button.rect = Rect::new(x, area.y, width, 1);
            let mut style = Style::default().bg(theme::button_bg()).fg(theme::button_fg());
            if ctx.busy() && button.action.starts_request() {
                style = style
                    .fg(theme::button_disabled_fg())
                    .add_modifier(Modifier::DIM);
            }
            safe_set_string(frame.buffer_mut(), bounds, x, area.y, &button.label, style);
            x = x.saturating_add(width + GAP);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        self.click(event).is_some()
    }
}
