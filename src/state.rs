use std::time::Instant;

use crate::components::TextAreaComponent;
use crate::controller::UiUpdate;
use crate::status::StatusLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Output,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Output,
            Focus::Output => Focus::Input,
        }
    }
}

/// Everything the screen shows. Owned by the UI thread; background actions
/// reach it only through [`UiUpdate`]s.
#[derive(Debug)]
pub struct AppState {
    pub input: TextAreaComponent,
    pub output: TextAreaComponent,
    pub status: StatusLine,
    focus: Focus,
    in_flight: usize,
    help_visible: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            input: TextAreaComponent::new("Input"),
            output: TextAreaComponent::read_only("Output"),
            status: StatusLine::new(),
            focus: Focus::Input,
            in_flight: 0,
            help_visible: false,
        }
    }

    pub fn apply(&mut self, update: UiUpdate, now: Instant) {
        match update {
            UiUpdate::SetInput(text) => self.input.set_text(text),
            UiUpdate::SetOutput(text) => self.output.set_text(text),
            UiUpdate::Status(message) => self.status.show(message, now),
            UiUpdate::ClearStatus => self.status.clear(),
            UiUpdate::FocusInput => self.focus = Focus::Input,
            UiUpdate::Settled => self.in_flight = self.in_flight.saturating_sub(1),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focused_area_mut(&mut self) -> &mut TextAreaComponent {
        match self.focus {
            Focus::Input => &mut self.input,
            Focus::Output => &mut self.output,
        }
    }

    pub fn busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn set_help_visible(&mut self, visible: bool) {
        self.help_visible = visible;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
