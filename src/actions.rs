use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Format,
    PasteAndFormat,
    Clear,
    Copy,
    // Focus/tab navigation
    FocusNext,
    FocusPrev,
    // Help overlay
    ToggleHelp,
    CloseHelp,
    Quit,
}

impl Action {
    /// Actions that start a formatting request. They are ignored while one
    /// is already in flight.
    pub fn starts_request(self) -> bool {
        matches!(self, Action::Format | Action::PasteAndFormat)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Format => "Format",
            Action::PasteAndFormat => "Paste & Format",
            Action::Clear => "Clear",
            Action::Copy => "Copy output",
            Action::FocusNext => "Focus next",
            Action::FocusPrev => "Focus previous",
            Action::ToggleHelp => "Toggle help",
            Action::CloseHelp => "Close help",
            Action::Quit => "Quit",
        };
        write!(f, "{}", s)
    }
}
