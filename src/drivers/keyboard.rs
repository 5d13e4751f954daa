// `KeyboardNormalizer` is a lightweight helper for normalizing raw keyboard
// `Event`s (converting Shift+Tab to BackTab and filtering key-release
// events). The console input driver runs every event through it.
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                if key.code == KeyCode::BackTab {
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    // Windows and enhanced terminals report held keys as
                    // repeats; only the editor cares about those.
                    KeyEventKind::Repeat if key.code == KeyCode::Esc => return None,
                    KeyEventKind::Repeat | KeyEventKind::Press => {}
                }
                if key.code == KeyCode::Esc {
                    if self.esc_down && cfg!(windows) {
                        return None;
                    }
                    self.esc_down = true;
                } else {
                    self.esc_down = false;
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}
