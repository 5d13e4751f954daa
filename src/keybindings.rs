use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SUPER) {
            parts.push("Cmd".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: BTreeMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    /// Resolve a key press to an action. Releases and repeats never map.
    /// `CloseHelp` is only reported while `help_open` is set.
    pub fn action_for_key(&self, key: &KeyEvent, help_open: bool) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if help_open && self.matches(Action::CloseHelp, key) {
            return Some(Action::CloseHelp);
        }
        self.map
            .iter()
            .filter(|(act, _)| **act != Action::CloseHelp)
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        self.map
            .iter()
            .map(|(act, list)| (*act, list.iter().map(|c| c.display()).collect()))
            .collect()
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        // Terminals without keyboard enhancement report Ctrl+Enter as Ctrl+J
        // or drop the modifier entirely; F5 always works.
        kb.add(
            Format,
            KeyCombo::new(KeyCode::Enter, KeyModifiers::CONTROL),
        );
        kb.add(Format, KeyCombo::new(KeyCode::Enter, KeyModifiers::SUPER));
        kb.add(
            Format,
            KeyCombo::new(KeyCode::Char('j'), KeyModifiers::CONTROL),
        );
        kb.add(Format, KeyCombo::new(KeyCode::Enter, KeyModifiers::ALT));
        kb.add(Format, KeyCombo::new(KeyCode::F(5), KeyModifiers::NONE));
        kb.add(
            PasteAndFormat,
            KeyCombo::new(KeyCode::Char('v'), KeyModifiers::CONTROL),
        );
        kb.add(
            PasteAndFormat,
            KeyCombo::new(KeyCode::F(6), KeyModifiers::NONE),
        );
        kb.add(
            Clear,
            KeyCombo::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
        );
        kb.add(Clear, KeyCombo::new(KeyCode::F(7), KeyModifiers::NONE));
        kb.add(
            Copy,
            KeyCombo::new(KeyCode::Char('y'), KeyModifiers::CONTROL),
        );
        kb.add(Copy, KeyCombo::new(KeyCode::F(8), KeyModifiers::NONE));
        kb.add(FocusNext, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(
            FocusPrev,
            KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE),
        );
        kb.add(ToggleHelp, KeyCombo::new(KeyCode::F(1), KeyModifiers::NONE));
        kb.add(CloseHelp, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb
    }
}
