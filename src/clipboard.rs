//! System clipboard access.
//
//! The controller talks to the clipboard through [`ClipboardBackend`] so it
//! never sees platform errors directly: reads come back as a
//! [`ClipboardRead`] that names the branch taken, writes return a small
//! [`ClipboardError`]. [`SystemClipboard`] is the `arboard` implementation.

use std::sync::Mutex;

use crossterm::event::{Event, KeyEventKind, MouseEventKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
    #[error("clipboard is not supported here: {0}")]
    Unsupported(String),
}

/// Outcome of reading text from the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardRead {
    Text(String),
    Empty,
    PermissionDenied(String),
    Unsupported(String),
}

/// Result of the advisory permission query. Never used to gate a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardPermission {
    Granted,
    Prompt,
    Denied,
    Unknown,
}

/// Proof that a clipboard read was triggered directly by the user.
///
/// Only input events that are a deliberate press (keys, mouse buttons,
/// bracketed paste) and an explicit command line invocation produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserGesture {
    _private: (),
}

impl UserGesture {
    pub fn from_event(event: &Event) -> Option<Self> {
        let deliberate = match event {
            Event::Key(key) => key.kind == KeyEventKind::Press,
            Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Down(_)),
            Event::Paste(_) => true,
            _ => false,
        };
        deliberate.then_some(Self { _private: () })
    }

    /// The user ran the command themselves, which counts as a gesture.
    pub fn command_line() -> Self {
        Self { _private: () }
    }
}

pub trait ClipboardBackend: Send + Sync {
    fn permission(&self) -> ClipboardPermission {
        ClipboardPermission::Unknown
    }

    fn read_text(&self, gesture: &UserGesture) -> ClipboardRead;

    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

impl<T: ClipboardBackend + ?Sized> ClipboardBackend for std::sync::Arc<T> {
    fn permission(&self) -> ClipboardPermission {
        (**self).permission()
    }

    fn read_text(&self, gesture: &UserGesture) -> ClipboardRead {
        (**self).read_text(gesture)
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

/// `arboard` backed clipboard.
///
/// A single handle is kept for the lifetime of the process; on X11 and
/// Wayland the copied text only stays available while its owner is alive.
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let handle = match arboard::Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(err) => {
                tracing::warn!("clipboard unavailable at startup: {err}");
                None
            }
        };
        Self {
            handle: Mutex::new(handle),
        }
    }

    fn with_clipboard<T>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unsupported("clipboard lock poisoned".to_string()))?;
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new()?);
        }
        match guard.as_mut() {
            Some(cb) => f(cb).map_err(ClipboardError::from),
            None => Err(ClipboardError::Unsupported(
                "no clipboard handle".to_string(),
            )),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn permission(&self) -> ClipboardPermission {
        match self.handle.lock() {
            Ok(guard) if guard.is_some() => ClipboardPermission::Granted,
            _ => ClipboardPermission::Unknown,
        }
    }

    fn read_text(&self, _gesture: &UserGesture) -> ClipboardRead {
        match self.with_clipboard(|cb| cb.get_text()) {
            Ok(text) if text.is_empty() => ClipboardRead::Empty,
            Ok(text) => ClipboardRead::Text(text),
            Err(err) => classify_read_error(err),
        }
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.with_clipboard(|cb| cb.set_text(text.to_owned()))
    }
}

fn classify_read_error(err: ClipboardError) -> ClipboardRead {
    match err {
        ClipboardError::Backend(
            arboard::Error::ContentNotAvailable | arboard::Error::ConversionFailure,
        ) => ClipboardRead::Empty,
        ClipboardError::Backend(arboard::Error::ClipboardNotSupported) => {
            ClipboardRead::Unsupported(err.to_string())
        }
        ClipboardError::Unsupported(reason) => ClipboardRead::Unsupported(reason),
        other => ClipboardRead::PermissionDenied(other.to_string()),
    }
}
