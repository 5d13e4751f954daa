//! Orchestration of the Format / Paste & Format / Clear / Copy actions.
//!
//! The controller never touches the screen directly. Every visible effect is
//! sent as a [`UiUpdate`] through a [`UiHandle`]; whoever owns the screen
//! (the terminal app or the headless runner) applies them in order. This keeps
//! the network and clipboard work free to run on a background task while the
//! UI keeps polling.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::clipboard::{ClipboardBackend, ClipboardRead, UserGesture};
use crate::constants::{
    MSG_CLIPBOARD_EMPTY, MSG_COPIED, MSG_COPY_FAILED, MSG_COULD_NOT_FORMAT, MSG_NOTHING_TO_COPY,
    MSG_PASTE_BLOCKED,
};
use crate::service::FormatService;
use crate::status::{StatusKind, StatusMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    SetInput(String),
    SetOutput(String),
    Status(StatusMessage),
    ClearStatus,
    FocusInput,
    /// A background action finished; sent by the task runner, not the
    /// controller.
    Settled,
}

#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

impl UiHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            tracing::debug!("ui went away; dropping update");
        }
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.send(UiUpdate::SetInput(text.into()));
    }

    pub fn set_output(&self, text: impl Into<String>) {
        self.send(UiUpdate::SetOutput(text.into()));
    }

    pub fn status(&self, message: StatusMessage) {
        self.send(UiUpdate::Status(message));
    }

    pub fn clear_status(&self) {
        self.send(UiUpdate::ClearStatus);
    }

    pub fn focus_input(&self) {
        self.send(UiUpdate::FocusInput);
    }
}

/// How a paste-and-format attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    Formatted(String),
    FormatFailed,
    ClipboardEmpty,
    Blocked,
}

/// How a clipboard write ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
    NothingToCopy,
}

pub struct ClipboardFormatController<C, S> {
    clipboard: C,
    service: S,
    status_ttl: Duration,
    auto_copy: bool,
}

impl<C, S> ClipboardFormatController<C, S>
where
    C: ClipboardBackend,
    S: FormatService,
{
    pub fn new(clipboard: C, service: S, status_ttl: Duration) -> Self {
        Self {
            clipboard,
            service,
            status_ttl,
            auto_copy: true,
        }
    }

    pub fn with_auto_copy(mut self, enabled: bool) -> Self {
        self.auto_copy = enabled;
        self
    }

    pub fn status_ttl(&self) -> Duration {
        self.status_ttl
    }

    /// Send `input` to the formatting service once and show the result.
    ///
    /// On success the result is also copied to the clipboard when auto-copy
    /// is on; a failed copy only changes the status line.
    pub async fn format(&self, input: &str, ui: &UiHandle) -> Option<String> {
        tracing::debug!(len = input.len(), "formatting");
        match self.service.format(input).await {
            Ok(output) => {
                ui.set_output(output.clone());
                if self.auto_copy && !output.is_empty() {
                    self.copy(&output, ui);
                }
                Some(output)
            }
            Err(err) => {
                tracing::warn!("format failed: {err}");
                ui.set_output("");
                self.report(ui, StatusKind::Error, MSG_COULD_NOT_FORMAT);
                None
            }
        }
    }

    /// Replace the input with the clipboard text and format it.
    pub async fn paste_and_format(&self, gesture: UserGesture, ui: &UiHandle) -> PasteOutcome {
        // Advisory only; the read below decides.
        let permission = self.clipboard.permission();
        tracing::debug!(?permission, "clipboard permission");

        match self.clipboard.read_text(&gesture) {
            ClipboardRead::Text(text) if !text.is_empty() => {
                ui.set_input(text.clone());
                match self.format(&text, ui).await {
                    Some(output) => PasteOutcome::Formatted(output),
                    None => PasteOutcome::FormatFailed,
                }
            }
            ClipboardRead::Text(_) | ClipboardRead::Empty => {
                self.report(ui, StatusKind::Info, MSG_CLIPBOARD_EMPTY);
                PasteOutcome::ClipboardEmpty
            }
            ClipboardRead::PermissionDenied(reason) | ClipboardRead::Unsupported(reason) => {
                tracing::info!("clipboard read blocked: {reason}");
                self.report(ui, StatusKind::Warning, MSG_PASTE_BLOCKED);
                ui.focus_input();
                PasteOutcome::Blocked
            }
        }
    }

    pub fn clear(&self, ui: &UiHandle) {
        ui.set_input("");
        ui.set_output("");
        ui.clear_status();
        ui.focus_input();
    }

    pub fn copy(&self, output: &str, ui: &UiHandle) -> CopyOutcome {
        if output.is_empty() {
            self.report(ui, StatusKind::Info, MSG_NOTHING_TO_COPY);
            return CopyOutcome::NothingToCopy;
        }
        match self.clipboard.write_text(output) {
            Ok(()) => {
                self.report(ui, StatusKind::Success, MSG_COPIED);
                CopyOutcome::Copied
            }
            Err(err) => {
                tracing::warn!("clipboard write failed: {err}");
                self.report(ui, StatusKind::Warning, MSG_COPY_FAILED);
                CopyOutcome::Failed
            }
        }
    }

    fn report(&self, ui: &UiHandle, kind: StatusKind, text: &str) {
        ui.status(StatusMessage::new(kind, text, self.status_ttl));
    }
}
