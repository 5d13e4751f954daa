#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use clip_format::clipboard::{
    ClipboardBackend, ClipboardError, ClipboardPermission, ClipboardRead, UserGesture,
};
use clip_format::controller::{ClipboardFormatController, UiUpdate};
use clip_format::service::{FormatError, FormatService};
use clip_format::state::AppState;
use reqwest::StatusCode;
use tokio::sync::mpsc;

pub const TTL: Duration = Duration::from_millis(1500);

/// In-memory clipboard that records writes and replays a scripted read.
pub struct FakeClipboard {
    pub read: Mutex<ClipboardRead>,
    pub writes: Mutex<Vec<String>>,
    pub reads: Mutex<usize>,
    pub fail_writes: bool,
    pub permission: ClipboardPermission,
}

impl FakeClipboard {
    pub fn with_read(read: ClipboardRead) -> Self {
        Self {
            read: Mutex::new(read),
            writes: Mutex::new(Vec::new()),
            reads: Mutex::new(0),
            fail_writes: false,
            permission: ClipboardPermission::Unknown,
        }
    }

    pub fn holding(text: &str) -> Self {
        Self::with_read(ClipboardRead::Text(text.to_string()))
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

impl ClipboardBackend for FakeClipboard {
    fn permission(&self) -> ClipboardPermission {
        self.permission
    }

    fn read_text(&self, _gesture: &UserGesture) -> ClipboardRead {
        *self.reads.lock().unwrap() += 1;
        self.read.lock().unwrap().clone()
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail_writes {
            return Err(ClipboardError::Unsupported("scripted failure".into()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub enum Reply {
    Output(String),
    Status(StatusCode),
    /// The request never produced a response (refused, timed out, bad URL).
    Transport,
}

/// Formatting service that records every request.
pub struct FakeService {
    pub reply: Reply,
    pub requests: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn answering(output: &str) -> Self {
        Self {
            reply: Reply::Output(output.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            reply: Reply::Status(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Reply::Transport,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FormatService for FakeService {
    async fn format(&self, text: &str) -> Result<String, FormatError> {
        self.requests.lock().unwrap().push(text.to_string());
        match &self.reply {
            Reply::Output(out) => Ok(out.clone()),
            Reply::Status(code) => Err(FormatError::Status(*code)),
            Reply::Transport => {
                let err = reqwest::Client::new()
                    .post("not a url")
                    .build()
                    .unwrap_err();
                Err(FormatError::Transport(err))
            }
        }
    }
}

pub type FakeController = ClipboardFormatController<Arc<FakeClipboard>, Arc<FakeService>>;

pub fn controller(clipboard: &Arc<FakeClipboard>, service: &Arc<FakeService>) -> FakeController {
    ClipboardFormatController::new(Arc::clone(clipboard), Arc::clone(service), TTL)
}

/// Apply every queued update to a fresh screen, as the UI loop would.
pub fn apply_all(state: &mut AppState, rx: &mut mpsc::UnboundedReceiver<UiUpdate>) -> Vec<UiUpdate> {
    let now = Instant::now();
    let mut seen = Vec::new();
    while let Ok(update) = rx.try_recv() {
        seen.push(update.clone());
        state.apply(update, now);
    }
    seen
}
