//! Self-clearing status line.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub ttl: Duration,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            ttl,
        }
    }
}

/// The status region of the screen.
///
/// Shows at most one message. Each message expires at its own deadline;
/// replacing a message replaces the deadline too.
#[derive(Debug, Default, Clone)]
pub struct StatusLine {
    current: Option<(StatusMessage, Instant)>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: StatusMessage, now: Instant) {
        let deadline = now + message.ttl;
        self.current = Some((message, deadline));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the message once its deadline has passed. Returns `true` when
    /// something was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, deadline)) if now >= *deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn text(&self) -> &str {
        self.current
            .as_ref()
            .map(|(msg, _)| msg.text.as_str())
            .unwrap_or("")
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.current.as_ref().map(|(msg, _)| msg)
    }
}
