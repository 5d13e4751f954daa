use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::keyboard::KeyboardNormalizer;
use super::{InputDriver, OutputDriver};
use crate::ui::UiFrame;

pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
    // An event `poll` already pulled off the terminal and normalized.
    pending: Option<Event>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            normalizer: KeyboardNormalizer::new(),
            pending: None,
        }
    }

    /// Wait up to `timeout` for an event that survives normalization.
    ///
    /// Key releases are swallowed here rather than in `read`, so a `true`
    /// answer always means `read` returns without blocking.
    fn poll_from<P, R>(&mut self, timeout: Duration, mut poll: P, mut read: R) -> io::Result<bool>
    where
        P: FnMut(Duration) -> io::Result<bool>,
        R: FnMut() -> io::Result<Event>,
    {
        if self.pending.is_some() {
            return Ok(true);
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !poll(remaining)? {
                return Ok(false);
            }
            if let Some(evt) = self.normalizer.normalize(read()?) {
                self.pending = Some(evt);
                return Ok(true);
            }
        }
    }

    fn read_from<R>(&mut self, mut read: R) -> io::Result<Event>
    where
        R: FnMut() -> io::Result<Event>,
    {
        if let Some(evt) = self.pending.take() {
            return Ok(evt);
        }
        loop {
            if let Some(evt) = self.normalizer.normalize(read()?) {
                return Ok(evt);
            }
        }
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        self.poll_from(timeout, crossterm::event::poll, crossterm::event::read)
    }

    fn read(&mut self) -> io::Result<Event> {
        self.read_from(crossterm::event::read)
    }
}

/// Owns the terminal: alternate screen, raw mode, mouse capture, bracketed
/// paste and (where supported) disambiguated key reporting.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
    enhanced_keys: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
            enhanced_keys: false,
        })
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        // Without this most terminals send Ctrl+Enter as a bare Enter.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.terminal.backend_mut(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            self.enhanced_keys = true;
        }
        tracing::debug!(enhanced_keys = self.enhanced_keys, "terminal entered");
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        if self.enhanced_keys {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(move |frame| {
                let wrapper = UiFrame::new(frame);
                f(wrapper);
            })
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
