//! The interactive terminal application.
//!
//! `App` owns the screen state and translates input into controller calls.
//! Format and Paste & Format run as tasks on the tokio runtime; their effects
//! come back as [`UiUpdate`]s that [`App::tick`] applies on the UI thread.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::actions::Action;
use crate::clipboard::{ClipboardBackend, UserGesture};
use crate::components::{
    ButtonBarComponent, Component, ComponentContext, HelpOverlayComponent, StatusBar,
};
use crate::constants::MSG_BUSY;
use crate::controller::{ClipboardFormatController, UiHandle, UiUpdate};
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::KeyBindings;
use crate::service::FormatService;
use crate::state::{AppState, Focus};
use crate::status::{StatusKind, StatusMessage};
use crate::theme;
use crate::ui::UiFrame;

pub struct App<C, S> {
    state: AppState,
    controller: Arc<ClipboardFormatController<C, S>>,
    ui: UiHandle,
    updates: mpsc::UnboundedReceiver<UiUpdate>,
    runtime: Handle,
    bindings: KeyBindings,
    buttons: ButtonBarComponent,
    status_bar: StatusBar,
    help: HelpOverlayComponent,
    input_rect: Rect,
    output_rect: Rect,
    should_quit: bool,
}

impl<C, S> App<C, S>
where
    C: ClipboardBackend + 'static,
    S: FormatService + 'static,
{
    pub fn new(controller: ClipboardFormatController<C, S>, runtime: Handle) -> Self {
        let (ui, updates) = UiHandle::channel();
        let bindings = KeyBindings::default();
        Self {
            state: AppState::new(),
            controller: Arc::new(controller),
            ui,
            updates,
            runtime,
            buttons: ButtonBarComponent::new(&bindings),
            help: HelpOverlayComponent::new(&bindings),
            bindings,
            status_bar: StatusBar::new(),
            input_rect: Rect::default(),
            output_rect: Rect::default(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: &Event) {
        let gesture = UserGesture::from_event(event);

        if let Event::Key(key) = event
            && let Some(action) = self.bindings.action_for_key(key, self.state.help_visible())
        {
            self.dispatch(action, gesture);
            return;
        }
        if self.state.help_visible() {
            return;
        }
        if let Some(action) = self.buttons.click(event) {
            self.dispatch(action, gesture);
            return;
        }
        if let Event::Mouse(mouse) = event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
        {
            let hit = |r: Rect| {
                mouse.column >= r.x
                    && mouse.column < r.x + r.width
                    && mouse.row >= r.y
                    && mouse.row < r.y + r.height
            };
            if hit(self.input_rect) {
                self.state.set_focus(Focus::Input);
            } else if hit(self.output_rect) {
                self.state.set_focus(Focus::Output);
            }
            return;
        }

        let ctx = ComponentContext::new(true);
        self.state.focused_area_mut().handle_event(event, &ctx);
    }

    pub fn dispatch(&mut self, action: Action, gesture: Option<UserGesture>) {
        tracing::debug!(%action, "dispatch");
        if action.starts_request() && self.state.busy() {
            let message =
                StatusMessage::new(StatusKind::Info, MSG_BUSY, self.controller.status_ttl());
            self.state.status.show(message, Instant::now());
            return;
        }
        match action {
            Action::Format => {
                let input = self.state.input.text().to_owned();
                self.spawn_request(move |controller, ui| async move {
                    controller.format(&input, &ui).await;
                });
            }
            Action::PasteAndFormat => {
                let Some(gesture) = gesture else {
                    tracing::warn!("paste requested without a user gesture; ignoring");
                    return;
                };
                self.spawn_request(move |controller, ui| async move {
                    controller.paste_and_format(gesture, &ui).await;
                });
            }
            Action::Clear => {
                self.controller.clear(&self.ui);
                self.drain_updates(Instant::now());
            }
            Action::Copy => {
                self.controller.copy(self.state.output.text(), &self.ui);
                self.drain_updates(Instant::now());
            }
            Action::FocusNext | Action::FocusPrev => self.state.cycle_focus(),
            Action::ToggleHelp => self.state.toggle_help(),
            Action::CloseHelp => self.state.set_help_visible(false),
            Action::Quit => self.should_quit = true,
        }
    }

    fn spawn_request<F, Fut>(&mut self, job: F)
    where
        F: FnOnce(Arc<ClipboardFormatController<C, S>>, UiHandle) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.state.begin_request();
        let ui = self.ui.clone();
        let fut = job(Arc::clone(&self.controller), ui.clone());
        self.runtime.spawn(async move {
            fut.await;
            ui.send(UiUpdate::Settled);
        });
    }

    /// Apply pending background updates and expire the status line.
    pub fn tick(&mut self, now: Instant) {
        self.drain_updates(now);
        self.state.status.tick(now);
    }

    fn drain_updates(&mut self, now: Instant) {
        while let Ok(update) = self.updates.try_recv() {
            self.state.apply(update, now);
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let [input_area, output_area, buttons_area, status_area] = Layout::vertical([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.input_rect = input_area;
        self.output_rect = output_area;

        let busy = self.state.busy();
        let focus = self.state.focus();
        let base = ComponentContext::default().with_busy(busy);
        self.state
            .input
            .render(frame, input_area, &base.with_focus(focus == Focus::Input));
        self.state
            .output
            .render(frame, output_area, &base.with_focus(focus == Focus::Output));
        self.buttons.render(frame, buttons_area, &base);

        let kind = self.state.status.message().map(|m| m.kind);
        self.status_bar.set_left(self.state.status.text());
        self.status_bar.set_right(if busy {
            "formatting... | F1 help"
        } else {
            "F1 help"
        });
        self.status_bar.set_style(
            Style::default()
                .bg(theme::status_bg())
                .fg(theme::status_fg(kind)),
        );
        self.status_bar.render(frame, status_area, &base);

        if self.state.help_visible() {
            self.help.render(frame, area, &base);
        }
    }
}

/// Drive `app` until it asks to quit. The terminal is restored even when the
/// loop fails.
pub fn run_tui<C, S, D, O>(
    app: &mut App<C, S>,
    input: D,
    output: &mut O,
    poll_interval: Duration,
) -> io::Result<()>
where
    C: ClipboardBackend + 'static,
    S: FormatService + 'static,
    D: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(input, poll_interval);
    let result = event_loop.run(|event| {
        match event {
            None => {
                app.tick(Instant::now());
                output.draw(|mut frame| app.render(&mut frame))?;
            }
            Some(event) => app.handle_event(&event),
        }
        Ok(if app.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    });
    let restored = output.exit();
    result.and(restored)
}
