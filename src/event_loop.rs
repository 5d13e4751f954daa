use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The UI thread's message pump.
///
/// Polls the input driver and hands each event to a handler closure. The
/// handler also runs once per poll interval with `None`, which is where
/// background results are drained, status deadlines expire and the screen is
/// redrawn. Network and clipboard work never runs on this thread.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// Runs the loop on the current thread until the handler asks to quit
    /// or the driver fails.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (pastes arrive as one event, but mouse drags
                // and key repeats do not) before the next redraw.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
