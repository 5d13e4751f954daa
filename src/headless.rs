//! Non-interactive `format` and `paste` subcommands.
//!
//! Statuses go to `err`, the formatted text to `out`.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tokio::sync::mpsc;

use crate::clipboard::{ClipboardBackend, UserGesture};
use crate::config::Command;
use crate::controller::{ClipboardFormatController, PasteOutcome, UiHandle, UiUpdate};
use crate::service::FormatService;

pub async fn run<C, S, R, W, E>(
    controller: &ClipboardFormatController<C, S>,
    command: &Command,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<ExitCode>
where
    C: ClipboardBackend,
    S: FormatService,
    R: Read,
    W: Write,
    E: Write,
{
    let (ui, mut updates) = UiHandle::channel();
    let result = match command {
        Command::Format { file } => {
            let text = match file {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    input.read_to_string(&mut buf)?;
                    buf
                }
            };
            controller.format(&text, &ui).await
        }
        Command::Paste => {
            match controller
                .paste_and_format(UserGesture::command_line(), &ui)
                .await
            {
                PasteOutcome::Formatted(output) => Some(output),
                other => {
                    tracing::debug!(?other, "paste did not produce output");
                    None
                }
            }
        }
        Command::Tui => {
            return Err(io::Error::other("the terminal UI is not a headless command"));
        }
    };
    drop(ui);
    report_statuses(&mut updates, err)?;

    match result {
        Some(output) => {
            if output.ends_with('\n') || output.is_empty() {
                write!(out, "{output}")?;
            } else {
                writeln!(out, "{output}")?;
            }
            out.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

fn report_statuses<E: Write>(
    updates: &mut mpsc::UnboundedReceiver<UiUpdate>,
    err: &mut E,
) -> io::Result<()> {
    while let Ok(update) = updates.try_recv() {
        if let UiUpdate::Status(message) = update {
            writeln!(err, "{}", message.text)?;
        }
    }
    err.flush()
}
