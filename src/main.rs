use std::io;
use std::process::ExitCode;

use clap::Parser;

use clip_format::app::{App, run_tui};
use clip_format::clipboard::SystemClipboard;
use clip_format::config::{Cli, Command, Config};
use clip_format::constants::UI_POLL_INTERVAL;
use clip_format::controller::ClipboardFormatController;
use clip_format::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use clip_format::headless;
use clip_format::service::HttpFormatService;
use clip_format::tracing_sub::{self, LogTarget};

fn main() -> ExitCode {
    let config = match Config::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("clip-format: {err}");
            return ExitCode::from(2);
        }
    };
    match run(config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("clip-format: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> io::Result<ExitCode> {
    let target = match &config.log_file {
        Some(path) => LogTarget::file(path)?,
        None if config.command == Command::Tui => LogTarget::Discard,
        None => LogTarget::Stderr,
    };
    tracing_sub::init(config.log_level, target);
    tracing::info!(endpoint = %config.endpoint, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let service = HttpFormatService::new(config.endpoint.clone(), config.request_timeout);
    let controller =
        ClipboardFormatController::new(SystemClipboard::new(), service, config.status_ttl)
            .with_auto_copy(config.auto_copy);

    match &config.command {
        Command::Tui => {
            let mut app = App::new(controller, runtime.handle().clone());
            let mut output = ConsoleOutputDriver::new()?;
            run_tui(
                &mut app,
                ConsoleInputDriver::new(),
                &mut output,
                UI_POLL_INTERVAL,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        command => runtime.block_on(headless::run(
            &controller,
            command,
            io::stdin().lock(),
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )),
    }
}
