use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use grid_snake::app::App;
use grid_snake::config::Speed;
use grid_snake::error::AppError;
use grid_snake::grid::GridSize;
use grid_snake::input::InputHandler;
use grid_snake::logging::{init_logging, log_path};
use grid_snake::settings::{load_settings, settings_path};
use grid_snake::terminal_runtime::{restore_terminal, TerminalSession};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Default tick speed, overriding the settings file.
    #[arg(long, value_enum)]
    speed: Option<Speed>,

    /// Start a session immediately instead of showing the menu.
    #[arg(long)]
    start: bool,

    /// Seed for food placement and snake colors.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the platform default.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log file to append to instead of the platform default.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = load_settings(&cli.settings.unwrap_or_else(settings_path))?;

    let log_file = cli.log_file.unwrap_or_else(log_path);
    if let Err(error) = init_logging(&log_file, &settings.log_filter) {
        eprintln!("Logging disabled: {error}");
    }

    install_panic_hook();

    let speed = cli.speed.unwrap_or(settings.speed);
    let session = TerminalSession::enter()?;
    let mut app = App::new(session.terminal()?, GridSize::default(), speed, cli.seed);

    if cli.start {
        app.start_session(speed, Instant::now())?;
    }

    let mut input = InputHandler::new();
    app.run(&mut input)?;

    drop(app);
    drop(session);
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        tracing::error!(%panic_info, "panicked");
        default_hook(panic_info);
    }));
}
