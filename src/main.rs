//! main.rs
//! Entry point for atax

use atax::app::AppState;
use atax::config::Config;
use atax::core::terminal;
use atax::utils::cli::{CliAction, handle_args};

use std::fs::OpenOptions;
use std::sync::Mutex;

/// Environment variable naming the file debug logs are written to.
const LOG_ENV: &str = "ATAX_LOG";

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[atax] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let CliAction::RunApp { config } = handle_args() else {
        return Ok(());
    };

    init_logging();

    let config = Config::load(config.as_deref());
    let mut app = AppState::new(&config);
    tracing::info!(dir = %app.nav().current_dir().display(), "session started");

    if let Err(e) = terminal::run_terminal(&mut app) {
        tracing::warn!(error = %e, "terminal failure");
        eprintln!("[atax] Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to the file named by `ATAX_LOG` so they never end up on the TUI.
/// Without it nothing is logged.
fn init_logging() {
    let Some(path) = std::env::var_os(LOG_ENV).filter(|v| !v.is_empty()) else {
        return;
    };

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .init();
        }
        Err(e) => {
            eprintln!(
                "[atax] Could not open log file {}: {}",
                std::path::Path::new(&path).display(),
                e
            );
        }
    }
}
