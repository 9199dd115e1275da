use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `TADA_LOG=debug`
pub const LOG_ENV: &str = "TADA_LOG";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// TUI logging: everything at `info` and up goes to `log_file`, leaving the
/// terminal to the UI.
pub fn init_tui(log_file: &Path) -> io::Result<()> {
    if let Some(dir) = log_file.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter("info"))
        .try_init();
    Ok(())
}

/// CLI logging: warnings and errors on stderr.
pub fn init_cli() {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter("warn"))
        .try_init();
}
