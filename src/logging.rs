//! File-backed logger initialization.
//!
//! The TUI owns the terminal, so log output goes to `<data_dir>/modseek.log`
//! instead of stderr. Filtering is controlled by `RUST_LOG` (default `info`).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Initialize the global logger. Safe to call once; failures degrade to a
/// logger-less run rather than aborting startup.
pub fn init(data_dir: &Path) {
    if let Err(e) = try_init(data_dir) {
        eprintln!("warning: file logging disabled: {e}");
    }
}

fn try_init(data_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join("modseek.log");
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    Ok(())
}
