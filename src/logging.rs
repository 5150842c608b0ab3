// Logging setup plus conditional macros that only emit in debug builds.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

const APP_DIR: &str = "number-guess";
const LOG_FILE: &str = "number-guess.log";

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to a file; used while the TUI owns the terminal.
    File(PathBuf),
}

/// Default log file under the user's cache directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. `RUST_LOG` overrides the default filter.
///
/// Calling this twice is harmless; the second call reports the error from
/// `try_init` and leaves the first logger in place.
pub fn init_logging(target: &LogTarget, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {:<5} {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder.try_init()?;
    Ok(())
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_layout() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("number-guess/number-guess.log"));
        }
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = std::env::temp_dir().join("number_guess_log_test");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("game.log");
        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
