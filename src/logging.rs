// Conditional logging macros - only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "swift-type.log";
const APP_DIR_NAME: &str = "swift-type";

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

/// Default log location under the user's cache directory.
pub fn get_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

/// Routes the `log` facade to `path`. The terminal belongs to the game, so
/// nothing is ever written to stdout or stderr. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_ends_with_file_name() {
        if let Some(path) = get_log_path() {
            assert!(path.ends_with(Path::new(APP_DIR_NAME).join(LOG_FILE_NAME)));
        }
    }

    #[test]
    fn test_init_logging_creates_file() {
        let dir = std::env::temp_dir().join("swift-type-logging-test");
        let path = dir.join(LOG_FILE_NAME);
        let _ = fs::remove_file(&path);

        // A logger may already be installed by another test; the file is created either way.
        let _ = init_logging(&path);
        log::info!("logging test line");
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
