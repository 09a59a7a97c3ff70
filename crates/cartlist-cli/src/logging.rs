//! Logging setup
//!
//! Nothing is logged unless `CARTLIST_LOG` is set; its value is the level
//! (`debug`, `info`, ...) for both crates. Plain commands log to stderr,
//! the TUI logs to a file so the screen stays intact.

use std::fs::File;

use cartlist_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
const LOG_ENV: &str = "CARTLIST_LOG";

/// Filter for our own crates at one level
fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(format!("cartlist_core={},cartlist_cli={}", level, level))
}

/// Log to stderr for one-shot commands
pub fn init_stderr() {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to `config.log_path()` for the TUI
pub fn init_file(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&log_level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_covers_both_crates() {
        let filter = filter_for("debug").to_string();
        assert!(filter.contains("cartlist_core=debug"));
        assert!(filter.contains("cartlist_cli=debug"));
    }
}
