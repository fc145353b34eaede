//! File-backed tracing setup for the terminal application.
//!
//! Logs cannot go to stdout/stderr while the alternate screen is active, so
//! the subscriber writes plain lines to `reel.log` under the cache directory.
//! The `REEL_LOG` environment variable accepts the usual `EnvFilter` syntax.

use std::fs::{self, File};
use std::sync::Once;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "reel.log";
const FILTER_ENV: &str = "REEL_LOG";

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Safe to call from multiple entry points; only the first call installs
/// anything. When the cache directory cannot be created the subscriber is
/// skipped entirely and the application runs without logs.
pub fn initialize() {
    INIT.call_once(|| {
        let Some(file) = open_log_file() else {
            return;
        };

        let filter = EnvFilter::try_from_env(FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new("reel=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .try_init();
    });
}

fn open_log_file() -> Option<File> {
    let dir = crate::app_dirs::get_cache_dir().ok()?;
    fs::create_dir_all(&dir).ok()?;
    File::options()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .ok()
}
