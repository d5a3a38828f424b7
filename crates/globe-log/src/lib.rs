//! Structured logging for the globeprint tools.
//!
//! Console output goes to stderr with uptime stamps so long mesh builds show
//! where time is spent. Debug builds can also write a JSON log file. The level
//! comes from `RUST_LOG` when set, else from the config file.

use std::path::Path;

use globe_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the JSON log inside the log directory.
pub const LOG_FILE: &str = "globeprint.log";

/// Decoders log every chunk at debug level; keep them quiet unless asked.
const QUIET_TARGETS: &str = "png=warn,jpeg_decoder=warn,zune_jpeg=warn";

/// Filter directives for a config: its `log_level` (or `info` when empty) plus
/// the quiet targets.
pub fn filter_directives(config: Option<&Config>) -> String {
    let level = config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or("info");
    format!("{level},{QUIET_TARGETS}")
}

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file, used only when `debug_build`
/// * `debug_build` - enables the file layer
/// * `config` - source of the default level when `RUST_LOG` is unset
///
/// Panics if a global subscriber is already installed.
///
/// ```no_run
/// use globe_log::init_logging;
///
/// init_logging(Some(std::path::Path::new("./logs")), true, None);
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let directives = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!(dir = %log_dir.display(), "JSON file logging enabled");
        return;
    }

    subscriber.init();
}

/// `EnvFilter` built from the default directives.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(None))
}
