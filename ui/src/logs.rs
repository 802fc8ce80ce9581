//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Filter used unless `UI_LOG` was set at build time.
const DEFAULT_FILTER: &str = "error,ui=debug";

/// Install the console subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_logging() {
    let env_filter =
        EnvFilter::new(option_env!("UI_LOG").unwrap_or(DEFAULT_FILTER));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    match tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
    {
        Ok(()) => tracing::info!("Console logging ready"),
        Err(e) => web_sys::console::warn_1(&e.to_string().into()),
    }
}
