use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "gh_switcher=warn",
        1 => "gh_switcher=info",
        _ => "gh_switcher=debug",
    }
}

/// Diagnostics go to stderr so stdout stays clean for `--json`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
