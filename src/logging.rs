//! Diagnostic logging setup
//!
//! Logs go to stderr so that reports on stdout stay clean. `RUST_LOG` takes
//! precedence over the level passed to [`init`].

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

static INIT_ONCE: Once = Once::new();

/// Filter directive used when `RUST_LOG` is not set
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("rewrite={}", level.trim().to_ascii_lowercase())
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init(level: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish()
            .try_init();
    });
}
