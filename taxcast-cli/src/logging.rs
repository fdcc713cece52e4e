use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
/// Logs go to stderr so `--json` output stays clean.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let fallback = if verbose { "taxcast=debug" } else { "taxcast=info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
