//! Log subscriber setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "MSC_LOG";

/// Install a hierarchical stderr subscriber if `MSC_LOG` or `RUST_LOG` is
/// set. Does nothing otherwise, and only ever runs once.
///
/// ```text
/// MSC_LOG=ms_eval=debug msc run hello.mus
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = if std::env::var(LOG_ENV).is_ok() {
            EnvFilter::from_env(LOG_ENV)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(filter)
            .init();
    });
}
