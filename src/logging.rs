//! Console logging for applications embedding waterswitch.
//!
//! Switches report denied changes as `WARN` events under the
//! `waterswitch::switch` target. Nothing is printed unless a subscriber is
//! installed, either by the host application or with [`install_tracing`].

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Installs a console subscriber (idempotent).
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Fails quietly if
/// another global subscriber is already set.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let console = fmt::layer().with_target(true).with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("waterswitch tracing subscriber failed to initialize");
        }
    });
}
