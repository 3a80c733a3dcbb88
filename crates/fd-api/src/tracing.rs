//! Log output setup.
//!
//! Development writes pretty multi-line events; production writes one JSON object
//! per line with the current span (request id, method, uri) flattened in.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Install the global subscriber for `env`.
///
/// `RUST_LOG` replaces the default directives entirely, e.g.
/// `RUST_LOG=fd_api=trace,sqlx=info`.
pub fn init_tracing(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt = tracing_subscriber::fmt::layer().with_target(true);
    let layer = if env.is_development() {
        fmt.with_line_number(true).pretty().with_filter(filter).boxed()
    } else {
        fmt.json()
            .with_current_span(true)
            .flatten_event(true)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).init();

    tracing::info!(environment = ?env, "tracing initialized");
}

/// Filter used when `RUST_LOG` is unset. Query logging from sqlx stays at `warn`.
fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,fd_api=debug,fd_db=debug,tower_http=debug,sqlx=warn",
        Environment::Production => "info,fd_api=info,fd_db=info,tower_http=info,sqlx=warn",
    }
}
