//! Triage Service — Binary Entrypoint
//! Boots the Axum HTTP server: lexicon and resources load, state wiring,
//! metrics recorder, routes.
//!
//! See `README.md` for quickstart and `DESIGN.md` for architecture notes.

use jamcare_triage::api::{self, AppState};
use jamcare_triage::metrics::Metrics;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - TRIAGE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("TRIAGE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jamcare_triage=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This enables
    // TRIAGE_LEXICON_PATH / TRIAGE_RESOURCES_PATH / MODEL_SERVER_URL
    // overrides before any config is read.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let state = AppState::from_env().expect("failed to load triage configuration");

    // Prometheus recorder + lexicon gauge, then merge the /metrics route.
    let metrics = Metrics::init(state.lexicon.phrase_count());
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
