//! JSON record service for the web frontend.

pub(crate) mod error;
pub(crate) mod routes;
pub(crate) mod state;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    routing::post,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::models::{ExchangeRate, NationalVolume, PriceReference, ProvincialVolume};
use routes::{
    create_record, delete_record, get_record, health, list_records, list_simulation, login,
    update_record, Resource,
};
use state::AppState;

pub(crate) async fn start(config: &Config, db: Database) -> Result<()> {
    info!("Initializing state...");
    let app = router(AppState::new(db), &config.cors_origin);

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

pub(crate) fn router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/login", post(login))
        .route("/api/simulasi-lpg-3kg", get(list_simulation))
        .merge(collection::<PriceReference>())
        .merge(collection::<ExchangeRate>())
        .merge(collection::<NationalVolume>())
        .merge(collection::<ProvincialVolume>())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// `/api/{name}` and `/api/{name}/{id}` for one fact table.
fn collection<T: Resource>() -> Router<AppState> {
    let base = format!("/api/{}", T::SERIES.as_str());
    Router::new()
        .route(&base, get(list_records::<T>).post(create_record::<T>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_record::<T>)
                .put(update_record::<T>)
                .delete(delete_record::<T>),
        )
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match HeaderValue::from_str(origin) {
        Ok(value) => cors.allow_origin(value),
        Err(e) => {
            warn!("Invalid CORS origin '{origin}': {e}, allowing any origin");
            cors.allow_origin(Any)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
