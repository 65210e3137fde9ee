use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use std::{future::Future, sync::Arc};

use crate::{expenses, reports};
use api_types::{ApiResponse, health::Health};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn health() -> Json<ApiResponse<Health>> {
    Json(ApiResponse::ok_with_message(
        Health {
            name: "evenly".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        "Evenly API is running",
    ))
}

/// Build the CORS layer. Origins that are not valid header values are
/// skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// The full application router, CORS and request tracing included.
pub fn router(state: ServerState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api", get(health))
        .route("/api/", get(health))
        .route(
            "/api/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .patch(expenses::update)
                .delete(expenses::delete),
        )
        .route("/api/balances", get(reports::balances))
        .route("/api/settlements", get(reports::settlements))
        .route("/api/people", get(reports::people))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves, then drain in-flight
/// requests.
pub async fn run_with_listener<F>(
    engine: Engine,
    listener: tokio::net::TcpListener,
    cors_origins: &[String],
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state, cors_origins))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
