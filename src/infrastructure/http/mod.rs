use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{events::EventsController, health};
use crate::infrastructure::config::Config;

pub mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router
pub fn create_router(events_controller: Arc<EventsController>) -> Router {
    let event_routes = Router::new()
        .route("/events", post(EventsController::handle_event))
        .with_state(events_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(event_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    events_controller: Arc<EventsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(events_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
