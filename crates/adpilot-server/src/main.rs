mod dto;
mod error;
mod handlers;
mod state;
mod ws;

use std::sync::Arc;
use std::time::Duration;

use adpilot_core::AdPilotConfig;
use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = AdPilotConfig::from_env()?;
    let state = Arc::new(AppState::new(&config)?);
    let app = router(state);

    info!("Starting server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/ai/draft", post(handlers::ai::draft))
        .route("/ai/keywords", post(handlers::ai::keywords))
        .route("/ai/targeting", post(handlers::ai::targeting))
        .route(
            "/ai/targeting/alternatives",
            post(handlers::ai::targeting_alternatives),
        )
        .route("/ai/budget", post(handlers::ai::budget))
        .route("/ai/allocation", post(handlers::ai::allocation))
        .route("/ai/creative", post(handlers::ai::creative))
        .route("/ai/structure", post(handlers::ai::structure))
        .route("/ai/audit", post(handlers::ai::audit))
        .route("/ai/forecast", post(handlers::ai::forecast))
        .route("/ai/chat", post(handlers::ai::chat))
        .route("/campaigns/quality", post(handlers::campaign::quality))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
