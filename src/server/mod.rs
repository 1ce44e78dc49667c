//! HTTP service hosting the companion functions
//!
//! Serves the two endpoints the form engine consumes over the network:
//! - `POST /functions/v1/analyze-sentiment` - free text in, sentiment label out
//! - `POST /functions/v1/generate-form-fields` - form description in, field list out
//!
//! When an upstream language-model API key is configured the text is forwarded
//! there and the reply normalized; without one, sentiment falls back to a
//! keyword heuristic and generation is unavailable.

pub mod handlers;
pub mod upstream;

pub use upstream::{Upstream, UpstreamConfig};

use axum::{
    http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared state for the function handlers
#[derive(Clone, Default)]
pub struct ServerState {
    pub upstream: Option<Arc<Upstream>>,
}

impl ServerState {
    /// Build state from the environment: `LLM_API_KEY` enables upstream
    /// forwarding, `LLM_API_URL` and `LLM_MODEL` override the defaults
    pub fn from_env() -> Self {
        let upstream = std::env::var("LLM_API_KEY").ok().map(|api_key| {
            let config = UpstreamConfig {
                api_url: std::env::var("LLM_API_URL")
                    .unwrap_or_else(|_| upstream::DEFAULT_API_URL.to_string()),
                api_key,
                model: std::env::var("LLM_MODEL")
                    .unwrap_or_else(|_| upstream::DEFAULT_MODEL.to_string()),
            };
            Arc::new(Upstream::new(config))
        });

        if upstream.is_none() {
            log::warn!("LLM_API_KEY not set; sentiment uses the keyword heuristic and field generation is disabled");
        }

        Self { upstream }
    }
}

/// Build the function router with permissive CORS.
///
/// The CORS layer is outermost so preflight OPTIONS requests from any origin
/// are answered before the handlers run.
pub fn build_router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    Router::new()
        .route(
            "/functions/v1/analyze-sentiment",
            post(handlers::analyze_sentiment),
        )
        .route(
            "/functions/v1/generate-form-fields",
            post(handlers::generate_form_fields),
        )
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors)
}

/// Run the HTTP server until the task is cancelled
pub async fn run_server(port: u16, bind: &str, state: ServerState) -> Result<(), String> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid bind address {}:{}: {}", bind, port, e))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

    log::info!("Function server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
