//! Axum HTTP layer: session lifecycle and JSON endpoints for the game.
//!
//! Each client is tied to a [`Session`](crate::core::Session) through the
//! `numguess_session` cookie. Handlers load the session from the store, run one
//! synchronous core operation and save it back.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/start` | Start (or restart) a game |
//! | POST | `/guess` | Submit a guess, optionally asking for a hint |
//! | GET | `/status` | Current game state |
//! | POST | `/reset` | Destroy the session |
//! | GET | `/hints` | Strategy, encouragement and binary-search advice |
//! | GET | `/health` | Health check |

pub mod cookie;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::rng::{GameRng, RandomSource};
use crate::core::session::{MemorySessionStore, SessionStore};
use crate::core::GameError;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    /// Fixed seed for secrets and hint selection; entropy when unset.
    pub seed: Option<u64>,
    /// Idle time after which a session is forgotten.
    pub session_ttl: Duration,
    /// Single origin allowed to call with credentials. Any origin, without
    /// credentials, when unset.
    pub cors_origin: Option<String>,
    /// Include the secret in the `/start` response.
    pub reveal_secret: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            seed: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            cors_origin: None,
            reveal_secret: false,
        }
    }
}

/// State shared by all handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub sessions: Arc<dyn SessionStore>,
    pub rng: Mutex<Box<dyn RandomSource>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// In-memory sessions and a [`GameRng`] built from the config.
    pub fn new(config: ServerConfig) -> Self {
        let sessions = Arc::new(MemorySessionStore::new(config.session_ttl));
        let rng = Box::new(GameRng::new(config.seed));
        Self::with_parts(config, sessions, rng)
    }

    pub fn with_parts(
        config: ServerConfig,
        sessions: Arc<dyn SessionStore>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            sessions,
            rng: Mutex::new(rng),
        }
    }
}

pub fn create_router(state: SharedState) -> Result<Router> {
    let cors = cors_layer(state.config.cors_origin.as_deref())?;

    Ok(Router::new()
        .route("/health", get(handlers::handle_health_check))
        .route("/start", post(handlers::handle_start))
        .route("/guess", post(handlers::handle_guess))
        .route("/status", get(handlers::handle_status))
        .route("/reset", post(handlers::handle_reset))
        .route("/hints", get(handlers::handle_hints))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let layer = match origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("invalid CORS origin '{}'", origin))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };
    Ok(layer)
}

/// Bind and serve until Ctrl+C.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = config.addr.clone();
    if let Some(seed) = config.seed {
        tracing::info!(seed, "using fixed seed");
    }
    let state = Arc::new(AppState::new(config));
    let app = create_router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %listener.local_addr()?, "numguess server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

pub(crate) fn error_response(
    status: StatusCode,
    msg: &str,
) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": msg })))
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        tracing::debug!(kind = self.kind(), error = %self, "request rejected");
        error_response(StatusCode::BAD_REQUEST, &self.to_string()).into_response()
    }
}
