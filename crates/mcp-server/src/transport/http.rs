//! HTTP/SSE transport for MCP

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use serde::{Deserialize, Deserializer};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::session::SessionStore;
use super::{process_raw, shutdown_signal, Transport};
use crate::error::ServerError;
use crate::protocol::{McpMessage, RequestHandler};

/// Path clients post session messages to
const MESSAGES_PATH: &str = "/messages/";

/// Shared state for HTTP handlers
struct AppState {
    handler: Arc<RequestHandler>,
    debug_handler: Arc<RequestHandler>,
    sessions: SessionStore,
}

impl AppState {
    fn handler(&self, debug: bool) -> &RequestHandler {
        if debug {
            &self.debug_handler
        } else {
            &self.handler
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DebugQuery {
    #[serde(default, deserialize_with = "debug_flag")]
    debug: bool,
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    #[serde(alias = "sessionId")]
    session_id: Option<Uuid>,
    #[serde(default, deserialize_with = "debug_flag")]
    debug: bool,
}

/// `debug=true` (any case) or `debug=1` enables debug; any other value is ignored
fn debug_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    let value = value.trim();
    Ok(value.eq_ignore_ascii_case("true") || value == "1")
}

/// HTTP transport for MCP protocol
pub struct HttpTransport {
    handler: Arc<RequestHandler>,
    debug_handler: Arc<RequestHandler>,
    addr: String,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// `debug_handler` serves requests that carry `?debug=true`.
    pub fn new(
        handler: Arc<RequestHandler>,
        debug_handler: Arc<RequestHandler>,
        addr: impl Into<String>,
    ) -> Self {
        Self {
            handler,
            debug_handler,
            addr: addr.into(),
        }
    }

    /// Build the router serving the MCP endpoints
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            handler: self.handler.clone(),
            debug_handler: self.debug_handler.clone(),
            sessions: SessionStore::default(),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(health).post(handle_mcp_request))
            .route("/health", get(health))
            .route("/mcp", get(handle_mcp_sse).post(handle_mcp_request))
            .route("/mc", get(handle_mcp_sse).post(handle_mcp_request))
            .route("/sse", get(handle_mcp_sse))
            .route(MESSAGES_PATH, post(handle_session_message))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve on an already bound listener until Ctrl-C or SIGTERM
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let app = self.router();

        if let Ok(addr) = listener.local_addr() {
            info!("MCP HTTP server listening on http://{}", addr);
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("MCP HTTP server stopped");
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn run(self) -> Result<(), ServerError> {
        info!("Starting MCP HTTP server on {}", self.addr);

        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr.clone(),
                source,
            })?;

        self.serve(listener).await
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Handle MCP JSON-RPC request via HTTP POST
async fn handle_mcp_request(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DebugQuery>,
    body: Bytes,
) -> Json<McpMessage> {
    debug!(
        "HTTP request (debug={}): {}",
        query.debug,
        String::from_utf8_lossy(&body)
    );

    // Notifications get an empty acknowledgement
    let response = process_raw(state.handler(query.debug), &body)
        .unwrap_or_else(McpMessage::acknowledgement);

    Json(response)
}

/// Open an SSE stream whose responses are fed by `POST /messages/`
async fn handle_mcp_sse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DebugQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, mut rx, guard) = state.sessions.open().await;
    info!(
        "SSE connection established: {} ({} open)",
        session_id,
        state.sessions.len().await
    );

    let mut endpoint = format!("{}?session_id={}", MESSAGES_PATH, session_id);
    if query.debug {
        endpoint.push_str("&debug=true");
    }

    let stream = async_stream::stream! {
        let _guard = guard;

        yield Ok(Event::default().event("endpoint").data(endpoint));

        while let Some(message) = rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(data) => yield Ok(Event::default().event("message").data(data)),
                Err(e) => error!("Failed to encode SSE message: {}", e),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Accept a message for an SSE session; the response goes out on its stream
async fn handle_session_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let session_id = query
        .session_id
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing session_id".to_string()))?;

    let sender = state.sessions.sender(&session_id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Unknown session: {}", session_id),
        )
    })?;

    debug!(
        "Session {} message: {}",
        session_id,
        String::from_utf8_lossy(&body)
    );

    if let Some(response) = process_raw(state.handler(query.debug), &body) {
        sender.send(response).await.map_err(|_| {
            (
                StatusCode::GONE,
                format!("Session closed: {}", session_id),
            )
        })?;
    }

    Ok(StatusCode::ACCEPTED)
}
