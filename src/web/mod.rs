//! Web server module
//!
//! Serves the REST API under /api, the tool dispatch protocol under /mcp,
//! and the embedded UI at the root.

pub mod api;
pub mod chat;
pub mod mcp;
pub mod state;

use anyhow::Result;
use axum::{
    http::{header, StatusCode, Uri},
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use rust_embed::RustEmbed;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::chat::ChatRelay;
use crate::store::{MemoryStore, SqliteStore, TodoStore};
use state::AppState;

/// Embedded static files for the todo UI
#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

/// Configuration for the web server
pub struct WebConfig {
    pub port: u16,
    pub database: Option<PathBuf>,
    pub agent_url: Option<String>,
    pub model: String,
    pub system_prompt: Option<String>,
}

/// Start the web server
pub async fn serve(config: WebConfig) -> Result<()> {
    let (store, backend): (Arc<dyn TodoStore>, &'static str) = match &config.database {
        Some(path) => {
            let store = SqliteStore::open(path)?;
            tracing::info!("Database opened at {:?}", path);
            (Arc::new(store), "sqlite")
        }
        None => {
            tracing::info!("Using in-memory store; todos vanish on shutdown");
            (Arc::new(MemoryStore::new()), "memory")
        }
    };

    let relay = config.agent_url.as_deref().map(|url| {
        tracing::info!("Chat relay configured for {}", url);
        ChatRelay::new(url, &config.model, config.system_prompt.clone())
    });

    let state = AppState::new(store, backend, relay);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting web server on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Todos
        .route("/todos", get(api::list_todos))
        .route("/todos", post(api::create_todo))
        .route("/todos/{id}", get(api::get_todo))
        .route("/todos/{id}", put(api::update_todo))
        .route("/todos/{id}", delete(api::delete_todo))
        .route("/todos/{id}/complete", patch(api::mark_complete))
        // Chat
        .route("/chat", post(chat::chat_once))
        .route("/chat/session", post(chat::create_session))
        .route("/chat/message", post(chat::send_message))
        .route("/chat/status", get(chat::chat_status));

    let mcp_routes = Router::new()
        .route("/", get(mcp::mcp_info).post(mcp::rpc_endpoint))
        .route("/tools/create_todo", post(mcp::call_create_todo))
        .route(
            "/tools/list_todos",
            get(mcp::call_list_todos_get).post(mcp::call_list_todos),
        )
        .route("/tools/update_todo", post(mcp::call_update_todo))
        .route("/tools/delete_todo", post(mcp::call_delete_todo))
        .route(
            "/tools/mark_todo_complete",
            post(mcp::call_mark_todo_complete),
        );

    Router::new()
        .route("/health", get(api::health_check))
        .nest("/api", api_routes)
        .nest("/mcp", mcp_routes)
        .layer(cors)
        .with_state(state)
        .fallback(static_handler)
}

/// Serve the embedded UI
async fn static_handler(uri: Uri) -> Response<axum::body::Body> {
    let path = uri.path().trim_start_matches('/');

    let file = match path {
        "" => "index.html",
        "chat" => "chat.html",
        other => other,
    };

    if let Some(content) = StaticAssets::get(file) {
        let mime = mime_guess::from_path(file).first_or_octet_stream();
        let body = axum::body::Body::from(content.data.to_vec());
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime.as_ref())
            .body(body)
            .unwrap();
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(axum::body::Body::from("Not Found"))
        .unwrap()
}
