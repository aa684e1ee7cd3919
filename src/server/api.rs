use crate::cli::Args;
use crate::error::GatewayError;
use crate::models::chat::ChatResult;
use crate::orchestrator::Orchestrator;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::post,
    Router,
    Json,
    extract::{State, Query},
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use log::{info, warn, error};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
pub enum ApiError {
    EmptyQuery,
    Gateway(GatewayError),
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        ApiError::Gateway(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            ApiError::EmptyQuery => (StatusCode::BAD_REQUEST, "query must not be empty"),
            ApiError::Gateway(_) => (StatusCode::INTERNAL_SERVER_ERROR, "failed to generate a reply"),
        };
        (code, Json(ErrorResponse { error: message.to_string() })).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

pub fn router(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/api/chat", post(chat_handler))
        .with_state(state);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

pub async fn start_http_server(
    addr: &str,
    orchestrator: Arc<Orchestrator>,
    args: &Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    let tls_paths = args.tls_paths()?;
    let app = router(AppState::new(orchestrator), args.enable_cors);

    match tls_paths {
        Some((cert_path, key_path)) => {
            info!(
                "TLS enabled. Loading certificate from '{}' and key from '{}'",
                cert_path,
                key_path
            );
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &cert_path,
                &key_path
            ).await?;

            info!("Starting HTTPS API server on: https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                e
            })?;

            info!("Starting HTTP API server on: http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }
    }

    Ok(())
}

async fn chat_handler(
    State(state): State<AppState>,
    Query(req): Query<ChatRequest>,
) -> Result<Json<ChatResult>, ApiError> {
    let request_id = Uuid::new_v4();

    if req.query.trim().is_empty() {
        warn!("[{}] Rejected chat request with empty query", request_id);
        return Err(ApiError::EmptyQuery);
    }

    info!("[{}] Chat request received ({} chars)", request_id, req.query.chars().count());

    match state.orchestrator.chat(&req.query).await {
        Ok(result) => {
            info!("[{}] Reply generated ({} chars)", request_id, result.result.chars().count());
            Ok(Json(result))
        }
        Err(e) => {
            error!("[{}] Chat generation failed: {}", request_id, e);
            Err(e.into())
        }
    }
}
