//! HTTP surface
//!
//! One route: `POST /mcpcall`. The request carries the query and the
//! provider list; the response is the model's final text, or a structured
//! error whose status follows the bridge error taxonomy.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use mcplink_core::lifecycle::RequestController;
use mcplink_core::session::McpConfig;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<RequestController>,
}

/// Request body for `/mcpcall`
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub query: String,
    pub mcp_config: McpConfig,
}

/// Success body
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mcpcall", post(handle_query))
        .with_state(state)
}

async fn handle_query(State(state): State<AppState>, Json(body): Json<UserQuery>) -> Response {
    match state.controller.handle(&body.query, &body.mcp_config).await {
        Ok(response) => Json(QueryResponse { response }).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorBody { error: e.to_string() })).into_response()
        }
    }
}
