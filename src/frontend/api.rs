use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::guard_core::{self, Decision, GuardError, History, Moderator, UpstreamError};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: History,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: Decision,
}

/// `POST /api/chat`, open to any origin.
pub fn router(moderator: Arc<Moderator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_endpoint))
        .with_state(moderator)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn chat_endpoint(
    State(moderator): State<Arc<Moderator>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> guard_core::Result<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected chat request");
        GuardError::Validation(rejection.body_text())
    })?;

    let response = moderator.decide(&request.message, &request.history).await?;
    Ok(Json(ChatResponse { response }))
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = match &self {
            GuardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GuardError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            GuardError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
