use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::super::AppState;
use crate::core::error::ServiceError;
use crate::core::types::{OptimizationRequest, OptimizationResult};

#[derive(Deserialize)]
pub(crate) struct TaskIdQuery {
    taskid: String,
}

/// Error responses: JSON body with the status mapping from the service
/// taxonomy.
pub(crate) struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::NotReady => StatusCode::TOO_EARLY,
            ServiceError::InvalidTransition { .. } | ServiceError::TaskFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub(crate) async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Parsed by hand so a malformed body is a 400, not a transport-level 422.
    let request: OptimizationRequest = serde_json::from_value(payload)
        .map_err(|e| ServiceError::InvalidRequest(format!("malformed request body: {e}")))?;
    let id = state.manager.submit(request).await?;
    Ok(Json(json!({ "taskid": id.to_string() })))
}

pub(crate) async fn task_status(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_task_id(&query.taskid)?;
    let task_state = state.manager.status(id).await?;
    Ok(Json(json!({ "status": task_state.as_str() })))
}

pub(crate) async fn task_result(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Json<OptimizationResult>, ApiError> {
    let id = parse_task_id(&query.taskid)?;
    let result = state.manager.result(id).await?;
    Ok(Json(result))
}

/// Ids that do not even parse as UUIDs cannot name a task.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::NotFound.into())
}
