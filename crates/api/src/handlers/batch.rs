//! `POST /batch`: run several write requests in one round trip.
//!
//! Sub-requests run sequentially under the caller's identity. A failing
//! sub-request reports its error envelope and does not stop the rest.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trellis_core::error::CoreError;
use trellis_core::roles::Caller;

use crate::error::{AppError, AppResult};
use crate::handlers::{sidebars, widgets};
use crate::middleware::auth::CurrentCaller;
use crate::query::QueryParams;
use crate::state::AppState;

/// Most sub-requests accepted in one batch.
pub const MAX_BATCH_REQUESTS: usize = 25;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub requests: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
pub struct BatchItem {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchItemResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub responses: Vec<BatchItemResponse>,
}

/// POST /api/v1/batch
pub async fn run_batch(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Json(input): Json<BatchRequest>,
) -> AppResult<impl IntoResponse> {
    if input.requests.len() > MAX_BATCH_REQUESTS {
        return Err(AppError::Core(CoreError::invalid_param(
            "requests",
            format!("at most {MAX_BATCH_REQUESTS} requests may be batched"),
        )));
    }

    let mut responses = Vec::with_capacity(input.requests.len());
    for item in input.requests {
        let (status, body) = match dispatch(&state, &caller, item).await {
            Ok(data) => (StatusCode::OK, json!({ "data": data })),
            Err(err) => err.status_and_body(),
        };
        responses.push(BatchItemResponse {
            status: status.as_u16(),
            body,
        });
    }

    tracing::info!(
        count = responses.len(),
        failed = responses.iter().filter(|r| r.status >= 400).count(),
        "Batch processed",
    );

    Ok(Json(BatchResponse { responses }))
}

/// Route one sub-request to the matching operation.
async fn dispatch(state: &AppState, caller: &Caller, item: BatchItem) -> AppResult<Value> {
    let (path, query) = item.path.split_once('?').unwrap_or((item.path.as_str(), ""));
    let path = path.strip_prefix("/api/v1").unwrap_or(path);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let method = item.method.to_ascii_uppercase();

    match (method.as_str(), segments.as_slice()) {
        ("DELETE", ["widgets", id]) => {
            let force = QueryParams::from_query_string(query)?.flag("force");
            widgets::delete_widget_for(state, caller, id, force).await
        }
        ("PUT" | "POST", ["sidebars", id]) => {
            let input = sidebars::UpdateSidebarRequest::from_body(item.body)?;
            let (data, _headers) = sidebars::update_sidebar_for(state, caller, id, input).await?;
            Ok(data)
        }
        _ => Err(AppError::Core(CoreError::NotFound {
            entity: "Route",
            id: format!("{method} {path}"),
        })),
    }
}
