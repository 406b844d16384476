//! Schema introspection.

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Json;
use trellis_core::error::CoreError;
use trellis_core::schema::schema_for;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

/// GET /api/v1/schemas/{resource}
///
/// Item schema plus the arguments accepted by the resource's read routes.
pub async fn get_schema(Path(resource): Path<String>) -> AppResult<impl IntoResponse> {
    let schema = schema_for(&resource).ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Schema",
            id: resource.clone(),
        })
    })?;
    Ok(Json(DataResponse { data: schema }))
}
