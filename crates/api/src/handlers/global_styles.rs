//! Handlers for global styles documents and their revision history.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use trellis_core::error::CoreError;
use trellis_core::revision::{merge_content, split_content, Revision};
use trellis_core::roles::Capability;
use trellis_core::types::{DbId, Timestamp};
use trellis_db::models::global_styles::{GlobalStyles, UpdateGlobalStyles};
use trellis_db::repositories::{GlobalStylesRepo, GlobalStylesRevisionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::pagination_headers;
use crate::hooks::{filter_fields, ResourceKind};
use crate::middleware::auth::CurrentCaller;
use crate::middleware::rbac::RequireThemeEditor;
use crate::query::QueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

const REVISIONS_DENIED: &str = "Sorry, you are not allowed to view revisions.";

/// A global styles document as returned to callers.
#[derive(Debug, Serialize)]
pub struct GlobalStylesView {
    pub id: DbId,
    pub theme: String,
    pub styles: serde_json::Value,
    pub settings: serde_json::Value,
    pub modified_gmt: Timestamp,
}

impl From<GlobalStyles> for GlobalStylesView {
    fn from(doc: GlobalStyles) -> Self {
        let (styles, settings) = split_content(&doc.content);
        Self {
            id: doc.id,
            theme: doc.theme,
            styles,
            settings,
            modified_gmt: doc.updated_at,
        }
    }
}

/// Request body for `PUT /global-styles/{id}`. Omitted sections are kept.
#[derive(Debug, Deserialize)]
pub struct UpdateGlobalStylesRequest {
    pub styles: Option<serde_json::Value>,
    pub settings: Option<serde_json::Value>,
}

async fn find_parent(state: &AppState, parent_id: DbId) -> AppResult<GlobalStyles> {
    GlobalStylesRepo::find_by_id(&state.pool, parent_id)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidParent(parent_id)))
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// GET /api/v1/global-styles/{id}
pub async fn get_global_styles(
    RequireThemeEditor(_user): RequireThemeEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = find_parent(&state, id).await?;
    Ok(Json(DataResponse {
        data: GlobalStylesView::from(doc),
    }))
}

/// PUT /api/v1/global-styles/{id}
///
/// Replace the given sections and record the result as a new revision
/// authored by the caller.
pub async fn update_global_styles(
    RequireThemeEditor(user): RequireThemeEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGlobalStylesRequest>,
) -> AppResult<impl IntoResponse> {
    let current = find_parent(&state, id).await?;
    let content = merge_content(&current.content, input.styles.as_ref(), input.settings.as_ref());

    let updated = GlobalStylesRepo::update(
        &state.pool,
        id,
        &UpdateGlobalStyles {
            content,
            author_id: user.user_id,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::InvalidParent(id)))?;

    tracing::info!(global_styles_id = id, user_id = user.user_id, "Global styles updated");

    Ok(Json(DataResponse {
        data: GlobalStylesView::from(updated),
    }))
}

// ---------------------------------------------------------------------------
// Revisions
// ---------------------------------------------------------------------------

/// GET|HEAD /api/v1/global-styles/{parent}/revisions
///
/// Newest first, paginated by `page`/`per_page`/`offset`. HEAD returns the
/// pagination headers only and skips prepare hooks.
pub async fn list_revisions(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    method: Method,
    Path(parent_id): Path<DbId>,
    Query(params): Query<QueryParams>,
) -> AppResult<Response> {
    caller.require(Capability::EditThemeOptions, REVISIONS_DENIED)?;
    let context = params.context()?;
    let page_query = params.page_query()?;

    find_parent(&state, parent_id).await?;

    let total = GlobalStylesRevisionRepo::count_for_parent(&state.pool, parent_id).await?;
    let window = page_query.resolve(u64::try_from(total).unwrap_or_default())?;

    let rows = if window.len == 0 {
        Vec::new()
    } else {
        GlobalStylesRevisionRepo::list_for_parent(
            &state.pool,
            parent_id,
            Some(window.sql_limit()),
            window.sql_offset(),
        )
        .await?
    };

    let base_url = state
        .config
        .api_url(&format!("/global-styles/{parent_id}/revisions"));
    let headers = pagination_headers(&window, &base_url, params.pairs());

    tracing::debug!(
        parent_id,
        total,
        returned = rows.len(),
        page = window.page,
        "Listing global styles revisions",
    );

    if method == Method::HEAD {
        return Ok(headers.into_response());
    }

    let fields = params.fields();
    let site_offset = state.config.site_offset();
    let items: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|row| {
            let mut item = Revision::from(row).to_json(context, site_offset);
            let mut item_headers = HeaderMap::new();
            state
                .hooks
                .apply(ResourceKind::GlobalStylesRevision, &mut item, &mut item_headers);
            filter_fields(&mut item, &fields);
            item
        })
        .collect();

    Ok((headers, Json(DataResponse { data: items })).into_response())
}

/// GET|HEAD /api/v1/global-styles/{parent}/revisions/{id}
pub async fn get_revision(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    method: Method,
    Path((parent_id, revision_id)): Path<(DbId, DbId)>,
    Query(params): Query<QueryParams>,
) -> AppResult<Response> {
    caller.require(Capability::EditThemeOptions, REVISIONS_DENIED)?;
    let context = params.context()?;

    find_parent(&state, parent_id).await?;

    let row = GlobalStylesRevisionRepo::find_for_parent(&state.pool, parent_id, revision_id)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidRevision(revision_id)))?;

    let mut item = Revision::from(row).to_json(context, state.config.site_offset());
    let mut headers = HeaderMap::new();
    state
        .hooks
        .apply(ResourceKind::GlobalStylesRevision, &mut item, &mut headers);

    if method == Method::HEAD {
        return Ok(headers.into_response());
    }

    filter_fields(&mut item, &params.fields());
    Ok((headers, Json(DataResponse { data: item })).into_response())
}
