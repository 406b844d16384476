//! Handlers for the `/sidebars` resource.
//!
//! Reads merge the in-memory registry with the persisted widget assignment;
//! updates rewrite the assignment inside one transaction.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use trellis_core::error::CoreError;
use trellis_core::roles::{Caller, Capability};
use trellis_core::sidebar::{
    parse_widget_ids, SidebarAssignment, SidebarCatalog, SidebarRegistry, SidebarView,
    MANAGE_WIDGETS_DENIED,
};
use trellis_db::repositories::{SidebarWidgetsRepo, SiteOptionRepo, WidgetInstanceRepo};

use crate::error::{AppError, AppResult};
use crate::hooks::{filter_fields, ResourceKind};
use crate::middleware::auth::CurrentCaller;
use crate::query::QueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT|POST /sidebars/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSidebarRequest {
    /// Full replacement widget list; the assignment is left alone when absent.
    pub widgets: Option<Vec<Value>>,
}

impl UpdateSidebarRequest {
    /// Decode a batch sub-request body; a missing body is an empty request.
    pub fn from_body(body: Option<Value>) -> Result<Self, CoreError> {
        match body {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(body) => serde_json::from_value(body)
                .map_err(|e| CoreError::invalid_param("widgets", e.to_string())),
        }
    }

    fn widget_ids(&self) -> Result<Option<Vec<String>>, CoreError> {
        let Some(raw) = &self.widgets else {
            return Ok(None);
        };
        let ids: Vec<String> = raw
            .iter()
            .map(|w| match w {
                Value::String(id) => Ok(id.clone()),
                other => Err(CoreError::invalid_param(
                    "widgets",
                    format!("{other} is not a widget id"),
                )),
            })
            .collect::<Result<_, _>>()?;
        parse_widget_ids(&ids).map(Some)
    }
}

/// Everything a sidebar read needs, loaded up front.
struct Snapshot {
    registry: SidebarRegistry,
    assignment: SidebarAssignment,
    active_theme: String,
    live_widgets: HashSet<String>,
}

impl Snapshot {
    async fn load(state: &AppState) -> AppResult<Self> {
        let registry = state.sidebar_registry();
        let active_theme = SiteOptionRepo::get_active_theme(&state.pool)
            .await?
            .unwrap_or_default();
        let assignment = SidebarWidgetsRepo::load(&state.pool).await?;
        let live_widgets = WidgetInstanceRepo::list_widget_ids(&state.pool)
            .await?
            .into_iter()
            .collect();
        Ok(Self {
            registry,
            assignment,
            active_theme,
            live_widgets,
        })
    }

    fn catalog(&self) -> SidebarCatalog<'_> {
        SidebarCatalog {
            registry: &self.registry,
            assignment: &self.assignment,
            active_theme: &self.active_theme,
            live_widgets: &self.live_widgets,
        }
    }
}

fn to_item(state: &AppState, view: &SidebarView, headers: &mut HeaderMap) -> AppResult<Value> {
    let mut item =
        serde_json::to_value(view).map_err(|e| AppError::InternalError(e.to_string()))?;
    state.hooks.apply(ResourceKind::Sidebar, &mut item, headers);
    Ok(item)
}

/// GET|HEAD /api/v1/sidebars
pub async fn list_sidebars(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<QueryParams>,
) -> AppResult<Response> {
    params.context()?;

    let snapshot = Snapshot::load(&state).await?;
    let views = snapshot.catalog().list(&caller)?;

    if method == Method::HEAD {
        return Ok(HeaderMap::new().into_response());
    }

    let fields = params.fields();
    let mut items = Vec::with_capacity(views.len());
    for view in &views {
        let mut item = to_item(&state, view, &mut HeaderMap::new())?;
        filter_fields(&mut item, &fields);
        items.push(item);
    }

    Ok(Json(DataResponse { data: items }).into_response())
}

/// GET|HEAD /api/v1/sidebars/{id}
pub async fn get_sidebar(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    method: Method,
    Path(sidebar_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> AppResult<Response> {
    params.context()?;

    let snapshot = Snapshot::load(&state).await?;
    let view = snapshot.catalog().get(&caller, &sidebar_id)?;

    let mut headers = HeaderMap::new();
    let mut item = to_item(&state, &view, &mut headers)?;

    if method == Method::HEAD {
        return Ok(headers.into_response());
    }

    filter_fields(&mut item, &params.fields());
    Ok((headers, Json(DataResponse { data: item })).into_response())
}

/// PUT|POST /api/v1/sidebars/{id}
pub async fn update_sidebar(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(sidebar_id): Path<String>,
    Json(input): Json<UpdateSidebarRequest>,
) -> AppResult<Response> {
    let (item, headers) = update_sidebar_for(&state, &caller, &sidebar_id, input).await?;
    Ok((headers, Json(DataResponse { data: item })).into_response())
}

/// Rewrite a sidebar's widget list on behalf of `caller`.
///
/// Shared by the HTTP handler and batch dispatch. Returns the prepared item
/// and any headers hooks added.
pub async fn update_sidebar_for(
    state: &AppState,
    caller: &Caller,
    sidebar_id: &str,
    input: UpdateSidebarRequest,
) -> AppResult<(Value, HeaderMap)> {
    caller.require(Capability::EditThemeOptions, MANAGE_WIDGETS_DENIED)?;

    let registry = state.sidebar_registry();
    registry.ensure_known(sidebar_id)?;
    let widgets = input.widget_ids()?;

    if let Some(widgets) = widgets {
        let mut tx = state.pool.begin().await?;
        let mut assignment = SidebarWidgetsRepo::load_for_update(&mut tx).await?;

        let deactivated = assignment.assign(sidebar_id, widgets);
        let live = WidgetInstanceRepo::list_widget_ids_in(&mut tx).await?;
        let swept = assignment.sweep_orphans(live.iter().map(String::as_str));

        SidebarWidgetsRepo::save_in(&mut tx, &assignment).await?;
        tx.commit().await?;

        tracing::info!(
            sidebar_id,
            user_id = caller.user_id(),
            deactivated = deactivated.len(),
            swept = swept.len(),
            "Sidebar widgets updated",
        );
    }

    let snapshot = Snapshot::load(state).await?;
    let view = snapshot.catalog().get(caller, sidebar_id)?;

    let mut headers = HeaderMap::new();
    let item = to_item(state, &view, &mut headers)?;
    Ok((item, headers))
}
