//! Handlers for the `/widgets` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use trellis_core::error::CoreError;
use trellis_core::roles::{Caller, Capability};
use trellis_core::sidebar::{INACTIVE_SIDEBAR_ID, MANAGE_WIDGETS_DENIED};
use trellis_core::widget::WidgetId;
use trellis_db::models::widget::WidgetInstance;
use trellis_db::repositories::{SidebarWidgetsRepo, WidgetInstanceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentCaller;
use crate::query::QueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn widget_json(instance: &WidgetInstance, sidebar: Option<&str>) -> Value {
    json!({
        "id": instance.widget_id(),
        "id_base": instance.id_base,
        "sidebar": sidebar,
        "instance": instance.settings,
    })
}

/// DELETE /api/v1/widgets/{id}
///
/// `?force=true` deletes the instance; otherwise the widget is moved to the
/// inactive sidebar.
pub async fn delete_widget(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(widget_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> AppResult<impl IntoResponse> {
    let data = delete_widget_for(&state, &caller, &widget_id, params.flag("force")).await?;
    Ok(Json(DataResponse { data }))
}

/// Delete or deactivate a widget on behalf of `caller`.
///
/// Shared by the HTTP handler and batch dispatch.
pub async fn delete_widget_for(
    state: &AppState,
    caller: &Caller,
    raw_id: &str,
    force: bool,
) -> AppResult<Value> {
    caller.require(Capability::EditThemeOptions, MANAGE_WIDGETS_DENIED)?;

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Widget",
            id: raw_id.to_string(),
        })
    };
    let id = WidgetId::parse(raw_id).map_err(|_| not_found())?;
    let instance = WidgetInstanceRepo::find(&state.pool, &id)
        .await?
        .ok_or_else(not_found)?;
    let widget_id = id.to_string();

    let mut tx = state.pool.begin().await?;
    let mut assignment = SidebarWidgetsRepo::load_for_update(&mut tx).await?;
    let previous_sidebar = assignment.sidebar_of(&widget_id).map(str::to_string);

    let data = if force {
        WidgetInstanceRepo::delete_in(&mut tx, &id).await?;
        assignment.remove_widget(&widget_id);
        json!({
            "deleted": true,
            "previous": widget_json(&instance, previous_sidebar.as_deref()),
        })
    } else {
        assignment.deactivate_widget(&widget_id);
        widget_json(&instance, Some(INACTIVE_SIDEBAR_ID))
    };

    SidebarWidgetsRepo::save_in(&mut tx, &assignment).await?;
    tx.commit().await?;

    tracing::info!(
        widget_id = %widget_id,
        force,
        previous_sidebar = ?previous_sidebar,
        user_id = caller.user_id(),
        "Widget deleted",
    );

    Ok(data)
}
