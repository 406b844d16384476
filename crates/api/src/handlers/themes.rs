//! Handlers for the active theme.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use trellis_core::error::CoreError;
use trellis_core::theme::parse_stylesheet;
use trellis_db::repositories::SiteOptionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireThemeSwitcher;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveTheme {
    pub stylesheet: String,
}

/// GET /api/v1/themes/active
pub async fn get_active_theme(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stylesheet = SiteOptionRepo::get_active_theme(&state.pool)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Theme",
            id: "active".to_string(),
        }))?;
    Ok(Json(DataResponse {
        data: ActiveTheme { stylesheet },
    }))
}

/// PUT /api/v1/themes/active
///
/// Switching never touches widget assignments; sidebars the new theme does
/// not register simply report `inactive` from now on.
pub async fn switch_theme(
    RequireThemeSwitcher(user): RequireThemeSwitcher,
    State(state): State<AppState>,
    Json(input): Json<ActiveTheme>,
) -> AppResult<impl IntoResponse> {
    let stylesheet = parse_stylesheet(&input.stylesheet)?;

    SiteOptionRepo::set_active_theme(&state.pool, stylesheet).await?;
    tracing::info!(stylesheet, user_id = user.user_id, "Theme switched");

    Ok(Json(DataResponse {
        data: ActiveTheme {
            stylesheet: stylesheet.to_string(),
        },
    }))
}
