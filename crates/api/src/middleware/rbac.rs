//! Capability-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! grant the capability the route needs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use trellis_core::error::CoreError;
use trellis_core::roles::{role_has_capability, Capability};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `edit_theme_options`. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn handler(RequireThemeEditor(user): RequireThemeEditor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireThemeEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireThemeEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !role_has_capability(&user.role, Capability::EditThemeOptions) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Sorry, you are not allowed to edit theme options.".into(),
            )));
        }
        Ok(RequireThemeEditor(user))
    }
}

/// Requires `switch_themes`. Rejects with 403 Forbidden otherwise.
pub struct RequireThemeSwitcher(pub AuthUser);

impl FromRequestParts<AppState> for RequireThemeSwitcher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !role_has_capability(&user.role, Capability::SwitchThemes) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Sorry, you are not allowed to switch themes.".into(),
            )));
        }
        Ok(RequireThemeSwitcher(user))
    }
}
