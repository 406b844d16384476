//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::CurrentCaller`] -- Anonymous when no token is sent.
//! - [`rbac::RequireThemeEditor`] -- Requires `edit_theme_options`.
//! - [`rbac::RequireThemeSwitcher`] -- Requires `switch_themes`.

pub mod auth;
pub mod rbac;
