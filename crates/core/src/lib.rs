//! Domain logic for the appearance API.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` crate
//! persists the records described here and the `api` crate wires both
//! together behind axum handlers.

pub mod context;
pub mod error;
pub mod pagination;
pub mod revision;
pub mod roles;
pub mod sanitize;
pub mod schema;
pub mod sidebar;
pub mod theme;
pub mod types;
pub mod widget;
