//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and, where rows are written, a `Deserialize` input DTO.

pub mod global_styles;
pub mod sidebar;
pub mod widget;
