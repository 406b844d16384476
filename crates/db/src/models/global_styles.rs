//! Global styles documents and their revisions.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trellis_core::revision::{split_content, Revision};
use trellis_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `global_styles` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GlobalStyles {
    pub id: DbId,
    pub theme: String,
    pub content: serde_json::Value,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `global_styles_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GlobalStylesRevision {
    pub id: DbId,
    pub global_styles_id: DbId,
    pub author_id: DbId,
    pub styles: serde_json::Value,
    pub settings: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<GlobalStylesRevision> for Revision {
    fn from(row: GlobalStylesRevision) -> Self {
        Revision {
            id: row.id,
            parent_id: row.global_styles_id,
            author_id: row.author_id,
            created_at: row.created_at,
            modified_at: row.updated_at,
            styles: row.styles,
            settings: row.settings,
        }
    }
}

// ---------------------------------------------------------------------------
// Create / update DTOs
// ---------------------------------------------------------------------------

/// Input for creating a global styles document.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGlobalStyles {
    pub theme: String,
    pub content: serde_json::Value,
    pub author_id: DbId,
}

/// Input for updating a global styles document. The new content is also
/// recorded as a revision authored by `author_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGlobalStyles {
    pub content: serde_json::Value,
    pub author_id: DbId,
}

impl UpdateGlobalStyles {
    /// The `styles` and `settings` sections of the new content.
    pub fn sections(&self) -> (serde_json::Value, serde_json::Value) {
        split_content(&self.content)
    }
}

/// Input for inserting a revision directly.
///
/// `created_at` defaults to `NOW()`; importers pass the original timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGlobalStylesRevision {
    pub global_styles_id: DbId,
    pub author_id: DbId,
    pub styles: serde_json::Value,
    pub settings: serde_json::Value,
    pub created_at: Option<Timestamp>,
}
