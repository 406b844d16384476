//! Repository for the `global_styles_revisions` table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::global_styles::{CreateGlobalStylesRevision, GlobalStylesRevision};

const COLUMNS: &str = "id, global_styles_id, author_id, styles, settings, created_at, updated_at";

/// Newest first; same-instant revisions fall back to descending id.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// Read access to revision history, plus the insert used on parent update.
pub struct GlobalStylesRevisionRepo;

impl GlobalStylesRevisionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGlobalStylesRevision,
    ) -> Result<GlobalStylesRevision, sqlx::Error> {
        let query = format!(
            "INSERT INTO global_styles_revisions
                (global_styles_id, author_id, styles, settings, created_at, updated_at)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), COALESCE($5, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GlobalStylesRevision>(&query)
            .bind(input.global_styles_id)
            .bind(input.author_id)
            .bind(&input.styles)
            .bind(&input.settings)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Insert a revision inside an open transaction.
    pub async fn insert_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        global_styles_id: DbId,
        author_id: DbId,
        styles: &serde_json::Value,
        settings: &serde_json::Value,
    ) -> Result<GlobalStylesRevision, sqlx::Error> {
        let query = format!(
            "INSERT INTO global_styles_revisions (global_styles_id, author_id, styles, settings)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GlobalStylesRevision>(&query)
            .bind(global_styles_id)
            .bind(author_id)
            .bind(styles)
            .bind(settings)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn count_for_parent(pool: &PgPool, global_styles_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM global_styles_revisions WHERE global_styles_id = $1",
        )
        .bind(global_styles_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// One window of a parent's revisions, newest first. A `limit` of
    /// `None` returns everything from `offset` on.
    pub async fn list_for_parent(
        pool: &PgPool,
        global_styles_id: DbId,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<GlobalStylesRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM global_styles_revisions
             WHERE global_styles_id = $1
             {NEWEST_FIRST}
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GlobalStylesRevision>(&query)
            .bind(global_styles_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A revision by id, only if it belongs to `global_styles_id`.
    pub async fn find_for_parent(
        pool: &PgPool,
        global_styles_id: DbId,
        id: DbId,
    ) -> Result<Option<GlobalStylesRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM global_styles_revisions
             WHERE id = $1 AND global_styles_id = $2"
        );
        sqlx::query_as::<_, GlobalStylesRevision>(&query)
            .bind(id)
            .bind(global_styles_id)
            .fetch_optional(pool)
            .await
    }
}
