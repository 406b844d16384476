//! Repository for the `global_styles` table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::global_styles::{CreateGlobalStyles, GlobalStyles, UpdateGlobalStyles};
use crate::repositories::GlobalStylesRevisionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, theme, content, author_id, created_at, updated_at";

/// Provides CRUD operations for global styles documents.
pub struct GlobalStylesRepo;

impl GlobalStylesRepo {
    /// Insert a new document for a theme. Fails on `uq_global_styles_theme`
    /// if the theme already has one.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGlobalStyles,
    ) -> Result<GlobalStyles, sqlx::Error> {
        let query = format!(
            "INSERT INTO global_styles (theme, content, author_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GlobalStyles>(&query)
            .bind(&input.theme)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GlobalStyles>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM global_styles WHERE id = $1");
        sqlx::query_as::<_, GlobalStyles>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a document's content and record the new content as a
    /// revision, in one transaction.
    ///
    /// Returns `None` if no document with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGlobalStyles,
    ) -> Result<Option<GlobalStyles>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE global_styles SET content = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, GlobalStyles>(&query)
            .bind(id)
            .bind(&input.content)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(updated) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        let (styles, settings) = input.sections();
        GlobalStylesRevisionRepo::insert_in(&mut tx, id, input.author_id, &styles, &settings)
            .await?;

        tx.commit().await?;
        tracing::debug!(global_styles_id = id, author_id = input.author_id, "Global styles updated");
        Ok(Some(updated))
    }

    /// Permanently delete a document and, by cascade, its revisions.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM global_styles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
