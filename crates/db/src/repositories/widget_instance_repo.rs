//! Repository for the `widget_instances` table.

use sqlx::PgPool;
use trellis_core::widget::WidgetId;

use crate::models::widget::{CreateWidgetInstance, WidgetInstance};

const COLUMNS: &str = "id_base, number, settings, created_at, updated_at";

/// Widget instances, addressed by their `{id_base}-{number}` id.
pub struct WidgetInstanceRepo;

impl WidgetInstanceRepo {
    /// Insert an instance. Replaces the settings of an existing instance
    /// with the same id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWidgetInstance,
    ) -> Result<WidgetInstance, sqlx::Error> {
        let query = format!(
            "INSERT INTO widget_instances (id_base, number, settings)
             VALUES ($1, $2, $3)
             ON CONFLICT (id_base, number)
                DO UPDATE SET settings = EXCLUDED.settings, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WidgetInstance>(&query)
            .bind(&input.id_base)
            .bind(input.number)
            .bind(&input.settings)
            .fetch_one(pool)
            .await
    }

    pub async fn find(pool: &PgPool, id: &WidgetId) -> Result<Option<WidgetInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM widget_instances WHERE id_base = $1 AND number = $2"
        );
        sqlx::query_as::<_, WidgetInstance>(&query)
            .bind(&id.id_base)
            .bind(id.number)
            .fetch_optional(pool)
            .await
    }

    /// Delete an instance inside an open transaction. Returns `true` if a
    /// row was removed.
    pub async fn delete_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: &WidgetId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM widget_instances WHERE id_base = $1 AND number = $2")
            .bind(&id.id_base)
            .bind(id.number)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every live widget id, ordered by type then number.
    pub async fn list_widget_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id_base || '-' || number::text FROM widget_instances \
             ORDER BY id_base, number",
        )
        .fetch_all(pool)
        .await
    }

    /// Same as [`Self::list_widget_ids`], inside an open transaction.
    pub async fn list_widget_ids_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id_base || '-' || number::text FROM widget_instances \
             ORDER BY id_base, number",
        )
        .fetch_all(&mut **tx)
        .await
    }
}
