//! Repository for the `site_options` key/value table.

use sqlx::PgPool;

const ACTIVE_THEME: &str = "active_theme";

/// Site-wide options. Values are stored as JSONB.
pub struct SiteOptionRepo;

impl SiteOptionRepo {
    pub async fn get(pool: &PgPool, name: &str) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar("SELECT option_value FROM site_options WHERE option_name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace an option.
    pub async fn set(pool: &PgPool, name: &str, value: &serde_json::Value) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO site_options (option_name, option_value) VALUES ($1, $2) \
             ON CONFLICT (option_name) \
                DO UPDATE SET option_value = EXCLUDED.option_value, updated_at = NOW()",
        )
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Stylesheet of the active theme, or `None` if unset.
    pub async fn get_active_theme(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        let value = Self::get(pool, ACTIVE_THEME).await?;
        Ok(value.and_then(|v| v.as_str().map(str::to_string)))
    }

    pub async fn set_active_theme(pool: &PgPool, stylesheet: &str) -> Result<(), sqlx::Error> {
        Self::set(pool, ACTIVE_THEME, &serde_json::Value::from(stylesheet)).await?;
        tracing::info!(stylesheet, "Active theme switched");
        Ok(())
    }
}
