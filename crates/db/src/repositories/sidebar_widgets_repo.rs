//! Repository for the `sidebars` and `sidebar_widgets` tables.
//!
//! The assignment is always loaded and saved as a whole; callers apply
//! [`SidebarAssignment`] logic in between, inside one transaction.

use sqlx::PgPool;
use trellis_core::sidebar::SidebarAssignment;

use crate::models::sidebar::SidebarWidgetRow;

const LOAD_QUERY: &str = "SELECT s.sidebar_id, w.widget_id \
     FROM sidebars s \
     LEFT JOIN sidebar_widgets w ON w.sidebar_id = s.sidebar_id \
     ORDER BY s.position, w.position";

pub struct SidebarWidgetsRepo;

impl SidebarWidgetsRepo {
    /// Load the persisted assignment in sidebar order.
    pub async fn load(pool: &PgPool) -> Result<SidebarAssignment, sqlx::Error> {
        let rows = sqlx::query_as::<_, SidebarWidgetRow>(LOAD_QUERY)
            .fetch_all(pool)
            .await?;
        Ok(assemble(rows))
    }

    /// Load the assignment inside an open transaction, serializing against
    /// every other writer of the assignment until the transaction ends.
    ///
    /// The table lock holds even while `sidebars` is empty, so two writers
    /// never both start from the same snapshot.
    pub async fn load_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<SidebarAssignment, sqlx::Error> {
        lock_assignment(tx).await?;
        let rows = sqlx::query_as::<_, SidebarWidgetRow>(LOAD_QUERY)
            .fetch_all(&mut **tx)
            .await?;
        Ok(assemble(rows))
    }

    /// Replace the stored assignment with `assignment`.
    pub async fn save(pool: &PgPool, assignment: &SidebarAssignment) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_assignment(&mut tx).await?;
        Self::save_in(&mut tx, assignment).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace the stored assignment within an existing transaction.
    pub async fn save_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        assignment: &SidebarAssignment,
    ) -> Result<(), sqlx::Error> {
        // Cascades to sidebar_widgets.
        sqlx::query("DELETE FROM sidebars").execute(&mut **tx).await?;

        for (position, (sidebar_id, widgets)) in assignment.entries().iter().enumerate() {
            sqlx::query("INSERT INTO sidebars (sidebar_id, position) VALUES ($1, $2)")
                .bind(sidebar_id)
                .bind(position as i32)
                .execute(&mut **tx)
                .await?;

            for (widget_position, widget_id) in widgets.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO sidebar_widgets (widget_id, sidebar_id, position) \
                     VALUES ($1, $2, $3)",
                )
                .bind(widget_id)
                .bind(sidebar_id)
                .bind(widget_position as i32)
                .execute(&mut **tx)
                .await?;
            }
        }

        tracing::debug!(sidebars = assignment.entries().len(), "Sidebar assignment saved");
        Ok(())
    }
}

/// `SHARE ROW EXCLUSIVE` conflicts with itself and with plain row writes.
async fn lock_assignment(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> Result<(), sqlx::Error> {
    sqlx::query("LOCK TABLE sidebars IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

fn assemble(rows: Vec<SidebarWidgetRow>) -> SidebarAssignment {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    for row in rows {
        let index = match entries.iter().position(|(id, _)| *id == row.sidebar_id) {
            Some(index) => index,
            None => {
                entries.push((row.sidebar_id, Vec::new()));
                entries.len() - 1
            }
        };
        if let Some(widget_id) = row.widget_id {
            entries[index].1.push(widget_id);
        }
    }
    SidebarAssignment::from_entries(entries)
}
