//! Widget instances.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trellis_core::types::Timestamp;
use trellis_core::widget::WidgetId;

/// A row from the `widget_instances` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id_base: String,
    pub number: i64,
    pub settings: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WidgetInstance {
    /// The `{id_base}-{number}` id sidebars refer to.
    pub fn widget_id(&self) -> String {
        WidgetId {
            id_base: self.id_base.clone(),
            number: self.number,
        }
        .to_string()
    }
}

/// Input for creating a widget instance.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWidgetInstance {
    pub id_base: String,
    pub number: i64,
    pub settings: serde_json::Value,
}
