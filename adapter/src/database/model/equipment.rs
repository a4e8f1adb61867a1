use kernel::model::{equipment::Equipment, id::EquipmentId};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct EquipmentRow {
    pub id: EquipmentId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub category: Option<String>,
    pub condition: String,
    pub created_at: DateTime<Utc>,
}

impl From<EquipmentRow> for Equipment {
    fn from(value: EquipmentRow) -> Self {
        let EquipmentRow {
            id,
            name,
            description,
            image_url,
            total_quantity,
            available_quantity,
            category,
            condition,
            created_at,
        } = value;
        Equipment {
            id,
            name,
            description,
            image_url,
            total_quantity,
            available_quantity,
            category,
            condition,
            created_at,
        }
    }
}
