use crate::model::id::EquipmentId;
use chrono::{DateTime, Utc};

pub mod event {
    #[derive(Debug)]
    pub struct CreateEquipment {
        pub name: String,
        pub description: Option<String>,
        pub image_url: Option<String>,
        pub total_quantity: i32,
        // 未指定時は total_quantity と同じ値で登録する
        pub available_quantity: Option<i32>,
        pub category: Option<String>,
        pub condition: Option<String>,
    }
}

#[derive(Debug)]
pub struct Equipment {
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
