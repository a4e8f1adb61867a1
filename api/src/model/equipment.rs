use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    equipment::{event::CreateEquipment, Equipment},
    id::EquipmentId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(range(min = 0))]
    pub total_quantity: i32,
    #[garde(inner(range(min = 0)))]
    pub available_quantity: Option<i32>,
    #[garde(skip)]
    pub category: Option<String>,
    #[garde(skip)]
    pub condition: Option<String>,
}

impl From<CreateEquipmentRequest> for CreateEquipment {
    fn from(value: CreateEquipmentRequest) -> Self {
        let CreateEquipmentRequest {
            name,
            description,
            image_url,
            total_quantity,
            available_quantity,
            category,
            condition,
        } = value;
        CreateEquipment {
            name,
            description,
            image_url,
            total_quantity,
            available_quantity,
            category,
            condition,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentListResponse {
    pub items: Vec<EquipmentResponse>,
}

impl From<Vec<Equipment>> for EquipmentListResponse {
    fn from(value: Vec<Equipment>) -> Self {
        Self {
            items: value.into_iter().map(EquipmentResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
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

impl From<Equipment> for EquipmentResponse {
    fn from(value: Equipment) -> Self {
        let Equipment {
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
        Self {
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

// 機材の空き状況の照会。時間帯はクエリパラメータで受け取る
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentAvailabilityQuery {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentAvailabilityResponse {
    pub equipment_id: EquipmentId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub booked_in_window: i64,
}
