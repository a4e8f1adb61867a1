use kernel::model::{facility::Facility, id::FacilityId};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct FacilityRow {
    pub id: FacilityId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub opening_hours: Option<String>,
    pub closing_hours: Option<String>,
    pub is_available: bool,
    pub is_terrain: bool,
    pub created_at: DateTime<Utc>,
}

impl From<FacilityRow> for Facility {
    fn from(value: FacilityRow) -> Self {
        let FacilityRow {
            id,
            name,
            description,
            image_url,
            opening_hours,
            closing_hours,
            is_available,
            is_terrain,
            created_at,
        } = value;
        Facility {
            id,
            name,
            description,
            image_url,
            opening_hours,
            closing_hours,
            is_available,
            is_terrain,
            created_at,
        }
    }
}
