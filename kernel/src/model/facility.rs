use crate::model::id::FacilityId;
use chrono::{DateTime, Utc};

pub mod event {
    #[derive(Debug)]
    pub struct CreateFacility {
        pub name: String,
        pub description: Option<String>,
        pub image_url: Option<String>,
        pub opening_hours: Option<String>,
        pub closing_hours: Option<String>,
        pub is_terrain: bool,
    }
}

#[derive(Debug)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub opening_hours: Option<String>,
    pub closing_hours: Option<String>,
    // 表示用キャッシュ。可用性の判定そのものは予約台帳の重複チェックで行う
    pub is_available: bool,
    pub is_terrain: bool,
    pub created_at: DateTime<Utc>,
}
