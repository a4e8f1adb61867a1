use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    facility::{event::CreateFacility, Facility},
    id::FacilityId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(skip)]
    pub opening_hours: Option<String>,
    #[garde(skip)]
    pub closing_hours: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub is_terrain: bool,
}

impl From<CreateFacilityRequest> for CreateFacility {
    fn from(value: CreateFacilityRequest) -> Self {
        let CreateFacilityRequest {
            name,
            description,
            image_url,
            opening_hours,
            closing_hours,
            is_terrain,
        } = value;
        CreateFacility {
            name,
            description,
            image_url,
            opening_hours,
            closing_hours,
            is_terrain,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitiesResponse {
    pub items: Vec<FacilityResponse>,
}

impl From<Vec<Facility>> for FacilitiesResponse {
    fn from(value: Vec<Facility>) -> Self {
        Self {
            items: value.into_iter().map(FacilityResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
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

impl From<Facility> for FacilityResponse {
    fn from(value: Facility) -> Self {
        let Facility {
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
        Self {
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
