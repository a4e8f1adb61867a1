use crate::{
    extractor::AuthorizedUser,
    model::facility::{CreateFacilityRequest, FacilitiesResponse, FacilityResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::FacilityId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 施設の登録は管理者のみ
pub async fn register_facility(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateFacilityRequest>,
) -> AppResult<(StatusCode, Json<FacilityResponse>)> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    req.validate(&())?;

    let facility = registry.facility_repository().create(req.into()).await?;

    Ok((StatusCode::CREATED, Json(facility.into())))
}

pub async fn show_facility_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilitiesResponse>> {
    registry
        .facility_repository()
        .find_all()
        .await
        .map(FacilitiesResponse::from)
        .map(Json)
}

pub async fn show_terrain_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilitiesResponse>> {
    registry
        .facility_repository()
        .find_terrains()
        .await
        .map(FacilitiesResponse::from)
        .map(Json)
}

pub async fn show_facility(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilityResponse>> {
    registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("施設（{facility_id}）が見つかりませんでした。"))
        })
        .map(FacilityResponse::from)
        .map(Json)
}
