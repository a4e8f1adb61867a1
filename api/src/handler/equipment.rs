use crate::{
    extractor::AuthorizedUser,
    model::equipment::{
        CreateEquipmentRequest, EquipmentAvailabilityQuery, EquipmentAvailabilityResponse,
        EquipmentListResponse, EquipmentResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::EquipmentId, reservation::window::ReservationWindow};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 機材の登録は管理者のみ
pub async fn register_equipment(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEquipmentRequest>,
) -> AppResult<(StatusCode, Json<EquipmentResponse>)> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    req.validate(&())?;

    let equipment = registry.equipment_repository().create(req.into()).await?;

    Ok((StatusCode::CREATED, Json(equipment.into())))
}

pub async fn show_equipment_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentListResponse>> {
    registry
        .equipment_repository()
        .find_all()
        .await
        .map(EquipmentListResponse::from)
        .map(Json)
}

pub async fn show_available_equipment(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentListResponse>> {
    registry
        .equipment_repository()
        .find_available()
        .await
        .map(EquipmentListResponse::from)
        .map(Json)
}

pub async fn show_equipment(
    _user: AuthorizedUser,
    Path(equipment_id): Path<EquipmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentResponse>> {
    registry
        .equipment_repository()
        .find_by_id(equipment_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("機材（{equipment_id}）が見つかりませんでした。"))
        })
        .map(EquipmentResponse::from)
        .map(Json)
}

// 指定時間帯における機材の貸出状況を返す。
// 予約可否の判定は在庫カウンタで行うため、ここの値は表示用
pub async fn show_equipment_availability(
    _user: AuthorizedUser,
    Path(equipment_id): Path<EquipmentId>,
    Query(query): Query<EquipmentAvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentAvailabilityResponse>> {
    let equipment = registry
        .equipment_repository()
        .find_by_id(equipment_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("機材（{equipment_id}）が見つかりませんでした。"))
        })?;

    let window = ReservationWindow::new(query.start_time, query.end_time)?;
    let booked = registry
        .reservation_repository()
        .booked_quantity_in_window(equipment_id, window)
        .await?;

    Ok(Json(EquipmentAvailabilityResponse {
        equipment_id,
        start_time: query.start_time,
        end_time: query.end_time,
        total_quantity: equipment.total_quantity,
        available_quantity: equipment.available_quantity,
        booked_in_window: booked,
    }))
}
