use crate::{
    extractor::AuthorizedUser,
    model::reservation::{CreateReservationRequest, ReservationResponse, ReservationsResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::ReservationId, reservation::event::CancelReservation};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn create_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate(&())?;

    let event = req.try_into_event(user.id())?;
    let reservation = registry.reservation_repository().create(event).await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .cancel(CancelReservation::new(reservation_id, user.id()))
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

// 全件一覧は管理者のみ
pub async fn show_reservation_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    registry
        .reservation_repository()
        .find_all()
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_my_reservations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_user_id(user.id())
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}
