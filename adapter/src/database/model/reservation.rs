use kernel::model::{
    id::{CourseId, EquipmentId, FacilityId, ReservationId, UserId},
    reservation::{Reservation, ReservationStatus},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

// 予約一覧・詳細を取得する際に使う型。
// 対象リソースの名称は LEFT JOIN で引いてくる
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub id: ReservationId,
    pub user_id: UserId,
    pub course_id: Option<CourseId>,
    pub equipment_id: Option<EquipmentId>,
    pub facility_id: Option<FacilityId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub pickup_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub equipment_quantity: i32,
    pub reserved_at: DateTime<Utc>,
    pub course_name: Option<String>,
    pub equipment_name: Option<String>,
    pub facility_name: Option<String>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            id,
            user_id,
            course_id,
            equipment_id,
            facility_id,
            start_time,
            end_time,
            status,
            pickup_date,
            return_date,
            equipment_quantity,
            reserved_at,
            course_name,
            equipment_name,
            facility_name,
        } = value;
        let status: ReservationStatus = status.parse()?;
        Ok(Reservation {
            id,
            user_id,
            course_id,
            equipment_id,
            facility_id,
            start_time,
            end_time,
            pickup_date,
            return_date,
            equipment_quantity,
            status,
            reserved_at,
            course_name,
            equipment_name,
            facility_name,
        })
    }
}

// キャンセル対象の特定と在庫の巻き戻しに必要な列だけを読む型
#[derive(sqlx::FromRow)]
pub struct CancelTargetRow {
    pub id: ReservationId,
    pub course_id: Option<CourseId>,
    pub equipment_id: Option<EquipmentId>,
    pub facility_id: Option<FacilityId>,
    pub equipment_quantity: i32,
    pub status: String,
}
