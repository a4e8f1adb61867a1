use crate::model::id::{CourseId, EquipmentId, FacilityId, ReservationId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::error::AppError;
use std::str::FromStr;

pub mod event;
pub mod window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(AppError::ConversionEntityError(format!(
                "Unknown reservation status: {other}"
            ))),
        }
    }
}

// 予約台帳の 1 レコード。course / equipment / facility のいずれかを参照し、
// 一覧表示のために対象リソースの名称も併せて保持する
#[derive(Debug)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub course_id: Option<CourseId>,
    pub equipment_id: Option<EquipmentId>,
    pub facility_id: Option<FacilityId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub equipment_quantity: i32,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
    pub course_name: Option<String>,
    pub equipment_name: Option<String>,
    pub facility_name: Option<String>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}
