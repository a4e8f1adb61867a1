use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{CourseId, EquipmentId, FacilityId, ReservationId, UserId},
    reservation::{
        event::{CreateReservation, ReservationTarget},
        window::ReservationWindow,
        Reservation, ReservationStatus,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

// 予約対象は courseId / equipmentId / facilityId のうちちょうど 1 つを指定する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub course_id: Option<CourseId>,
    #[garde(skip)]
    pub equipment_id: Option<EquipmentId>,
    #[garde(skip)]
    pub facility_id: Option<FacilityId>,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(inner(range(min = 1)))]
    pub quantity: Option<i32>,
    #[garde(skip)]
    pub pickup_date: Option<DateTime<Utc>>,
    #[garde(skip)]
    pub return_date: Option<DateTime<Utc>>,
}

impl CreateReservationRequest {
    pub fn try_into_event(self, user_id: UserId) -> AppResult<CreateReservation> {
        let target = match (self.course_id, self.equipment_id, self.facility_id) {
            (Some(course_id), None, None) => ReservationTarget::Course(course_id),
            (None, Some(equipment_id), None) => ReservationTarget::Equipment {
                equipment_id,
                quantity: self.quantity.unwrap_or(1),
            },
            (None, None, Some(facility_id)) => ReservationTarget::Facility(facility_id),
            _ => {
                return Err(AppError::UnprocessableEntity(
                    "予約対象（コース・機材・施設）はちょうど 1 つ指定してください。".into(),
                ))
            }
        };

        let window = ReservationWindow::new(self.start_time, self.end_time)?;

        Ok(CreateReservation::new(
            user_id,
            target,
            window,
            self.pickup_date,
            self.return_date,
            Utc::now(),
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
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

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
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
        } = value;
        Self {
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_request() -> CreateReservationRequest {
        CreateReservationRequest {
            course_id: None,
            equipment_id: None,
            facility_id: None,
            start_time: Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 7, 1, 11, 0, 0).unwrap(),
            quantity: None,
            pickup_date: None,
            return_date: None,
        }
    }

    #[test]
    fn rejects_request_without_target() {
        let req = base_request();
        assert!(matches!(
            req.try_into_event(UserId::new()),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn rejects_request_with_two_targets() {
        let mut req = base_request();
        req.course_id = Some(CourseId::new());
        req.facility_id = Some(FacilityId::new());
        assert!(matches!(
            req.try_into_event(UserId::new()),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn equipment_quantity_defaults_to_one() {
        let mut req = base_request();
        req.equipment_id = Some(EquipmentId::new());
        let event = req.try_into_event(UserId::new()).unwrap();
        assert!(matches!(
            event.target,
            ReservationTarget::Equipment { quantity: 1, .. }
        ));
    }
}
