use crate::model::id::{CourseId, EquipmentId, FacilityId, ReservationId, UserId};
use crate::model::reservation::window::ReservationWindow;
use chrono::{DateTime, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult};

// 予約対象はちょうど 1 リソース。3 つの nullable な ID の組よりも
// enum で表現するほうが「同時指定なし」を型で保証できる
#[derive(Debug, Clone, Copy)]
pub enum ReservationTarget {
    Course(CourseId),
    Equipment {
        equipment_id: EquipmentId,
        quantity: i32,
    },
    Facility(FacilityId),
}

#[derive(new, Debug)]
pub struct CreateReservation {
    pub user_id: UserId,
    pub target: ReservationTarget,
    pub window: ReservationWindow,
    pub pickup_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub reserved_at: DateTime<Utc>,
}

impl CreateReservation {
    // 機材予約で pickup/return が指定されていればそちらが実際の貸出期間。
    // return が pickup より前なら入力エラー、同時刻なら start/end に落とす
    pub fn effective_window(&self) -> AppResult<ReservationWindow> {
        match (self.pickup_date, self.return_date) {
            (Some(pickup), Some(ret)) => {
                if ret < pickup {
                    return Err(AppError::UnprocessableEntity(
                        "返却日時は受取日時以降である必要があります。".into(),
                    ));
                }
                if ret > pickup {
                    ReservationWindow::new(pickup, ret)
                } else {
                    Ok(self.window)
                }
            }
            _ => Ok(self.window),
        }
    }
}

#[derive(new, Debug)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requested_user: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_event(
        pickup: Option<DateTime<Utc>>,
        ret: Option<DateTime<Utc>>,
    ) -> CreateReservation {
        let window = ReservationWindow::new(
            Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
        )
        .unwrap();
        CreateReservation::new(
            UserId::new(),
            ReservationTarget::Equipment {
                equipment_id: EquipmentId::new(),
                quantity: 1,
            },
            window,
            pickup,
            ret,
            Utc::now(),
        )
    }

    #[test]
    fn falls_back_to_start_end_without_pickup_dates() {
        let event = base_event(None, None);
        assert_eq!(event.effective_window().unwrap(), event.window);
    }

    #[test]
    fn uses_pickup_return_when_present() {
        let pickup = Utc.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap();
        let ret = Utc.with_ymd_and_hms(2024, 7, 4, 18, 0, 0).unwrap();
        let event = base_event(Some(pickup), Some(ret));
        let window = event.effective_window().unwrap();
        assert_eq!(window.start(), pickup);
        assert_eq!(window.end(), ret);
    }

    #[test]
    fn rejects_return_before_pickup() {
        let pickup = Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap();
        let ret = Utc.with_ymd_and_hms(2024, 7, 2, 18, 0, 0).unwrap();
        let event = base_event(Some(pickup), Some(ret));
        assert!(matches!(
            event.effective_window(),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn same_instant_pickup_return_falls_back_to_window() {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let event = base_event(Some(at), Some(at));
        assert_eq!(event.effective_window().unwrap(), event.window);
    }
}
