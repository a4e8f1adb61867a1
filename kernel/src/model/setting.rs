use crate::model::reservation::window::ReservationWindow;
use chrono::Timelike;
use shared::error::{AppError, AppResult};

// 営業時間。reservation_settings の単一行から読み込む（既定 8〜22 時）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub min_hour: u32,
    pub max_hour: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            min_hour: 8,
            max_hour: 22,
        }
    }
}

impl BusinessHours {
    // 開始は min_hour 以降、終了は max_hour 以前。
    // 終了がちょうど max_hour:00 の場合のみ許可する（分が付くと超過扱い）
    pub fn check(&self, window: &ReservationWindow) -> AppResult<()> {
        let start_hour = window.start().hour();
        let end_hour = window.end().hour();
        let end_minute = window.end().minute();

        let out_of_hours = start_hour < self.min_hour
            || end_hour > self.max_hour
            || (end_hour == self.max_hour && end_minute > 0);
        if out_of_hours {
            return Err(AppError::UnprocessableEntity(format!(
                "予約は {}時から{}時の間でのみ受け付けています（開始 {}時、終了 {}時{}分）。",
                self.min_hour, self.max_hour, start_hour, end_hour, end_minute
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn window(start: (u32, u32), end: (u32, u32)) -> ReservationWindow {
        ReservationWindow::new(
            Utc.with_ymd_and_hms(2024, 7, 1, start.0, start.1, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 7, 1, end.0, end.1, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn accepts_window_inside_hours() {
        let hours = BusinessHours::default();
        assert!(hours.check(&window((8, 0), (10, 0))).is_ok());
        assert!(hours.check(&window((12, 30), (14, 45))).is_ok());
    }

    #[test]
    fn accepts_end_exactly_at_closing() {
        let hours = BusinessHours::default();
        assert!(hours.check(&window((21, 0), (22, 0))).is_ok());
    }

    #[test]
    fn rejects_start_before_opening() {
        let hours = BusinessHours::default();
        assert!(matches!(
            hours.check(&window((6, 0), (9, 0))),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn rejects_end_past_closing() {
        let hours = BusinessHours::default();
        assert!(matches!(
            hours.check(&window((21, 0), (23, 0))),
            Err(AppError::UnprocessableEntity(_))
        ));
        // 22 時ちょうどは可、22 時 30 分は不可
        assert!(matches!(
            hours.check(&window((21, 0), (22, 30))),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn honours_configured_hours() {
        let hours = BusinessHours {
            min_hour: 10,
            max_hour: 18,
        };
        assert!(hours.check(&window((9, 0), (11, 0))).is_err());
        assert!(hours.check(&window((10, 0), (18, 0))).is_ok());
    }
}
