use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

// 予約時間帯。[start, end) の半開区間として扱う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReservationWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::UnprocessableEntity(
                "終了日時は開始日時より後である必要があります。".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    // 重複条件： s1 < e2 AND s2 < e1
    // 半開区間なので、端点がちょうど接する場合（e1 == s2）は重複しない
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
