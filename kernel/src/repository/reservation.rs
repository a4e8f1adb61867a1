use crate::model::{
    id::{EquipmentId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        window::ReservationWindow,
        Reservation,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を作成する。空き確認・在庫引き落とし・台帳追加を 1 トランザクションで行う
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    // 予約をキャンセルし、在庫を復元する。所有者以外からの要求は拒否する
    async fn cancel(&self, event: CancelReservation) -> AppResult<Reservation>;
    // すべての予約を取得する（管理者向け）
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
    // ユーザー ID に紐づく予約を取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    // 指定時間帯と重複するアクティブな機材予約の数量合計。
    // 空き状況の表示にのみ使い、予約可否の判定には使わない
    async fn booked_quantity_in_window(
        &self,
        equipment_id: EquipmentId,
        window: ReservationWindow,
    ) -> AppResult<i64>;
}
