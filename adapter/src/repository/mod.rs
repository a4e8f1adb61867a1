use kernel::model::id::FacilityId;
use shared::error::{AppError, AppResult};

pub mod course;
pub mod equipment;
pub mod facility;
pub mod health;
pub mod reservation;

// facilities.is_available は表示用キャッシュ。
// アクティブな予約の有無から同一トランザクション内で再計算する
pub(crate) async fn refresh_facility_availability(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    facility_id: FacilityId,
) -> AppResult<()> {
    sqlx::query(
        r#"
            UPDATE facilities
            SET is_available = NOT EXISTS (
                SELECT 1 FROM reservations
                WHERE facility_id = $1 AND status = 'confirmed'
            )
            WHERE id = $1
        "#,
    )
    .bind(facility_id)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(())
}
