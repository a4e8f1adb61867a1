use crate::database::{
    model::reservation::{CancelTargetRow, ReservationRow},
    ConnectionPool,
};
use crate::repository::refresh_facility_availability;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::{CourseId, EquipmentId, FacilityId, ReservationId, UserId};
use kernel::model::reservation::{
    event::{CancelReservation, CreateReservation, ReservationTarget},
    window::ReservationWindow,
    Reservation,
};
use kernel::model::setting::BusinessHours;
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    //
    // 空き確認・在庫の引き落とし・台帳への追加はすべてこのトランザクション内で
    // 完結させる。対象リソースの行を FOR UPDATE でロックしてから判定するため、
    // 同一リソースへの同時リクエストは直列化され、後着側は先着側のコミット結果を
    // 見た上で在庫不足・時間帯重複として失敗する
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // ① 営業時間の設定を読み、予約時間帯を検証する
        let hours = fetch_business_hours(&mut tx).await?;
        hours.check(&event.window)?;

        // 機材予約では pickup/return が実際の貸出期間になる
        let window = event.effective_window()?;

        let reservation_id = ReservationId::new();
        let (course_id, equipment_id, facility_id, quantity): (
            Option<CourseId>,
            Option<EquipmentId>,
            Option<FacilityId>,
            i32,
        ) = match event.target {
            // ② 施設：存在確認のうえ、アクティブな予約との時間帯重複を調べる。
            //    重複があれば即時拒否（施設は時間帯ごとに排他）
            ReservationTarget::Facility(facility_id) => {
                let facility = sqlx::query_as::<_, (FacilityId,)>(
                    r#"SELECT id FROM facilities WHERE id = $1 FOR UPDATE"#,
                )
                .bind(facility_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if facility.is_none() {
                    return Err(AppError::EntityNotFound(format!(
                        "施設（{facility_id}）が見つかりませんでした。"
                    )));
                }

                // 重複条件： existing.start < new.end AND new.start < existing.end
                let overlap = sqlx::query_as::<_, (ReservationId,)>(
                    r#"
                        SELECT id FROM reservations
                        WHERE facility_id = $1
                          AND status = 'confirmed'
                          AND start_time < $3
                          AND $2 < end_time
                        LIMIT 1
                    "#,
                )
                .bind(facility_id)
                .bind(window.start())
                .bind(window.end())
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if overlap.is_some() {
                    return Err(AppError::ResourceConflict(format!(
                        "施設（{facility_id}）は指定時間帯にすでに予約が存在します。"
                    )));
                }

                (None, None, Some(facility_id), 1)
            }
            // ③ 機材：在庫カウンタが唯一の正。行ロック下で残数を確認し、
            //    その場で引き落とす（予約の存在＝在庫の減少）
            ReservationTarget::Equipment {
                equipment_id,
                quantity,
            } => {
                if quantity < 1 {
                    return Err(AppError::UnprocessableEntity(
                        "予約数量は 1 以上である必要があります。".into(),
                    ));
                }

                let stock = sqlx::query_as::<_, (i32,)>(
                    r#"SELECT available_quantity FROM equipment WHERE id = $1 FOR UPDATE"#,
                )
                .bind(equipment_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                let Some((available,)) = stock else {
                    return Err(AppError::EntityNotFound(format!(
                        "機材（{equipment_id}）が見つかりませんでした。"
                    )));
                };

                if available < quantity {
                    return Err(AppError::ResourceConflict(format!(
                        "機材（{equipment_id}）の在庫が不足しています（残り {available} 点、要求 {quantity} 点）。"
                    )));
                }

                let res = sqlx::query(
                    r#"UPDATE equipment SET available_quantity = available_quantity - $1 WHERE id = $2"#,
                )
                .bind(quantity)
                .bind(equipment_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if res.rows_affected() < 1 {
                    return Err(AppError::NoRowsAffectedError(
                        "No equipment stock has been decremented".into(),
                    ));
                }

                (None, Some(equipment_id), None, quantity)
            }
            // ④ コース：残席カウンタを行ロック下で確認し、1 席引き落とす
            ReservationTarget::Course(course_id) => {
                let spots = sqlx::query_as::<_, (i32,)>(
                    r#"SELECT available_spots FROM courses WHERE id = $1 FOR UPDATE"#,
                )
                .bind(course_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                let Some((spots,)) = spots else {
                    return Err(AppError::EntityNotFound(format!(
                        "コース（{course_id}）が見つかりませんでした。"
                    )));
                };

                if spots <= 0 {
                    return Err(AppError::ResourceConflict(format!(
                        "コース（{course_id}）には空きがありません。"
                    )));
                }

                let res = sqlx::query(
                    r#"UPDATE courses SET available_spots = available_spots - 1 WHERE id = $1"#,
                )
                .bind(course_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if res.rows_affected() < 1 {
                    return Err(AppError::NoRowsAffectedError(
                        "No course spot has been decremented".into(),
                    ));
                }

                (Some(course_id), None, None, 1)
            }
        };

        // ⑤ 台帳にレコードを追加する
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (id, user_id, course_id, equipment_id, facility_id,
                 start_time, end_time, status,
                 pickup_date, return_date, equipment_quantity, reserved_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed', $8, $9, $10, $11)
            "#,
        )
        .bind(reservation_id)
        .bind(event.user_id)
        .bind(course_id)
        .bind(equipment_id)
        .bind(facility_id)
        .bind(event.window.start())
        .bind(event.window.end())
        .bind(event.pickup_date)
        .bind(event.return_date)
        .bind(quantity)
        .bind(event.reserved_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        // ⑥ 施設の表示キャッシュを再計算する
        if let Some(facility_id) = facility_id {
            refresh_facility_availability(&mut tx, facility_id).await?;
        }

        let reservation = fetch_enriched(&mut tx, reservation_id).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation)
    }

    // 予約キャンセル操作を行う
    async fn cancel(&self, event: CancelReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // ① 予約の存在と所有者を確認する（行ロック）。
        //    他人の予約はキャンセルできない。存在しない場合と区別しない
        let target = sqlx::query_as::<_, CancelTargetRow>(
            r#"
                SELECT id, course_id, equipment_id, facility_id, equipment_quantity, status
                FROM reservations
                WHERE id = $1 AND user_id = $2
                FOR UPDATE
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.requested_user)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(target) = target else {
            return Err(AppError::EntityNotFound(
                "予約が見つからないか、アクセス権がありません。".into(),
            ));
        };

        // ② キャンセル済みの予約への再キャンセルはエラー（冪等にはしない）
        if target.status == "cancelled" {
            return Err(AppError::AlreadyCancelled(
                "この予約はすでにキャンセルされています。".into(),
            ));
        }

        // ③ ステータスを更新する
        let res = sqlx::query(r#"UPDATE reservations SET status = 'cancelled' WHERE id = $1"#)
            .bind(target.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation has been cancelled".into(),
            ));
        }

        // ④ 作成時に消費した在庫をそのまま巻き戻す
        if let Some(equipment_id) = target.equipment_id {
            sqlx::query(
                r#"UPDATE equipment SET available_quantity = available_quantity + $1 WHERE id = $2"#,
            )
            .bind(target.equipment_quantity)
            .bind(equipment_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        // コース開催用の施設自動予約は course_id と facility_id の両方を持つが、
        // 席は消費していないので戻さない
        if let (Some(course_id), None) = (target.course_id, target.facility_id) {
            sqlx::query(
                r#"UPDATE courses SET available_spots = available_spots + 1 WHERE id = $1"#,
            )
            .bind(course_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        // 施設は無条件で空きに戻さず、残っているアクティブな予約から再計算する
        if let Some(facility_id) = target.facility_id {
            refresh_facility_availability(&mut tx, facility_id).await?;
        }

        let reservation = fetch_enriched(&mut tx, target.id).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation)
    }

    // すべての予約情報を取得する（管理者向け一覧）
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.id, r.user_id, r.course_id, r.equipment_id, r.facility_id,
                    r.start_time, r.end_time, r.status,
                    r.pickup_date, r.return_date, r.equipment_quantity, r.reserved_at,
                    c.name AS course_name,
                    e.name AS equipment_name,
                    f.name AS facility_name
                FROM reservations AS r
                LEFT JOIN courses AS c ON r.course_id = c.id
                LEFT JOIN equipment AS e ON r.equipment_id = e.id
                LEFT JOIN facilities AS f ON r.facility_id = f.id
                ORDER BY r.start_time DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    // ユーザー ID に紐づく予約情報を取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.id, r.user_id, r.course_id, r.equipment_id, r.facility_id,
                    r.start_time, r.end_time, r.status,
                    r.pickup_date, r.return_date, r.equipment_quantity, r.reserved_at,
                    c.name AS course_name,
                    e.name AS equipment_name,
                    f.name AS facility_name
                FROM reservations AS r
                LEFT JOIN courses AS c ON r.course_id = c.id
                LEFT JOIN equipment AS e ON r.equipment_id = e.id
                LEFT JOIN facilities AS f ON r.facility_id = f.id
                WHERE r.user_id = $1
                ORDER BY r.start_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    // 指定時間帯と重なるアクティブな機材予約の数量合計。
    // 貸出期間（pickup/return）があればそちらを実際の時間帯として扱う
    async fn booked_quantity_in_window(
        &self,
        equipment_id: EquipmentId,
        window: ReservationWindow,
    ) -> AppResult<i64> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
                SELECT COALESCE(SUM(equipment_quantity), 0)
                FROM reservations
                WHERE equipment_id = $1
                  AND status = 'confirmed'
                  AND COALESCE(pickup_date, start_time) < $3
                  AND $2 < COALESCE(return_date, end_time)
            "#,
        )
        .bind(equipment_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(total)
    }
}

// 設定行が無い場合は既定の営業時間（8〜22 時）にフォールバックする
async fn fetch_business_hours(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> AppResult<BusinessHours> {
    let row: Option<(i32, i32)> =
        sqlx::query_as(r#"SELECT min_hour, max_hour FROM reservation_settings LIMIT 1"#)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

    Ok(row
        .map(|(min_hour, max_hour)| BusinessHours {
            min_hour: min_hour as u32,
            max_hour: max_hour as u32,
        })
        .unwrap_or_default())
}

// 作成・更新した予約をリソース名称込みで読み直す（同一トランザクション内）
async fn fetch_enriched(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    reservation_id: ReservationId,
) -> AppResult<Reservation> {
    let row: ReservationRow = sqlx::query_as(
        r#"
            SELECT
                r.id, r.user_id, r.course_id, r.equipment_id, r.facility_id,
                r.start_time, r.end_time, r.status,
                r.pickup_date, r.return_date, r.equipment_quantity, r.reserved_at,
                c.name AS course_name,
                e.name AS equipment_name,
                f.name AS facility_name
            FROM reservations AS r
            LEFT JOIN courses AS c ON r.course_id = c.id
            LEFT JOIN equipment AS e ON r.equipment_id = e.id
            LEFT JOIN facilities AS f ON r.facility_id = f.id
            WHERE r.id = $1
        "#,
    )
    .bind(reservation_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    row.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        course::CourseRepositoryImpl, equipment::EquipmentRepositoryImpl,
        facility::FacilityRepositoryImpl,
    };
    use chrono::{TimeZone, Utc};
    use kernel::model::course::event::CreateCourse;
    use kernel::model::equipment::event::CreateEquipment;
    use kernel::model::facility::event::CreateFacility;
    use kernel::model::reservation::ReservationStatus;
    use kernel::repository::{
        course::CourseRepository, equipment::EquipmentRepository, facility::FacilityRepository,
    };

    async fn seed_user(pool: &sqlx::PgPool, email: &str) -> UserId {
        let user_id = UserId::new();
        sqlx::query(r#"INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, 'member')"#)
            .bind(user_id)
            .bind("Test User")
            .bind(email)
            .execute(pool)
            .await
            .unwrap();
        user_id
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> ReservationWindow {
        ReservationWindow::new(
            Utc.with_ymd_and_hms(2024, 7, 1, start.0, start.1, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 7, 1, end.0, end.1, 0).unwrap(),
        )
        .unwrap()
    }

    fn terrain(name: &str) -> CreateFacility {
        CreateFacility {
            name: name.into(),
            description: None,
            image_url: None,
            opening_hours: None,
            closing_hours: None,
            is_terrain: true,
        }
    }

    fn stock(name: &str, total_quantity: i32) -> CreateEquipment {
        CreateEquipment {
            name: name.into(),
            description: None,
            image_url: None,
            total_quantity,
            available_quantity: None,
            category: None,
            condition: None,
        }
    }

    fn course(name: &str, max_capacity: i32) -> CreateCourse {
        CreateCourse {
            name: name.into(),
            description: None,
            duration_minutes: 60,
            max_capacity,
            price: 10.0,
            facility_id: None,
            image_url: None,
            starts_on: None,
            starts_at: None,
            schedules: vec![],
            equipment: vec![],
        }
    }

    fn reserve_facility(
        user_id: UserId,
        facility_id: kernel::model::id::FacilityId,
        window: ReservationWindow,
    ) -> CreateReservation {
        CreateReservation::new(
            user_id,
            ReservationTarget::Facility(facility_id),
            window,
            None,
            None,
            Utc::now(),
        )
    }

    fn reserve_equipment(
        user_id: UserId,
        equipment_id: EquipmentId,
        quantity: i32,
        window: ReservationWindow,
    ) -> CreateReservation {
        CreateReservation::new(
            user_id,
            ReservationTarget::Equipment {
                equipment_id,
                quantity,
            },
            window,
            None,
            None,
            Utc::now(),
        )
    }

    fn reserve_course(
        user_id: UserId,
        course_id: CourseId,
        window: ReservationWindow,
    ) -> CreateReservation {
        CreateReservation::new(
            user_id,
            ReservationTarget::Course(course_id),
            window,
            None,
            None,
            Utc::now(),
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn facility_slot_is_exclusive_per_window(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let facility_repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;
        let facility = facility_repo.create(terrain("Court A")).await?;

        // [10:00, 11:00) を予約できる
        let first = repo
            .create(reserve_facility(alice, facility.id, window((10, 0), (11, 0))))
            .await?;
        assert_eq!(first.status, ReservationStatus::Confirmed);
        assert_eq!(first.facility_name.as_deref(), Some("Court A"));

        // 予約中は表示キャッシュも塞がる
        let f = facility_repo.find_by_id(facility.id).await?.unwrap();
        assert!(!f.is_available);

        // 重複する [10:30, 11:30) は拒否される
        let err = repo
            .create(reserve_facility(bob, facility.id, window((10, 30), (11, 30))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));

        // 端点が接するだけの [11:00, 12:00) は予約できる
        let adjacent = repo
            .create(reserve_facility(bob, facility.id, window((11, 0), (12, 0))))
            .await?;
        assert_eq!(adjacent.status, ReservationStatus::Confirmed);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn cancelling_releases_the_facility_slot(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let facility_repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let facility = facility_repo.create(terrain("Court B")).await?;

        let first = repo
            .create(reserve_facility(alice, facility.id, window((10, 0), (11, 0))))
            .await?;

        let cancelled = repo
            .cancel(CancelReservation::new(first.id, alice))
            .await?;
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        // キャンセル後は表示キャッシュが空きに戻り、同じ時間帯を再予約できる
        let f = facility_repo.find_by_id(facility.id).await?.unwrap();
        assert!(f.is_available);

        let again = repo
            .create(reserve_facility(alice, facility.id, window((10, 0), (11, 0))))
            .await?;
        assert_eq!(again.status, ReservationStatus::Confirmed);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn cache_stays_busy_while_other_windows_remain(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let facility_repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let facility = facility_repo.create(terrain("Court C")).await?;

        let morning = repo
            .create(reserve_facility(alice, facility.id, window((9, 0), (10, 0))))
            .await?;
        let _afternoon = repo
            .create(reserve_facility(alice, facility.id, window((14, 0), (15, 0))))
            .await?;

        // 片方をキャンセルしてもアクティブな予約が残る限り塞がったまま
        repo.cancel(CancelReservation::new(morning.id, alice)).await?;
        let f = facility_repo.find_by_id(facility.id).await?.unwrap();
        assert!(!f.is_available);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn equipment_stock_is_decremented_eagerly(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let equipment_repo = EquipmentRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let equipment = equipment_repo.create(stock("Racket", 3)).await?;
        assert_eq!(equipment.available_quantity, 3);

        // 2 点予約すると残り 1 点
        let first = repo
            .create(reserve_equipment(alice, equipment.id, 2, window((10, 0), (12, 0))))
            .await?;
        assert_eq!(first.equipment_quantity, 2);
        let e = equipment_repo.find_by_id(equipment.id).await?.unwrap();
        assert_eq!(e.available_quantity, 1);

        // 残り 1 点のところに 2 点要求は在庫不足
        let err = repo
            .create(reserve_equipment(alice, equipment.id, 2, window((10, 30), (12, 30))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));
        let e = equipment_repo.find_by_id(equipment.id).await?.unwrap();
        assert_eq!(e.available_quantity, 1);

        // 1 点なら予約できる
        repo.create(reserve_equipment(alice, equipment.id, 1, window((10, 30), (12, 30))))
            .await?;
        let e = equipment_repo.find_by_id(equipment.id).await?.unwrap();
        assert_eq!(e.available_quantity, 0);

        // キャンセルで消費した 2 点がそのまま戻る
        repo.cancel(CancelReservation::new(first.id, alice)).await?;
        let e = equipment_repo.find_by_id(equipment.id).await?.unwrap();
        assert_eq!(e.available_quantity, 2);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn booked_quantity_counts_only_overlapping_active(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let equipment_repo = EquipmentRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let equipment = equipment_repo.create(stock("Ball", 10)).await?;

        let overlapping = repo
            .create(reserve_equipment(alice, equipment.id, 3, window((10, 0), (12, 0))))
            .await?;
        repo.create(reserve_equipment(alice, equipment.id, 2, window((11, 0), (13, 0))))
            .await?;
        // 時間帯の離れた予約は合計に含まれない
        repo.create(reserve_equipment(alice, equipment.id, 4, window((15, 0), (16, 0))))
            .await?;

        let booked = repo
            .booked_quantity_in_window(equipment.id, window((11, 30), (11, 45)))
            .await?;
        assert_eq!(booked, 5);

        // キャンセル済みは合計から外れる
        repo.cancel(CancelReservation::new(overlapping.id, alice))
            .await?;
        let booked = repo
            .booked_quantity_in_window(equipment.id, window((11, 30), (11, 45)))
            .await?;
        assert_eq!(booked, 2);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn concurrent_requests_cannot_oversell_the_last_spot(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let course_repo = CourseRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;
        let created = course_repo.create(course("Yoga", 1), alice).await?;

        // 残席 1 のコースへ同時に 2 件の予約を投げる
        let (first, second) = tokio::join!(
            repo.create(reserve_course(alice, created.id, window((10, 0), (11, 0)))),
            repo.create(reserve_course(bob, created.id, window((10, 0), (11, 0)))),
        );

        // ちょうど 1 件だけ成功し、負けた側は在庫競合になる
        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let loser = if first.is_err() {
            first.unwrap_err()
        } else {
            second.unwrap_err()
        };
        assert!(matches!(loser, AppError::ResourceConflict(_)));

        // 残席は 0 で止まり、負の値にはならない
        let detail = course_repo.find_by_id(created.id).await?.unwrap();
        assert_eq!(detail.course.available_spots, 0);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn cancellation_is_not_idempotent(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let course_repo = CourseRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let created = course_repo.create(course("Pilates", 5), alice).await?;

        let reservation = repo
            .create(reserve_course(alice, created.id, window((10, 0), (11, 0))))
            .await?;

        repo.cancel(CancelReservation::new(reservation.id, alice))
            .await?;

        // 2 回目のキャンセルはエラー。席が二重に戻らないこと
        let err = repo
            .cancel(CancelReservation::new(reservation.id, alice))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyCancelled(_)));

        let detail = course_repo.find_by_id(created.id).await?.unwrap();
        assert_eq!(detail.course.available_spots, 5);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn only_the_owner_can_cancel(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let facility_repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;
        let facility = facility_repo.create(terrain("Court D")).await?;

        let reservation = repo
            .create(reserve_facility(alice, facility.id, window((10, 0), (11, 0))))
            .await?;

        let err = repo
            .cancel(CancelReservation::new(reservation.id, bob))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn out_of_hours_request_leaves_stock_untouched(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let equipment_repo = EquipmentRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let alice = seed_user(&pool, "alice@example.com").await;
        let equipment = equipment_repo.create(stock("Net", 3)).await?;

        // 営業時間（既定 8〜22 時）より前の時間帯は拒否される
        let err = repo
            .create(reserve_equipment(alice, equipment.id, 2, window((6, 0), (7, 0))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        // 在庫も台帳も一切動いていない
        let e = equipment_repo.find_by_id(equipment.id).await?.unwrap();
        assert_eq!(e.available_quantity, 3);
        assert!(repo.find_by_user_id(alice).await?.is_empty());

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn missing_facility_is_reported_as_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let alice = seed_user(&pool, "alice@example.com").await;

        let err = repo
            .create(reserve_facility(
                alice,
                kernel::model::id::FacilityId::new(),
                window((10, 0), (11, 0)),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));

        Ok(())
    }
}
