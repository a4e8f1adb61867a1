use crate::database::{
    model::course::{CourseEquipmentRow, CourseRow, CourseScheduleRow},
    ConnectionPool,
};
use crate::repository::refresh_facility_availability;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use derive_new::new;
use kernel::model::course::{
    event::{CreateCourse, DeleteCourse},
    Course, CourseDetail,
};
use kernel::model::id::{CourseId, FacilityId, ReservationId, UserId};
use kernel::repository::course::CourseRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct CourseRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CourseRepository for CourseRepositoryImpl {
    // コース登録操作を行う
    //
    // コース本体・週間スケジュール・必要機材の引き当て・開催施設の自動予約を
    // すべて 1 トランザクションで行う。途中で機材不足や施設の時間帯重複が
    // 見つかれば全体をロールバックする
    async fn create(&self, event: CreateCourse, registered_by: UserId) -> AppResult<Course> {
        let mut tx = self.db.begin().await?;

        // ① 開催施設が指定されていれば、テラン施設であることを確認する
        if let Some(facility_id) = event.facility_id {
            let facility = sqlx::query_as::<_, (bool,)>(
                r#"SELECT is_terrain FROM facilities WHERE id = $1 FOR UPDATE"#,
            )
            .bind(facility_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            match facility {
                None => {
                    return Err(AppError::EntityNotFound(format!(
                        "施設（{facility_id}）が見つかりませんでした。"
                    )))
                }
                Some((false,)) => {
                    return Err(AppError::UnprocessableEntity(
                        "コースの開催場所にはテラン施設を指定してください。".into(),
                    ))
                }
                Some((true,)) => {}
            }
        }

        // ② コース本体を登録する。残席数は定員で初期化する
        let course_id = CourseId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO courses
                (id, name, description, duration_minutes, max_capacity, available_spots,
                 price, facility_id, image_url, starts_on, starts_at)
                VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(course_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.duration_minutes)
        .bind(event.max_capacity)
        .bind(event.price)
        .bind(event.facility_id)
        .bind(&event.image_url)
        .bind(event.starts_on)
        .bind(event.starts_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No course record has been created".into(),
            ));
        }

        // ③ 週間スケジュールを登録する
        for schedule in &event.schedules {
            sqlx::query(
                r#"
                    INSERT INTO course_schedules (id, course_id, day_of_week, start_time, end_time)
                    VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(course_id)
            .bind(schedule.day_of_week)
            .bind(schedule.start_time)
            .bind(schedule.end_time)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        // ④ 必要機材を在庫から引き当てる。
        //    在庫確認と引き落としを 1 文で行い、足りなければ 0 行更新になる
        for link in &event.equipment {
            let res = sqlx::query(
                r#"
                    UPDATE equipment
                    SET available_quantity = available_quantity - $1
                    WHERE id = $2 AND available_quantity >= $1
                "#,
            )
            .bind(link.quantity)
            .bind(link.equipment_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                let exists = sqlx::query_as::<_, (i32,)>(
                    r#"SELECT available_quantity FROM equipment WHERE id = $1"#,
                )
                .bind(link.equipment_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                return Err(match exists {
                    None => AppError::EntityNotFound(format!(
                        "機材（{}）が見つかりませんでした。",
                        link.equipment_id
                    )),
                    Some((available,)) => AppError::ResourceConflict(format!(
                        "機材（{}）の在庫が不足しています（残り {available} 点、要求 {} 点）。",
                        link.equipment_id, link.quantity
                    )),
                });
            }

            sqlx::query(
                r#"
                    INSERT INTO course_equipment (id, course_id, equipment_id, quantity)
                    VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(course_id)
            .bind(link.equipment_id)
            .bind(link.quantity)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        // ⑤ 初回開催日時が決まっていれば施設を自動予約する。
        //    通常の施設予約と同じ重複チェックを通す（バイパスしない）
        if let (Some(facility_id), Some(starts_on), Some(starts_at)) =
            (event.facility_id, event.starts_on, event.starts_at)
        {
            let start = Utc.from_utc_datetime(&starts_on.and_time(starts_at));
            let end = start + Duration::minutes(event.duration_minutes.into());

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
            .bind(start)
            .bind(end)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if overlap.is_some() {
                return Err(AppError::ResourceConflict(format!(
                    "施設（{facility_id}）は開催予定の時間帯にすでに予約が存在します。"
                )));
            }

            sqlx::query(
                r#"
                    INSERT INTO reservations
                    (id, user_id, course_id, facility_id, start_time, end_time, status)
                    VALUES ($1, $2, $3, $4, $5, $6, 'confirmed')
                "#,
            )
            .bind(ReservationId::new())
            .bind(registered_by)
            .bind(course_id)
            .bind(facility_id)
            .bind(start)
            .bind(end)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            refresh_facility_availability(&mut tx, facility_id).await?;
        }

        let course = fetch_course(&mut tx, course_id).await?.ok_or_else(|| {
            AppError::NoRowsAffectedError("No course record has been created".into())
        })?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(course)
    }

    // すべてのコースを取得する
    async fn find_all(&self) -> AppResult<Vec<Course>> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
                SELECT
                    c.id, c.name, c.description, c.duration_minutes,
                    c.max_capacity, c.available_spots, c.price,
                    c.facility_id, c.image_url, c.starts_on, c.starts_at, c.created_at,
                    f.name AS facility_name,
                    f.is_terrain AS is_terrain
                FROM courses AS c
                LEFT JOIN facilities AS f ON c.facility_id = f.id
                ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    // コースの詳細（スケジュール・必要機材込み）を取得する
    async fn find_by_id(&self, course_id: CourseId) -> AppResult<Option<CourseDetail>> {
        let row: Option<CourseRow> = sqlx::query_as(
            r#"
                SELECT
                    c.id, c.name, c.description, c.duration_minutes,
                    c.max_capacity, c.available_spots, c.price,
                    c.facility_id, c.image_url, c.starts_on, c.starts_at, c.created_at,
                    f.name AS facility_name,
                    f.is_terrain AS is_terrain
                FROM courses AS c
                LEFT JOIN facilities AS f ON c.facility_id = f.id
                WHERE c.id = $1
            "#,
        )
        .bind(course_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let schedules: Vec<CourseScheduleRow> = sqlx::query_as(
            r#"
                SELECT day_of_week, start_time, end_time
                FROM course_schedules
                WHERE course_id = $1
                ORDER BY day_of_week, start_time
            "#,
        )
        .bind(course_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let equipment: Vec<CourseEquipmentRow> = sqlx::query_as(
            r#"
                SELECT ce.equipment_id, e.name AS equipment_name, ce.quantity
                FROM course_equipment AS ce
                INNER JOIN equipment AS e ON ce.equipment_id = e.id
                WHERE ce.course_id = $1
            "#,
        )
        .bind(course_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Some(CourseDetail {
            course: row.into(),
            schedules: schedules.into_iter().map(Into::into).collect(),
            equipment: equipment.into_iter().map(Into::into).collect(),
        }))
    }

    // コース削除操作を行う
    //
    // 参加予約と施設の自動予約をキャンセルし、引き当てていた機材在庫を
    // 復元してから本体を削除する。スケジュールと機材リンクは外部キーで連鎖削除
    async fn delete(&self, event: DeleteCourse) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // ① コースの存在確認（行ロック）
        let course = sqlx::query_as::<_, (Option<FacilityId>,)>(
            r#"SELECT facility_id FROM courses WHERE id = $1 FOR UPDATE"#,
        )
        .bind(event.course_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((facility_id,)) = course else {
            return Err(AppError::EntityNotFound(format!(
                "コース（{}）が見つかりませんでした。",
                event.course_id
            )));
        };

        // ② アクティブな参加予約と施設の自動予約をまとめてキャンセルする
        sqlx::query(
            r#"UPDATE reservations SET status = 'cancelled' WHERE course_id = $1 AND status = 'confirmed'"#,
        )
        .bind(event.course_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // ③ 引き当てていた機材在庫を復元する
        sqlx::query(
            r#"
                UPDATE equipment AS e
                SET available_quantity = e.available_quantity + ce.quantity
                FROM course_equipment AS ce
                WHERE ce.course_id = $1 AND ce.equipment_id = e.id
            "#,
        )
        .bind(event.course_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // ④ 本体を削除する
        let res = sqlx::query(r#"DELETE FROM courses WHERE id = $1"#)
            .bind(event.course_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No course record has been deleted".into(),
            ));
        }

        if let Some(facility_id) = facility_id {
            refresh_facility_availability(&mut tx, facility_id).await?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

async fn fetch_course(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    course_id: CourseId,
) -> AppResult<Option<Course>> {
    let row: Option<CourseRow> = sqlx::query_as(
        r#"
            SELECT
                c.id, c.name, c.description, c.duration_minutes,
                c.max_capacity, c.available_spots, c.price,
                c.facility_id, c.image_url, c.starts_on, c.starts_at, c.created_at,
                f.name AS facility_name,
                f.is_terrain AS is_terrain
            FROM courses AS c
            LEFT JOIN facilities AS f ON c.facility_id = f.id
            WHERE c.id = $1
        "#,
    )
    .bind(course_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(row.map(Course::from))
}
