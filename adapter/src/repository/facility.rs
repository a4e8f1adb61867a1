use crate::database::{model::facility::FacilityRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::facility::{event::CreateFacility, Facility};
use kernel::model::id::FacilityId;
use kernel::repository::facility::FacilityRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct FacilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FacilityRepository for FacilityRepositoryImpl {
    // 施設登録操作を行う
    async fn create(&self, event: CreateFacility) -> AppResult<Facility> {
        let row: FacilityRow = sqlx::query_as(
            r#"
                INSERT INTO facilities
                (id, name, description, image_url, opening_hours, closing_hours, is_terrain)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, name, description, image_url, opening_hours, closing_hours,
                          is_available, is_terrain, created_at
            "#,
        )
        .bind(FacilityId::new())
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(&event.opening_hours)
        .bind(&event.closing_hours)
        .bind(event.is_terrain)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.into())
    }

    // すべての施設を取得する
    async fn find_all(&self) -> AppResult<Vec<Facility>> {
        let rows: Vec<FacilityRow> = sqlx::query_as(
            r#"
                SELECT id, name, description, image_url, opening_hours, closing_hours,
                       is_available, is_terrain, created_at
                FROM facilities
                ORDER BY name
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Facility::from).collect())
    }

    // テラン（屋外グラウンド）に限定して取得する
    async fn find_terrains(&self) -> AppResult<Vec<Facility>> {
        let rows: Vec<FacilityRow> = sqlx::query_as(
            r#"
                SELECT id, name, description, image_url, opening_hours, closing_hours,
                       is_available, is_terrain, created_at
                FROM facilities
                WHERE is_terrain = TRUE
                ORDER BY name
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Facility::from).collect())
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        let row: Option<FacilityRow> = sqlx::query_as(
            r#"
                SELECT id, name, description, image_url, opening_hours, closing_hours,
                       is_available, is_terrain, created_at
                FROM facilities
                WHERE id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Facility::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, is_terrain: bool) -> CreateFacility {
        CreateFacility {
            name: name.into(),
            description: None,
            image_url: None,
            opening_hours: Some("08:00".into()),
            closing_hours: Some("22:00".into()),
            is_terrain,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn new_facility_starts_available(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(event("Gymnase", false)).await?;
        assert!(created.is_available);

        let found = repo.find_by_id(created.id).await?.unwrap();
        assert_eq!(found.name, "Gymnase");

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn find_terrains_filters_indoor_facilities(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(event("Gymnase", false)).await?;
        repo.create(event("Terrain A", true)).await?;
        repo.create(event("Terrain B", true)).await?;

        let terrains = repo.find_terrains().await?;
        assert_eq!(terrains.len(), 2);
        assert!(terrains.iter().all(|f| f.is_terrain));

        assert_eq!(repo.find_all().await?.len(), 3);

        Ok(())
    }
}
