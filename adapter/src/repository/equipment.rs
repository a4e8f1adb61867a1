use crate::database::{model::equipment::EquipmentRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::equipment::{event::CreateEquipment, Equipment};
use kernel::model::id::EquipmentId;
use kernel::repository::equipment::EquipmentRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct EquipmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EquipmentRepository for EquipmentRepositoryImpl {
    // 機材登録操作を行う
    async fn create(&self, event: CreateEquipment) -> AppResult<Equipment> {
        let initial = event.available_quantity.unwrap_or(event.total_quantity);
        if initial > event.total_quantity {
            return Err(AppError::UnprocessableEntity(
                "利用可能数は総数を超えられません。".into(),
            ));
        }

        let equipment_id = EquipmentId::new();
        let row: EquipmentRow = sqlx::query_as(
            r#"
                INSERT INTO equipment
                (id, name, description, image_url, total_quantity, available_quantity,
                 category, condition)
                VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'Bon'))
                RETURNING id, name, description, image_url, total_quantity,
                          available_quantity, category, condition, created_at
            "#,
        )
        .bind(equipment_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.total_quantity)
        .bind(initial)
        .bind(&event.category)
        .bind(&event.condition)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.into())
    }

    // すべての機材を取得する
    async fn find_all(&self) -> AppResult<Vec<Equipment>> {
        let rows: Vec<EquipmentRow> = sqlx::query_as(
            r#"
                SELECT id, name, description, image_url, total_quantity,
                       available_quantity, category, condition, created_at
                FROM equipment
                ORDER BY name
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    // 在庫の残っている機材のみ取得する
    async fn find_available(&self) -> AppResult<Vec<Equipment>> {
        let rows: Vec<EquipmentRow> = sqlx::query_as(
            r#"
                SELECT id, name, description, image_url, total_quantity,
                       available_quantity, category, condition, created_at
                FROM equipment
                WHERE available_quantity > 0
                ORDER BY name
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>> {
        let row: Option<EquipmentRow> = sqlx::query_as(
            r#"
                SELECT id, name, description, image_url, total_quantity,
                       available_quantity, category, condition, created_at
                FROM equipment
                WHERE id = $1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Equipment::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, total: i32, available: Option<i32>) -> CreateEquipment {
        CreateEquipment {
            name: name.into(),
            description: None,
            image_url: None,
            total_quantity: total,
            available_quantity: available,
            category: Some("sport".into()),
            condition: None,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn available_defaults_to_total(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EquipmentRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(event("Racket", 5, None)).await?;
        assert_eq!(created.available_quantity, 5);
        assert_eq!(created.condition, "Bon");

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn available_cannot_exceed_total(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EquipmentRepositoryImpl::new(ConnectionPool::new(pool));

        let err = repo.create(event("Ball", 3, Some(5))).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn find_available_excludes_exhausted_stock(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EquipmentRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(event("Net", 2, None)).await?;
        repo.create(event("Whistle", 4, Some(0))).await?;

        let available = repo.find_available().await?;
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Net");

        assert_eq!(repo.find_all().await?.len(), 2);

        Ok(())
    }
}
