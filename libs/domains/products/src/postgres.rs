use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Product, ProductInput, next_updated_at},
    repository::ProductRepository,
};

/// PostgreSQL-backed ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, input: ProductInput) -> ProductResult<Product> {
        let now = Utc::now();
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let previous = model.updated_at.with_timezone(&Utc);
        let mut active_model = model.into_active_model();
        active_model.name = Set(input.name);
        active_model.description = Set(input.description);
        active_model.price = Set(input.price);
        active_model.stock = Set(input.stock);
        active_model.updated_at = Set(next_updated_at(previous, Utc::now()).into());

        // Row deleted between the read and the write
        let updated = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => ProductError::Database(other),
        })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
