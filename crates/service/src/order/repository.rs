use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use models::order::{self, Order};

use crate::errors::ServiceError;
use crate::repository::{sync_id_sequence, Repository};

/// SeaORM-backed repository implementation.
pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl Repository<Order> for SeaOrmOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, ServiceError> {
        order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, ServiceError> {
        order::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, record: Order) -> Result<Order, ServiceError> {
        if record.id == 0 {
            let am = order::ActiveModel {
                id: NotSet,
                customer_id: Set(record.customer_id),
                product: Set(record.product),
                quantity: Set(record.quantity),
            };
            return am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()));
        }

        let am = order::ActiveModel {
            id: Set(record.id),
            customer_id: Set(record.customer_id),
            product: Set(record.product),
            quantity: Set(record.quantity),
        };
        let saved = order::Entity::insert(am)
            .on_conflict(
                OnConflict::column(order::Column::Id)
                    .update_columns([order::Column::CustomerId, order::Column::Product, order::Column::Quantity])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        sync_id_sequence(&self.db, "orders").await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = order::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
