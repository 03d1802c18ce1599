use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use models::customer::{self, Customer};

use crate::errors::ServiceError;
use crate::repository::{sync_id_sequence, Repository};

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl Repository<Customer> for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        customer::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, record: Customer) -> Result<Customer, ServiceError> {
        if record.id == 0 {
            let am = customer::ActiveModel {
                id: NotSet,
                name: Set(record.name),
                email: Set(record.email),
                phone: Set(record.phone),
            };
            return am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()));
        }

        let am = customer::ActiveModel {
            id: Set(record.id),
            name: Set(record.name),
            email: Set(record.email),
            phone: Set(record.phone),
        };
        let saved = customer::Entity::insert(am)
            .on_conflict(
                OnConflict::column(customer::Column::Id)
                    .update_columns([customer::Column::Name, customer::Column::Email, customer::Column::Phone])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        sync_id_sequence(&self.db, "customer").await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
