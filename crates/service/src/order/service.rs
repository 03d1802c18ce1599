use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::order::Order;

use crate::errors::ServiceError;
use crate::repository::Repository;

/// Application service for orders. `customer_id` is stored as given and never
/// checked against the customer table.
pub struct OrderService {
    repo: Arc<dyn Repository<Order>>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn Repository<Order>>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ServiceError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: i64) -> Result<Option<Order>, ServiceError> {
        let found = self.repo.find_by_id(id).await?;
        if found.is_none() {
            debug!(id, "order_lookup_miss");
        }
        Ok(found)
    }

    #[instrument(skip(self, order), fields(customer_id = order.customer_id))]
    pub async fn create_order(&self, mut order: Order) -> Result<Order, ServiceError> {
        order.id = 0;
        let saved = self.repo.save(order).await?;
        info!(id = saved.id, "order_created");
        Ok(saved)
    }

    #[instrument(skip(self, order))]
    pub async fn update_order(&self, id: i64, mut order: Order) -> Result<Order, ServiceError> {
        order.id = id;
        self.repo.save(order).await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: i64) -> Result<(), ServiceError> {
        let removed = self.repo.delete_by_id(id).await?;
        debug!(id, removed, "order_delete");
        Ok(())
    }
}
