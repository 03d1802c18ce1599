use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::customer::Customer;

use crate::errors::ServiceError;
use crate::repository::Repository;

/// Application service for customers. Every operation maps straight onto the repository.
pub struct CustomerService {
    repo: Arc<dyn Repository<Customer>>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn Repository<Customer>>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        self.repo.find_all().await
    }

    /// `None` when no customer has this id.
    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        let found = self.repo.find_by_id(id).await?;
        if found.is_none() {
            debug!(id, "customer_lookup_miss");
        }
        Ok(found)
    }

    /// Persist a new customer; any id carried by the input is discarded.
    #[instrument(skip(self, customer))]
    pub async fn create_customer(&self, mut customer: Customer) -> Result<Customer, ServiceError> {
        customer.id = 0;
        let saved = self.repo.save(customer).await?;
        info!(id = saved.id, "customer_created");
        Ok(saved)
    }

    /// Full replacement of the record at `id`, creating it if absent.
    #[instrument(skip(self, customer))]
    pub async fn update_customer(&self, id: i64, mut customer: Customer) -> Result<Customer, ServiceError> {
        customer.id = id;
        self.repo.save(customer).await
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i64) -> Result<(), ServiceError> {
        let removed = self.repo.delete_by_id(id).await?;
        debug!(id, removed, "customer_delete");
        Ok(())
    }
}
