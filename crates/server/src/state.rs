use std::sync::Arc;

use models::{customer::Customer, order::Order};
use sea_orm::DatabaseConnection;
use service::customer::{CustomerService, SeaOrmCustomerRepository};
use service::order::{OrderService, SeaOrmOrderRepository};
use service::repository::memory::InMemoryRepository;

/// Shared handler state: one service per entity.
#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<CustomerService>,
    pub orders: Arc<OrderService>,
}

impl ServerState {
    pub fn new(customers: CustomerService, orders: OrderService) -> Self {
        Self { customers: Arc::new(customers), orders: Arc::new(orders) }
    }

    /// Services backed by sea-orm repositories sharing one connection pool.
    pub fn with_database(db: DatabaseConnection) -> Self {
        let customers = CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db.clone())));
        let orders = OrderService::new(Arc::new(SeaOrmOrderRepository::new(db)));
        Self::new(customers, orders)
    }

    /// Services backed by process-local maps; contents are lost on exit.
    pub fn in_memory() -> Self {
        let customers = CustomerService::new(Arc::new(InMemoryRepository::<Customer>::new()));
        let orders = OrderService::new(Arc::new(InMemoryRepository::<Order>::new()));
        Self::new(customers, orders)
    }
}
