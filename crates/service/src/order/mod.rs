//! Order repository and service.

pub mod repository;
pub mod service;

pub use repository::SeaOrmOrderRepository;
pub use service::OrderService;
