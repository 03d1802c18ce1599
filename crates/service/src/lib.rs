//! Service layer providing CRUD operations for customers and orders.
//! - `repository` holds the generic persistence trait and its in-memory implementation.
//! - `customer` / `order` pair a sea-orm repository with a thin service façade.

pub mod errors;
pub mod repository;
pub mod customer;
pub mod order;
#[cfg(test)]
pub mod test_support;

pub use customer::CustomerService;
pub use order::OrderService;
pub use repository::Repository;
