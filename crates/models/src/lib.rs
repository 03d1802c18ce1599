//! sea-orm entities for customers and orders, plus connection helpers.

pub mod db;
pub mod customer;
pub mod order;

#[cfg(test)]
mod tests;
