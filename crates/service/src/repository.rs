use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::errors::ServiceError;

/// Generic persistence interface, one implementation per entity and store.
///
/// `save` follows insert-or-update semantics: a record whose id is 0 is
/// inserted and receives a store-assigned id, any other id is written in
/// place, creating the row if it does not exist yet.
#[async_trait]
pub trait Repository<T, Id = i64>: Send + Sync
where
    T: Send + 'static,
    Id: Send + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, ServiceError>;
    async fn find_by_id(&self, id: Id) -> Result<Option<T>, ServiceError>;
    async fn save(&self, record: T) -> Result<T, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: Id) -> Result<bool, ServiceError>;
}

/// Records carrying a surrogate `i64` identity.
pub trait Identified {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

impl Identified for models::customer::Model {
    fn id(&self) -> i64 { self.id }
    fn set_id(&mut self, id: i64) { self.id = id; }
}

impl Identified for models::order::Model {
    fn id(&self) -> i64 { self.id }
    fn set_id(&mut self, id: i64) { self.id = id; }
}

/// Move a Postgres identity sequence past the largest id in `table`.
///
/// Upserts write explicit ids, which Postgres does not feed back into the
/// sequence; other backends track this themselves.
pub(crate) async fn sync_id_sequence(db: &DatabaseConnection, table: &str) -> Result<(), ServiceError> {
    if db.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('\"{table}\"', 'id'), GREATEST((SELECT MAX(id) FROM \"{table}\"), 1))"
    );
    db.execute(Statement::from_string(DatabaseBackend::Postgres, sql))
        .await
        .map_err(ServiceError::db)?;
    Ok(())
}

/// In-memory repository for tests and database-less runs.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, PoisonError};

    struct Table<T> {
        rows: BTreeMap<i64, T>,
        next_id: i64,
    }

    /// Ids are assigned monotonically from 1; rows list in ascending id order.
    pub struct InMemoryRepository<T> {
        table: Mutex<Table<T>>,
    }

    impl<T> Default for InMemoryRepository<T> {
        fn default() -> Self {
            Self { table: Mutex::new(Table { rows: BTreeMap::new(), next_id: 1 }) }
        }
    }

    impl<T> InMemoryRepository<T> {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl<T> Repository<T> for InMemoryRepository<T>
    where
        T: Identified + Clone + Send + Sync + 'static,
    {
        async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
            let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(table.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<T>, ServiceError> {
            let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(table.rows.get(&id).cloned())
        }

        async fn save(&self, mut record: T) -> Result<T, ServiceError> {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            let id = if record.id() == 0 { table.next_id } else { record.id() };
            table.next_id = table.next_id.max(id.saturating_add(1));
            record.set_id(id);
            table.rows.insert(id, record.clone());
            Ok(record)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(table.rows.remove(&id).is_some())
        }
    }

}
