use crate::db::connect_with_config;
use crate::{customer, order};
use anyhow::Result;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use serde_json::json;

/// Fresh in-memory sqlite database with migrations applied.
async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[test]
fn customer_json_omits_absent_contact_fields() {
    let c = customer::Model { id: 1, name: "Alice".into(), email: None, phone: None };
    assert_eq!(serde_json::to_value(&c).unwrap(), json!({"id": 1, "name": "Alice"}));
}

#[test]
fn customer_json_without_id_deserializes_as_unsaved() {
    let c: customer::Model = serde_json::from_value(json!({"name": "Alice", "email": "a@example.com"})).unwrap();
    assert_eq!(c.id, 0);
    assert_eq!(c.email.as_deref(), Some("a@example.com"));
    assert_eq!(c.phone, None);
}

#[test]
fn order_json_uses_camel_case() {
    let o = order::Model { id: 3, customer_id: 7, product: "widget".into(), quantity: 2 };
    assert_eq!(
        serde_json::to_value(&o).unwrap(),
        json!({"id": 3, "customerId": 7, "product": "widget", "quantity": 2})
    );
    let back: order::Model = serde_json::from_value(json!({"customerId": 7, "product": "widget"})).unwrap();
    assert_eq!(back.customer_id, 7);
    assert_eq!(back.quantity, 0);
}

#[tokio::test]
async fn customer_insert_assigns_increasing_ids() -> Result<()> {
    let db = setup_test_db().await?;

    let first = customer::ActiveModel { id: NotSet, name: Set("Alice".into()), email: Set(None), phone: Set(None) }
        .insert(&db)
        .await?;
    let second = customer::ActiveModel {
        id: NotSet,
        name: Set("Bob".into()),
        email: Set(Some("bob@example.com".into())),
        phone: Set(None),
    }
    .insert(&db)
    .await?;

    assert!(first.id > 0);
    assert!(second.id > first.id);
    let found = customer::Entity::find_by_id(second.id).one(&db).await?;
    assert_eq!(found, Some(second));
    Ok(())
}

#[tokio::test]
async fn order_accepts_unknown_customer_and_survives_customer_delete() -> Result<()> {
    let db = setup_test_db().await?;

    let c = customer::ActiveModel { id: NotSet, name: Set("Carol".into()), email: Set(None), phone: Set(None) }
        .insert(&db)
        .await?;
    let o = order::ActiveModel { id: NotSet, customer_id: Set(c.id), product: Set("lamp".into()), quantity: Set(1) }
        .insert(&db)
        .await?;
    let orphan = order::ActiveModel { id: NotSet, customer_id: Set(999_999), product: Set("desk".into()), quantity: Set(-3) }
        .insert(&db)
        .await?;
    assert_eq!(orphan.customer_id, 999_999);

    customer::Entity::delete_by_id(c.id).exec(&db).await?;
    assert!(customer::Entity::find_by_id(c.id).one(&db).await?.is_none());
    assert_eq!(order::Entity::find_by_id(o.id).one(&db).await?, Some(o));
    Ok(())
}

#[tokio::test]
async fn sqlite_memory_pool_never_recycles_its_connection() -> Result<()> {
    let db = setup_test_db().await?;
    let pool_opts = db.get_sqlite_connection_pool().options();
    assert_eq!(pool_opts.get_max_connections(), 1);
    assert_eq!(pool_opts.get_max_lifetime(), None);
    assert_eq!(pool_opts.get_idle_timeout(), None);
    Ok(())
}

#[test]
fn file_backed_urls_keep_configured_pool_timeouts() {
    let cfg = DatabaseConfig { url: "sqlite://./shop.db".into(), ..Default::default() };
    let opts = crate::db::connect_options(&cfg);
    assert_eq!(opts.get_max_connections(), Some(10));
    assert_eq!(opts.get_max_lifetime(), Some(std::time::Duration::from_secs(3600)));
    assert_eq!(opts.get_idle_timeout(), Some(std::time::Duration::from_secs(600)));
}
