use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An order line. `customer_id` is an unchecked reference: nothing verifies
/// that the customer exists, and deleting a customer leaves its orders alone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub type Order = Model;
