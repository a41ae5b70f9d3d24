//! `SeaORM` Entity for items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub item_name: String,
    /// Labor ("pose") classification; `NULL` counts as not labor.
    pub is_labor: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_order_items::Entity")]
    SalesOrderItems,
    #[sea_orm(has_many = "super::packed_items::Entity")]
    PackedItems,
}

impl Related<super::sales_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrderItems.def()
    }
}

impl Related<super::packed_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackedItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
