//! `SeaORM` Entity for sales_orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub project: String,
    /// 0 = draft, 1 = submitted, 2 = cancelled.
    pub docstatus: i16,
    pub exclude_from_statistics: bool,
    pub labour_hours: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::Project",
        to = "super::projects::Column::Name"
    )]
    Projects,
    #[sea_orm(has_many = "super::sales_order_items::Entity")]
    SalesOrderItems,
    #[sea_orm(has_many = "super::packed_items::Entity")]
    PackedItems,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
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
