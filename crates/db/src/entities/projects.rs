//! `SeaORM` Entity for projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProjectStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub status: ProjectStatus,
    pub company: Option<String>,
    pub cost_center: Option<String>,
    pub project_type: Option<String>,
    pub insurance: Option<String>,
    pub sector: Option<String>,
    pub project_manager: Option<String>,
    pub expected_end_date: Option<Date>,
    pub total_costing_amount: Option<Decimal>,
    pub total_consumed_material_cost: Option<Decimal>,
    pub total_expense_claim: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_orders::Entity")]
    SalesOrders,
    #[sea_orm(has_many = "super::manufacturing_records::Entity")]
    ManufacturingRecords,
}

impl Related<super::sales_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrders.def()
    }
}

impl Related<super::manufacturing_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManufacturingRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
