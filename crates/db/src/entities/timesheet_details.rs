//! `SeaORM` Entity for timesheet_details table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheet_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub timesheet: String,
    pub project: Option<String>,
    pub hours: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::timesheets::Entity",
        from = "Column::Timesheet",
        to = "super::timesheets::Column::Name"
    )]
    Timesheets,
}

impl Related<super::timesheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timesheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
