//! `SeaORM` Entity for timesheets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub employee: Option<String>,
    pub docstatus: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timesheet_details::Entity")]
    TimesheetDetails,
}

impl Related<super::timesheet_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimesheetDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
