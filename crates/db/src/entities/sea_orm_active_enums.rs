//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use vt_core::margin::ProjectStatus as CoreProjectStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl From<ProjectStatus> for CoreProjectStatus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Open => Self::Open,
            ProjectStatus::Completed => Self::Completed,
            ProjectStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<CoreProjectStatus> for ProjectStatus {
    fn from(status: CoreProjectStatus) -> Self {
        match status {
            CoreProjectStatus::Open => Self::Open,
            CoreProjectStatus::Completed => Self::Completed,
            CoreProjectStatus::Cancelled => Self::Cancelled,
        }
    }
}
