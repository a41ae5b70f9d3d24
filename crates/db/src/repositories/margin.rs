//! Margin repository for the aggregate queries behind project margins.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, RelationTrait, Select,
};
use tracing::debug;
use vt_core::margin::{
    AnalysisAxis, DocStatus, LineSet, MarginError, MarginRepository, ProjectCostFields,
    TheoreticalTotals,
};
use vt_core::reports::{ProjectFilter, ProjectSummary};
use vt_shared::types::ProjectKey;

use crate::entities::{
    items, manufacturing_records, packed_items, projects, purchase_order_items, purchase_orders,
    sales_order_items, sales_orders, sea_orm_active_enums::ProjectStatus, timesheet_details,
    timesheets,
};

/// Error types for margin repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for MarginError {
    fn from(err: RepositoryError) -> Self {
        Self::repository(err)
    }
}

/// `SeaORM` implementation of [`MarginRepository`].
#[derive(Debug, Clone)]
pub struct SeaMarginRepository {
    db: DatabaseConnection,
}

impl SeaMarginRepository {
    /// Creates a new margin repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Restricts a query joined with `items` to one axis; `None` for Global.
    fn axis_condition(axis: AnalysisAxis) -> Option<Condition> {
        match axis {
            AnalysisAxis::Labor => Some(Condition::all().add(items::Column::IsLabor.eq(true))),
            AnalysisAxis::Purchases => Some(
                Condition::any()
                    .add(items::Column::IsLabor.eq(false))
                    .add(items::Column::IsLabor.is_null()),
            ),
            AnalysisAxis::Global => None,
        }
    }

    /// Sales orders that count for statistics.
    fn counted_orders<E: EntityTrait>(query: Select<E>, project: &ProjectKey) -> Select<E> {
        query
            .filter(sales_orders::Column::Project.eq(project.as_str()))
            .filter(sales_orders::Column::Docstatus.eq(DocStatus::Submitted.code()))
            .filter(sales_orders::Column::ExcludeFromStatistics.eq(false))
    }

    async fn regular_line_totals(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
    ) -> Result<TheoreticalTotals, RepositoryError> {
        let query = sales_order_items::Entity::find()
            .select_only()
            .column_as(Expr::cust("SUM(sales_order_items.amount)"), "sale")
            .column_as(
                Expr::cust(
                    "SUM(sales_order_items.qty * COALESCE(sales_order_items.unit_cost_price, 0))",
                ),
                "cost",
            )
            .join(
                JoinType::InnerJoin,
                sales_order_items::Relation::SalesOrders.def(),
            )
            .join(JoinType::InnerJoin, sales_order_items::Relation::Items.def())
            .filter(
                Condition::any()
                    .add(sales_order_items::Column::ProductBundleName.is_null())
                    .add(sales_order_items::Column::ProductBundleName.eq("")),
            )
            .apply_if(Self::axis_condition(axis), |q, condition| q.filter(condition));

        let row: Option<(Option<Decimal>, Option<Decimal>)> = Self::counted_orders(query, project)
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(row.map_or(TheoreticalTotals::ZERO, |(sale, cost)| {
            TheoreticalTotals::from_nullable(sale, cost)
        }))
    }

    async fn bundle_component_totals(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
    ) -> Result<TheoreticalTotals, RepositoryError> {
        let query = packed_items::Entity::find()
            .select_only()
            .column_as(Expr::cust("SUM(packed_items.qty * packed_items.rate)"), "sale")
            .column_as(
                Expr::cust("SUM(packed_items.qty * COALESCE(packed_items.unit_cost_price, 0))"),
                "cost",
            )
            .join(JoinType::InnerJoin, packed_items::Relation::SalesOrders.def())
            .join(JoinType::InnerJoin, packed_items::Relation::Items.def())
            .apply_if(Self::axis_condition(axis), |q, condition| q.filter(condition));

        let row: Option<(Option<Decimal>, Option<Decimal>)> = Self::counted_orders(query, project)
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(row.map_or(TheoreticalTotals::ZERO, |(sale, cost)| {
            TheoreticalTotals::from_nullable(sale, cost)
        }))
    }

    async fn fetch_cost_fields(
        &self,
        project: &ProjectKey,
    ) -> Result<ProjectCostFields, RepositoryError> {
        let model = projects::Entity::find_by_id(project.as_str())
            .one(&self.db)
            .await?;

        Ok(model.map_or_else(ProjectCostFields::default, |p| ProjectCostFields {
            total_costing_amount: p.total_costing_amount.unwrap_or_default(),
            total_consumed_material_cost: p.total_consumed_material_cost.unwrap_or_default(),
            total_expense_claim: p.total_expense_claim.unwrap_or_default(),
        }))
    }

    async fn sum_purchase_orders(&self, project: &ProjectKey) -> Result<Decimal, RepositoryError> {
        let total: Option<Option<Decimal>> = purchase_order_items::Entity::find()
            .select_only()
            .column_as(Expr::cust("SUM(purchase_order_items.amount)"), "total")
            .join(
                JoinType::InnerJoin,
                purchase_order_items::Relation::PurchaseOrders.def(),
            )
            .filter(purchase_order_items::Column::Project.eq(project.as_str()))
            .filter(purchase_orders::Column::Docstatus.lt(DocStatus::Cancelled.code()))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or_default())
    }

    async fn sum_manufacturing(&self, project: &ProjectKey) -> Result<Decimal, RepositoryError> {
        let total: Option<Option<Decimal>> = manufacturing_records::Entity::find()
            .select_only()
            .column_as(
                Expr::cust("SUM(manufacturing_records.manufacturing_cost)"),
                "total",
            )
            .filter(manufacturing_records::Column::Project.eq(project.as_str()))
            .filter(manufacturing_records::Column::Docstatus.lt(DocStatus::Cancelled.code()))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or_default())
    }

    async fn sum_sold_hours(&self, project: &ProjectKey) -> Result<Decimal, RepositoryError> {
        let query = sales_orders::Entity::find()
            .select_only()
            .column_as(Expr::cust("SUM(sales_orders.labour_hours)"), "total");

        let total: Option<Option<Decimal>> = Self::counted_orders(query, project)
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or_default())
    }

    async fn sum_logged_hours(&self, project: &ProjectKey) -> Result<Decimal, RepositoryError> {
        let total: Option<Option<Decimal>> = timesheet_details::Entity::find()
            .select_only()
            .column_as(Expr::cust("SUM(timesheet_details.hours)"), "total")
            .join(
                JoinType::InnerJoin,
                timesheet_details::Relation::Timesheets.def(),
            )
            .filter(timesheet_details::Column::Project.eq(project.as_str()))
            .filter(timesheets::Column::Docstatus.lt(DocStatus::Cancelled.code()))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or_default())
    }

    /// Lists completed projects matching the filter, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_completed(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummary>, RepositoryError> {
        let models = projects::Entity::find()
            .filter(projects::Column::Status.eq(ProjectStatus::Completed))
            .filter(projects::Column::ExpectedEndDate.between(filter.from, filter.to))
            .apply_if(filter.project.as_ref(), |q, key| {
                q.filter(projects::Column::Name.eq(key.as_str()))
            })
            .apply_if(filter.company.as_deref(), |q, v| {
                q.filter(projects::Column::Company.eq(v))
            })
            .apply_if(filter.cost_center.as_deref(), |q, v| {
                q.filter(projects::Column::CostCenter.eq(v))
            })
            .apply_if(filter.project_manager.as_deref(), |q, v| {
                q.filter(projects::Column::ProjectManager.eq(v))
            })
            .apply_if(filter.insurance.as_deref(), |q, v| {
                q.filter(projects::Column::Insurance.eq(v))
            })
            .apply_if(filter.project_type.as_deref(), |q, v| {
                q.filter(projects::Column::ProjectType.eq(v))
            })
            .apply_if(filter.sector.as_deref(), |q, v| {
                q.filter(projects::Column::Sector.eq(v))
            })
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|p| ProjectSummary {
                key: ProjectKey::new(p.name),
                company: p.company,
                cost_center: p.cost_center,
                project_type: p.project_type,
                insurance: p.insurance,
                sector: p.sector,
                project_manager: p.project_manager,
                expected_end_date: p.expected_end_date,
            })
            .collect())
    }
}

impl MarginRepository for SeaMarginRepository {
    async fn sales_line_totals(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
        lines: LineSet,
    ) -> Result<TheoreticalTotals, MarginError> {
        let totals = match lines {
            LineSet::Regular => self.regular_line_totals(project, axis).await?,
            LineSet::BundleComponents => self.bundle_component_totals(project, axis).await?,
        };
        debug!(project = %project, axis = %axis, ?lines, sale = %totals.sale, "sales line totals");
        Ok(totals)
    }

    async fn project_cost_fields(
        &self,
        project: &ProjectKey,
    ) -> Result<ProjectCostFields, MarginError> {
        Ok(self.fetch_cost_fields(project).await?)
    }

    async fn purchase_order_total(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        Ok(self.sum_purchase_orders(project).await?)
    }

    async fn manufacturing_total(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        Ok(self.sum_manufacturing(project).await?)
    }

    async fn expected_labour_hours(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        Ok(self.sum_sold_hours(project).await?)
    }

    async fn timesheet_hours(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        Ok(self.sum_logged_hours(project).await?)
    }

    async fn completed_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummary>, MarginError> {
        Ok(self.find_completed(filter).await?)
    }
}
