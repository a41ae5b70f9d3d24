//! Writes an in-memory [`ProjectLedger`] snapshot into the database.
//!
//! Used by the seeder and by integration tests, so that the SQL aggregates
//! can be checked against the in-memory ones over the same records.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;
use vt_core::margin::ProjectLedger;

use super::margin::RepositoryError;
use crate::entities::{
    items, manufacturing_records, packed_items, projects, purchase_order_items, purchase_orders,
    sales_order_items, sales_orders, timesheet_details, timesheets,
};

/// Item code used for lines with the given labor flag.
///
/// The snapshot carries the flag per line; the schema carries it per item.
#[must_use]
pub const fn item_code(is_labor: Option<bool>) -> &'static str {
    match is_labor {
        Some(true) => "LABOR",
        Some(false) => "MATERIAL",
        None => "UNCLASSIFIED",
    }
}

/// Imports ledger snapshots.
#[derive(Debug, Clone)]
pub struct LedgerImporter {
    db: DatabaseConnection,
}

impl LedgerImporter {
    /// Creates a new importer.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts every record of `ledger` in one transaction.
    ///
    /// Projects referenced by documents must be part of the snapshot.
    /// Returns the number of inserted rows.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails; nothing is written in that case.
    pub async fn import(&self, ledger: &ProjectLedger) -> Result<u64, RepositoryError> {
        let txn = self.db.begin().await?;

        let mut rows = Self::insert_items(&txn).await?;

        rows += insert_all(
            &txn,
            ledger.projects.iter().map(|p| projects::ActiveModel {
                name: Set(p.key.to_string()),
                status: Set(p.status.into()),
                company: Set(p.company.clone()),
                cost_center: Set(p.cost_center.clone()),
                project_type: Set(p.project_type.clone()),
                insurance: Set(p.insurance.clone()),
                sector: Set(p.sector.clone()),
                project_manager: Set(p.project_manager.clone()),
                expected_end_date: Set(p.expected_end_date),
                total_costing_amount: Set(p.total_costing_amount),
                total_consumed_material_cost: Set(p.total_consumed_material_cost),
                total_expense_claim: Set(p.total_expense_claim),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.sales_orders.iter().map(|so| sales_orders::ActiveModel {
                name: Set(so.name.clone()),
                project: Set(so.project.to_string()),
                docstatus: Set(so.docstatus.code()),
                exclude_from_statistics: Set(so.exclude_from_statistics),
                labour_hours: Set(so.labour_hours),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.sales_lines.iter().map(|line| sales_order_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                sales_order: Set(line.sales_order.clone()),
                item_code: Set(item_code(line.is_labor).to_string()),
                qty: Set(line.qty),
                amount: Set(line.amount),
                unit_cost_price: Set(line.unit_cost_price),
                product_bundle_name: Set(line.bundle_name.clone()),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.bundle_components.iter().map(|c| packed_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                sales_order: Set(c.sales_order.clone()),
                item_code: Set(item_code(c.is_labor).to_string()),
                qty: Set(c.qty),
                rate: Set(c.rate),
                unit_cost_price: Set(c.unit_cost_price),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.purchase_orders.iter().map(|po| purchase_orders::ActiveModel {
                name: Set(po.name.clone()),
                docstatus: Set(po.docstatus.code()),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.purchase_order_lines.iter().map(|line| purchase_order_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_order: Set(line.purchase_order.clone()),
                project: Set(line.project.as_ref().map(ToString::to_string)),
                amount: Set(line.amount),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.manufacturing.iter().map(|record| manufacturing_records::ActiveModel {
                name: Set(format!("MFG-{}", Uuid::new_v4())),
                project: Set(record.project.to_string()),
                docstatus: Set(record.docstatus.code()),
                manufacturing_cost: Set(record.manufacturing_cost),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.timesheets.iter().map(|ts| timesheets::ActiveModel {
                name: Set(ts.name.clone()),
                employee: Set(None),
                docstatus: Set(ts.docstatus.code()),
            }),
        )
        .await?;

        rows += insert_all(
            &txn,
            ledger.timesheet_entries.iter().map(|entry| timesheet_details::ActiveModel {
                id: Set(Uuid::new_v4()),
                timesheet: Set(entry.timesheet.clone()),
                project: Set(entry.project.as_ref().map(ToString::to_string)),
                hours: Set(entry.hours),
            }),
        )
        .await?;

        txn.commit().await?;
        info!(rows, projects = ledger.projects.len(), "ledger imported");
        Ok(rows)
    }

    /// Ensures the three classification items exist.
    async fn insert_items(txn: &DatabaseTransaction) -> Result<u64, DbErr> {
        let models = [Some(true), Some(false), None].map(|is_labor| items::ActiveModel {
            code: Set(item_code(is_labor).to_string()),
            item_name: Set(item_code(is_labor).to_lowercase()),
            is_labor: Set(is_labor),
        });

        items::Entity::insert_many(models)
            .on_conflict(OnConflict::column(items::Column::Code).do_nothing().to_owned())
            .exec_without_returning(txn)
            .await
    }
}

/// Inserts a batch of rows; an empty batch is a no-op.
async fn insert_all<A>(
    txn: &DatabaseTransaction,
    models: impl IntoIterator<Item = A>,
) -> Result<u64, DbErr>
where
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    let models: Vec<A> = models.into_iter().collect();
    if models.is_empty() {
        return Ok(0);
    }
    A::Entity::insert_many(models)
        .exec_without_returning(txn)
        .await
}
