//! Margin schema migration.
//!
//! Creates the project, sales, purchasing, manufacturing and timesheet
//! tables the margin repository aggregates over.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS & MASTER DATA
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(ITEMS_SQL).await?;

        // ============================================================
        // PART 2: SALES
        // ============================================================
        db.execute_unprepared(SALES_ORDERS_SQL).await?;
        db.execute_unprepared(SALES_ORDER_ITEMS_SQL).await?;
        db.execute_unprepared(PACKED_ITEMS_SQL).await?;

        // ============================================================
        // PART 3: REAL COSTS
        // ============================================================
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(MANUFACTURING_RECORDS_SQL).await?;
        db.execute_unprepared(TIMESHEETS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE project_status AS ENUM ('Open', 'Completed', 'Cancelled');
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    name VARCHAR(140) PRIMARY KEY,
    status project_status NOT NULL DEFAULT 'Open',
    company VARCHAR(140),
    cost_center VARCHAR(140),
    project_type VARCHAR(140),
    insurance VARCHAR(140),
    sector VARCHAR(140),
    project_manager VARCHAR(140),
    expected_end_date DATE,
    -- Running totals maintained by the host system
    total_costing_amount NUMERIC(19, 4),
    total_consumed_material_cost NUMERIC(19, 4),
    total_expense_claim NUMERIC(19, 4)
);

CREATE INDEX idx_projects_completed_end ON projects(expected_end_date)
    WHERE status = 'Completed';
";

const ITEMS_SQL: &str = r"
CREATE TABLE items (
    code VARCHAR(140) PRIMARY KEY,
    item_name VARCHAR(255) NOT NULL,
    -- NULL counts as not labor
    is_labor BOOLEAN
);
";

const SALES_ORDERS_SQL: &str = r"
CREATE TABLE sales_orders (
    name VARCHAR(140) PRIMARY KEY,
    project VARCHAR(140) NOT NULL REFERENCES projects(name) ON DELETE CASCADE,
    docstatus SMALLINT NOT NULL DEFAULT 0,
    exclude_from_statistics BOOLEAN NOT NULL DEFAULT false,
    labour_hours NUMERIC(12, 2),
    CONSTRAINT chk_sales_orders_docstatus CHECK (docstatus BETWEEN 0 AND 2)
);

CREATE INDEX idx_sales_orders_project ON sales_orders(project) WHERE docstatus = 1;
";

const SALES_ORDER_ITEMS_SQL: &str = r"
CREATE TABLE sales_order_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sales_order VARCHAR(140) NOT NULL REFERENCES sales_orders(name) ON DELETE CASCADE,
    item_code VARCHAR(140) NOT NULL REFERENCES items(code),
    qty NUMERIC(19, 4) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    unit_cost_price NUMERIC(19, 4),
    product_bundle_name VARCHAR(140)
);

CREATE INDEX idx_sales_order_items_order ON sales_order_items(sales_order);
";

const PACKED_ITEMS_SQL: &str = r"
CREATE TABLE packed_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sales_order VARCHAR(140) NOT NULL REFERENCES sales_orders(name) ON DELETE CASCADE,
    item_code VARCHAR(140) NOT NULL REFERENCES items(code),
    qty NUMERIC(19, 4) NOT NULL,
    rate NUMERIC(19, 4) NOT NULL,
    unit_cost_price NUMERIC(19, 4)
);

CREATE INDEX idx_packed_items_order ON packed_items(sales_order);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    name VARCHAR(140) PRIMARY KEY,
    docstatus SMALLINT NOT NULL DEFAULT 0,
    CONSTRAINT chk_purchase_orders_docstatus CHECK (docstatus BETWEEN 0 AND 2)
);

CREATE TABLE purchase_order_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    purchase_order VARCHAR(140) NOT NULL REFERENCES purchase_orders(name) ON DELETE CASCADE,
    project VARCHAR(140) REFERENCES projects(name) ON DELETE SET NULL,
    amount NUMERIC(19, 4) NOT NULL
);

CREATE INDEX idx_purchase_order_items_project ON purchase_order_items(project);
";

const MANUFACTURING_RECORDS_SQL: &str = r"
CREATE TABLE manufacturing_records (
    name VARCHAR(140) PRIMARY KEY,
    project VARCHAR(140) NOT NULL REFERENCES projects(name) ON DELETE CASCADE,
    docstatus SMALLINT NOT NULL DEFAULT 0,
    manufacturing_cost NUMERIC(19, 4),
    CONSTRAINT chk_manufacturing_records_docstatus CHECK (docstatus BETWEEN 0 AND 2)
);

CREATE INDEX idx_manufacturing_records_project ON manufacturing_records(project);
";

const TIMESHEETS_SQL: &str = r"
CREATE TABLE timesheets (
    name VARCHAR(140) PRIMARY KEY,
    employee VARCHAR(140),
    docstatus SMALLINT NOT NULL DEFAULT 0,
    CONSTRAINT chk_timesheets_docstatus CHECK (docstatus BETWEEN 0 AND 2)
);

CREATE TABLE timesheet_details (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    timesheet VARCHAR(140) NOT NULL REFERENCES timesheets(name) ON DELETE CASCADE,
    project VARCHAR(140) REFERENCES projects(name) ON DELETE SET NULL,
    hours NUMERIC(12, 2) NOT NULL
);

CREATE INDEX idx_timesheet_details_project ON timesheet_details(project);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS timesheet_details CASCADE;
DROP TABLE IF EXISTS timesheets CASCADE;
DROP TABLE IF EXISTS manufacturing_records CASCADE;
DROP TABLE IF EXISTS purchase_order_items CASCADE;
DROP TABLE IF EXISTS purchase_orders CASCADE;
DROP TABLE IF EXISTS packed_items CASCADE;
DROP TABLE IF EXISTS sales_order_items CASCADE;
DROP TABLE IF EXISTS sales_orders CASCADE;
DROP TABLE IF EXISTS items CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TYPE IF EXISTS project_status;
";
