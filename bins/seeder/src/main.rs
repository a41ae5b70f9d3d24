//! Database seeder for VT margin analytics development and testing.
//!
//! Seeds a handful of demo projects covering the margin scenarios: a mixed
//! labor/purchases project, an empty project, a project over its sold hours
//! and a project sold as a bundle.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use vt_core::margin::{
    BundleComponentLineItem, DocStatus, ManufacturingRecord, Project, ProjectLedger,
    ProjectStatus, PurchaseOrder, PurchaseOrderLineItem, SalesLineItem, SalesOrder, Timesheet,
    TimesheetEntry,
};
use vt_db::entities::projects;
use vt_db::LedgerImporter;
use vt_shared::types::ProjectKey;

/// Marker project; its presence means the demo data is already seeded.
const MARKER_PROJECT: &str = "PROJ-DEMO-P";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = vt_db::connect(&database_url).await?;

    if projects::Entity::find_by_id(MARKER_PROJECT)
        .one(&db)
        .await?
        .is_some()
    {
        println!("  Demo projects already exist, skipping...");
        return Ok(());
    }

    println!("Seeding demo projects...");
    let rows = LedgerImporter::new(db).import(&demo_ledger()).await?;
    println!("  Inserted {rows} rows");

    println!("Seeding complete!");
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn order(name: &str, project: &ProjectKey, labour_hours: Option<Decimal>) -> SalesOrder {
    SalesOrder {
        name: name.to_string(),
        project: project.clone(),
        docstatus: DocStatus::Submitted,
        exclude_from_statistics: false,
        labour_hours,
    }
}

fn line(order: &str, amount: Decimal, cost: Decimal, is_labor: bool) -> SalesLineItem {
    SalesLineItem {
        sales_order: order.to_string(),
        qty: Decimal::ONE,
        amount,
        unit_cost_price: Some(cost),
        is_labor: Some(is_labor),
        bundle_name: None,
    }
}

fn demo_ledger() -> ProjectLedger {
    let p = ProjectKey::new(MARKER_PROJECT);
    let q = ProjectKey::new("PROJ-DEMO-Q");
    let r = ProjectKey::new("PROJ-DEMO-R");
    let s = ProjectKey::new("PROJ-DEMO-S");

    let mut bundle_parent = line("SO-DEMO-S", dec!(3600), dec!(0), false);
    bundle_parent.bundle_name = Some("Kit fenêtre PVC".to_string());

    ProjectLedger {
        projects: vec![
            Project {
                status: ProjectStatus::Completed,
                company: Some("VT Genève".to_string()),
                cost_center: Some("Pose - VT".to_string()),
                project_type: Some("Rénovation".to_string()),
                sector: Some("Genève".to_string()),
                project_manager: Some("commercial@vt.example".to_string()),
                expected_end_date: date(2025, 3, 31),
                total_costing_amount: Some(dec!(450)),
                total_consumed_material_cost: Some(dec!(25)),
                ..Project::new(p.clone())
            },
            Project {
                company: Some("VT Genève".to_string()),
                ..Project::new(q)
            },
            Project {
                status: ProjectStatus::Completed,
                company: Some("VT Lausanne".to_string()),
                insurance: Some("Assurance Romande".to_string()),
                sector: Some("Vaud".to_string()),
                expected_end_date: date(2025, 5, 15),
                total_costing_amount: Some(dec!(1380)),
                ..Project::new(r.clone())
            },
            Project {
                status: ProjectStatus::Completed,
                company: Some("VT Lausanne".to_string()),
                sector: Some("Vaud".to_string()),
                expected_end_date: date(2025, 6, 30),
                total_costing_amount: Some(dec!(300)),
                total_expense_claim: Some(dec!(60)),
                ..Project::new(s.clone())
            },
        ],
        sales_orders: vec![
            order("SO-DEMO-P", &p, Some(dec!(12))),
            order("SO-DEMO-R", &r, Some(dec!(40))),
            order("SO-DEMO-S", &s, Some(dec!(6))),
        ],
        sales_lines: vec![
            line("SO-DEMO-P", dec!(1000), dec!(400), true),
            line("SO-DEMO-P", dec!(500), dec!(300), false),
            line("SO-DEMO-R", dec!(2400), dec!(1200), true),
            bundle_parent,
        ],
        bundle_components: vec![
            BundleComponentLineItem {
                sales_order: "SO-DEMO-S".to_string(),
                qty: dec!(4),
                rate: dec!(650),
                unit_cost_price: Some(dec!(380)),
                is_labor: Some(false),
            },
            BundleComponentLineItem {
                sales_order: "SO-DEMO-S".to_string(),
                qty: dec!(4),
                rate: dec!(250),
                unit_cost_price: Some(dec!(90)),
                is_labor: Some(true),
            },
        ],
        purchase_orders: vec![PurchaseOrder {
            name: "PO-DEMO-1".to_string(),
            docstatus: DocStatus::Submitted,
        }],
        purchase_order_lines: vec![
            PurchaseOrderLineItem {
                purchase_order: "PO-DEMO-1".to_string(),
                project: Some(p.clone()),
                amount: dec!(280),
            },
            PurchaseOrderLineItem {
                purchase_order: "PO-DEMO-1".to_string(),
                project: Some(s.clone()),
                amount: dec!(1480),
            },
        ],
        manufacturing: vec![ManufacturingRecord {
            project: p,
            docstatus: DocStatus::Submitted,
            manufacturing_cost: Some(dec!(45)),
        }],
        timesheets: vec![Timesheet {
            name: "TS-DEMO-1".to_string(),
            docstatus: DocStatus::Submitted,
        }],
        timesheet_entries: vec![
            TimesheetEntry {
                timesheet: "TS-DEMO-1".to_string(),
                project: Some(r.clone()),
                hours: dec!(30),
            },
            TimesheetEntry {
                timesheet: "TS-DEMO-1".to_string(),
                project: Some(r),
                hours: dec!(16),
            },
            TimesheetEntry {
                timesheet: "TS-DEMO-1".to_string(),
                project: Some(s),
                hours: dec!(5.5),
            },
        ],
    }
}
