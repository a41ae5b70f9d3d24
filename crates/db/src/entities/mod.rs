//! `SeaORM` entities for the order-management tables read by the margin
//! repository.

pub mod items;
pub mod manufacturing_records;
pub mod packed_items;
pub mod projects;
pub mod purchase_order_items;
pub mod purchase_orders;
pub mod sales_order_items;
pub mod sales_orders;
pub mod sea_orm_active_enums;
pub mod timesheet_details;
pub mod timesheets;
