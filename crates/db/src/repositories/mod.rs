//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod ledger_import;
pub mod margin;

pub use ledger_import::LedgerImporter;
pub use margin::{RepositoryError, SeaMarginRepository};
