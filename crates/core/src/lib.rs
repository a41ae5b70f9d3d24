//! Core business logic for VT project margins.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, aggregation rules and margin calculations live here; data
//! access goes through the [`margin::MarginRepository`] trait.
//!
//! # Modules
//!
//! - `margin` - Theoretical vs. real margins, labour hours and indicators
//! - `dashboard` - Per-project dashboard figures
//! - `reports` - Period margin reports over completed projects

pub mod dashboard;
pub mod margin;
pub mod reports;
