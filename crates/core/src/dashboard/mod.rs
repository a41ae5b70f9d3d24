//! Project margin dashboard.
//!
//! Bundles the margin figures, labour hours and their indicators into one
//! view of a project.

pub mod types;

pub use types::*;
