//! Common types used across the workspace.

pub mod id;
pub mod money;

pub use id::ProjectKey;
pub use money::{Currency, Money};
