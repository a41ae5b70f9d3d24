//! Shared types and configuration for VT margin analytics.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed project keys
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
