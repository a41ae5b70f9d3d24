//! Margin analytics CLI.
//!
//! Reads project data from the database and prints margin figures as JSON.

mod cli;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vt_core::margin::MarginService;
use vt_core::reports::MarginReportFilter;
use vt_db::{SeaMarginRepository, connect_with};
use vt_shared::AppConfig;
use vt_shared::config::LoggingConfig;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let db = connect_with(&config.database)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    let service = MarginService::new(Arc::new(SeaMarginRepository::new(db)), config.margins);

    match cli.command {
        Command::Theoretical { project, axis } => {
            print_json(&service.theoretical(&project, axis).await?, cli.compact)
        }
        Command::Cost { project } => print_json(&service.real_cost(&project).await?, cli.compact),
        Command::Project {
            project,
            axis: Some(axis),
        } => print_json(&service.axis_margins(&project, axis).await?, cli.compact),
        Command::Project {
            project,
            axis: None,
        } => print_json(&service.project_margins(&project).await?, cli.compact),
        Command::Hours { project } => {
            print_json(&service.labour_hours(&project).await?, cli.compact)
        }
        Command::Dashboard { project } => {
            print_json(&service.project_dashboard(&project).await?, cli.compact)
        }
        Command::Report(args) => {
            let filter = MarginReportFilter::from(args);
            print_json(&service.margin_report(&filter).await?, cli.compact)
        }
    }
}

/// Logs go to stderr so that stdout only carries the JSON result.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "vt=info,margins=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}
