//! Command-line arguments.

use std::convert::Infallible;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use vt_core::margin::AnalysisAxis;
use vt_core::reports::{GroupBy, MarginReportFilter, ProjectFilter, ReportRange};
use vt_shared::types::ProjectKey;

/// Margin analytics for VT projects. Results are printed as JSON.
#[derive(Debug, Parser)]
#[command(name = "margins", version, about)]
pub struct Cli {
    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub compact: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Theoretical sale and cost of a project on one axis.
    Theoretical {
        /// Project key.
        project: ProjectKey,
        /// Analysis axis: labor, purchases or global ("Temps passé" and
        /// "Achats" are accepted too).
        #[arg(long, value_parser = parse_axis, default_value = "global")]
        axis: AnalysisAxis,
    },
    /// Real cost breakdown of a project.
    Cost {
        /// Project key.
        project: ProjectKey,
    },
    /// Theoretical vs. real margins of a project.
    Project {
        /// Project key.
        project: ProjectKey,
        /// Restrict the figures to one axis.
        #[arg(long, value_parser = parse_axis)]
        axis: Option<AnalysisAxis>,
    },
    /// Sold vs. logged labour hours of a project.
    Hours {
        /// Project key.
        project: ProjectKey,
    },
    /// Every dashboard figure of a project.
    Dashboard {
        /// Project key.
        project: ProjectKey,
    },
    /// Margin report over completed projects.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// First day of the range (YYYY-MM-DD).
    #[arg(long)]
    pub from: NaiveDate,
    /// Last day of the range (YYYY-MM-DD).
    #[arg(long)]
    pub to: NaiveDate,
    /// Width of each report column.
    #[arg(long, value_enum, default_value_t = RangeArg::Monthly)]
    pub range: RangeArg,
    /// Project attribute each row aggregates.
    #[arg(long, value_enum, default_value_t = GroupByArg::Project)]
    pub group_by: GroupByArg,
    /// Analysis axis the sales lines are filtered on.
    #[arg(long, value_parser = parse_axis, default_value = "global")]
    pub axis: AnalysisAxis,
    /// Only projects of this company.
    #[arg(long)]
    pub company: Option<String>,
    /// Only this project.
    #[arg(long)]
    pub project: Option<ProjectKey>,
    /// Only projects booked on this cost center.
    #[arg(long)]
    pub cost_center: Option<String>,
    /// Only projects led by this project manager.
    #[arg(long)]
    pub project_manager: Option<String>,
    /// Only projects covered by this insurance company.
    #[arg(long)]
    pub insurance: Option<String>,
    /// Only projects of this project type.
    #[arg(long)]
    pub project_type: Option<String>,
    /// Only projects of this sales sector.
    #[arg(long)]
    pub sector: Option<String>,
}

impl From<ReportArgs> for MarginReportFilter {
    fn from(args: ReportArgs) -> Self {
        Self {
            projects: ProjectFilter {
                company: args.company,
                project: args.project,
                cost_center: args.cost_center,
                project_manager: args.project_manager,
                insurance: args.insurance,
                project_type: args.project_type,
                sector: args.sector,
                ..ProjectFilter::new(args.from, args.to)
            },
            range: args.range.into(),
            group_by: args.group_by.into(),
            axis: args.axis,
        }
    }
}

/// Resolves `--axis` through the same label matching as the order-management UI.
fn parse_axis(label: &str) -> Result<AnalysisAxis, Infallible> {
    Ok(AnalysisAxis::from_label(label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Report column width.
pub enum RangeArg {
    /// One column per month.
    Monthly,
    /// One column per quarter.
    Quarterly,
    /// One column per year.
    Annual,
}

impl From<RangeArg> for ReportRange {
    fn from(value: RangeArg) -> Self {
        match value {
            RangeArg::Monthly => Self::Monthly,
            RangeArg::Quarterly => Self::Quarterly,
            RangeArg::Annual => Self::Annual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Report row grouping.
pub enum GroupByArg {
    /// One row per project.
    Project,
    /// One row per company.
    Company,
    /// One row per cost center.
    CostCenter,
    /// One row per insurance company.
    Insurance,
    /// One row per project type.
    ProjectType,
    /// One row per sales sector.
    Sector,
}

impl From<GroupByArg> for GroupBy {
    fn from(value: GroupByArg) -> Self {
        match value {
            GroupByArg::Project => Self::Project,
            GroupByArg::Company => Self::Company,
            GroupByArg::CostCenter => Self::CostCenter,
            GroupByArg::Insurance => Self::Insurance,
            GroupByArg::ProjectType => Self::ProjectType,
            GroupByArg::Sector => Self::Sector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_command() {
        let cli =
            Cli::try_parse_from(["margins", "project", "PROJ-0042", "--axis", "labor"]).unwrap();

        match cli.command {
            Command::Project { project, axis } => {
                assert_eq!(project.as_str(), "PROJ-0042");
                assert_eq!(axis, Some(AnalysisAxis::Labor));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_axis_accepts_ui_labels() {
        let cli = Cli::try_parse_from(["margins", "theoretical", "PROJ-0042", "--axis", "Achats"])
            .unwrap();

        match cli.command {
            Command::Theoretical { axis, .. } => assert_eq!(axis, AnalysisAxis::Purchases),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_theoretical_axis_defaults_to_global() {
        let cli = Cli::try_parse_from(["margins", "theoretical", "PROJ-0042"]).unwrap();

        match cli.command {
            Command::Theoretical { axis, .. } => assert_eq!(axis, AnalysisAxis::Global),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_into_filter() {
        let cli = Cli::try_parse_from([
            "margins",
            "report",
            "--from",
            "2025-01-01",
            "--to",
            "2025-06-30",
            "--range",
            "quarterly",
            "--group-by",
            "cost-center",
            "--sector",
            "Vaud",
        ])
        .unwrap();

        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        let filter = MarginReportFilter::from(args);

        assert_eq!(filter.range, ReportRange::Quarterly);
        assert_eq!(filter.group_by, GroupBy::CostCenter);
        assert_eq!(filter.axis, AnalysisAxis::Global);
        assert_eq!(filter.projects.sector.as_deref(), Some("Vaud"));
        assert_eq!(filter.projects.to, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[test]
    fn test_report_requires_dates() {
        assert!(Cli::try_parse_from(["margins", "report", "--from", "2025-01-01"]).is_err());
    }
}
