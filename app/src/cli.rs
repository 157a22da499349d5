//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use controlscope_core::{ImpactLevel, Priority};
use controlscope_export::{ExportFormat, ExportScope};
use controlscope_query::QueryPredicates;

#[derive(Parser, Debug)]
#[command(
    name = "controlscope",
    version,
    about = "Search, filter and export NIST SP 800-53 Rev 5 controls"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Use the bundled catalog without contacting the API")]
    pub offline: bool,
    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Catalog API base URL (overrides config and environment)"
    )]
    pub endpoint: Option<String>,
    #[arg(long, global = true, value_name = "PATH", help = "Read configuration from this file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List controls matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show every field of one control
    Show { id: String },
    /// List control families with their control counts
    Families,
    /// Catalog summary counts
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Export controls to a file
    Export {
        #[arg(long, default_value_t = ExportFormat::Json, help = "json, csv or markdown")]
        format: ExportFormat,
        #[arg(long, default_value_t = ExportScope::CurrentView, help = "all or current")]
        scope: ExportScope,
        #[arg(long, value_name = "DIR", help = "Output directory (defaults to export.output_dir)")]
        out: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Query predicates shared by the listing and export commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, short = 's', help = "Free-text search term")]
    pub search: Option<String>,
    #[arg(long, short = 'f', help = "Exact family name, e.g. \"Access Control\"")]
    pub family: Option<String>,
    #[arg(long, short = 'b', help = "Baseline: low, moderate or high")]
    pub baseline: Option<ImpactLevel>,
    #[arg(long, short = 'p', help = "Priority: p1, p2 or p3")]
    pub priority: Option<Priority>,
}

impl FilterArgs {
    /// Predicates equivalent to these flags.
    #[must_use]
    pub fn predicates(&self) -> QueryPredicates {
        let mut predicates =
            QueryPredicates::new().with_text(self.search.clone().unwrap_or_default());
        predicates.set_family(self.family.clone());
        predicates.baseline = self.baseline;
        predicates.priority = self.priority;
        predicates
    }
}
