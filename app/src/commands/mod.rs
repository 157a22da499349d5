//! Command handlers.
//!
//! Each handler applies its filters to the loaded [`CatalogView`] and returns
//! the text to print on stdout.

pub mod catalog;
pub mod export;

use chrono::Utc;
use controlscope_core::AppConfig;

use crate::cli::{Cli, Commands};
use crate::error::CommandError;
use crate::state::CatalogView;

/// Run the parsed subcommand against a loaded view.
pub fn dispatch(
    cli: &Cli,
    config: &AppConfig,
    view: &mut CatalogView,
) -> Result<String, CommandError> {
    match &cli.command {
        Commands::List { filters } => {
            view.apply(filters.predicates());
            catalog::list(view, cli.json)
        }
        Commands::Show { id } => catalog::show(view, id, cli.json),
        Commands::Families => catalog::families(view, cli.json),
        Commands::Stats { filters } => {
            view.apply(filters.predicates());
            catalog::stats(view, cli.json)
        }
        Commands::Export {
            format,
            scope,
            out,
            filters,
        } => {
            view.apply(filters.predicates());
            let dir = out.clone().unwrap_or_else(|| config.export.output_dir.clone());
            export::export(view, *scope, *format, &dir, Utc::now(), cli.json)
        }
    }
}
