//! Controlscope application shell.
//!
//! Wires configuration, catalog loading and the command handlers together.
//! Query, export and catalog logic live in the `crates/` directory.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

pub use cli::Cli;
pub use error::CommandError;
pub use state::{CatalogView, ExportReceipt};

use controlscope_catalog::{EmbeddedCatalog, HttpCatalogSource};
use controlscope_core::AppConfig;
use tracing::info;

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,controlscope=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Resolve the effective configuration for a command line.
///
/// An explicit `--config` file replaces the default location. Environment
/// overrides apply in both cases, and the global flags apply last.
/// Validation runs once, after every override.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, CommandError> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load_with_env()?,
    };

    if let Some(url) = &cli.endpoint {
        config.catalog.base_url.clone_from(url);
    }
    if cli.offline {
        config.catalog.offline = true;
    }

    config.validate()?;
    Ok(config)
}

/// Load the catalog view according to `config`.
///
/// Offline mode skips the remote source entirely.
pub async fn load_view(config: &AppConfig) -> Result<CatalogView, CommandError> {
    let fallback = EmbeddedCatalog::new();

    let view = if config.catalog.offline {
        CatalogView::load_offline(&fallback).await?
    } else {
        let primary = HttpCatalogSource::from_config(&config.catalog)?;
        CatalogView::load(&primary, &fallback).await?
    };

    info!(
        origin = %view.store().origin(),
        controls = view.store().len(),
        "Catalog loaded"
    );
    Ok(view)
}

/// Run one command line to completion, returning what to print on stdout.
pub async fn run(cli: Cli) -> Result<String, CommandError> {
    let config = resolve_config(&cli)?;
    let mut view = load_view(&config).await?;
    commands::dispatch(&cli, &config, &mut view)
}
