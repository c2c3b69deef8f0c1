//! CLI module for finrings.
//!
//! Subcommands:
//! - `view`: Open the interactive 3D scene
//! - `catalog`: Print the content catalog
//! - `replay`: Run a scripted session headlessly and print the final state

mod catalog;
mod output;
mod replay;
mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::models::ContentCatalog;

pub use catalog::CatalogCommand;
pub use output::OutputFormat;
pub use replay::ReplayCommand;
pub use view::ViewCommand;

/// finrings - AI in corporate finance, as a hub with concentric rings
#[derive(Parser)]
#[command(name = "finrings")]
#[command(about = "Interactive 3D hub-and-rings scene of AI adoption in corporate finance")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON catalog to use instead of the built-in content
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive viewer
    View(ViewCommand),

    /// Print the content catalog
    Catalog(CatalogCommand),

    /// Run a replay script without a window
    Replay(ReplayCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        tracing::debug!("Loaded configuration: {:?}", config);

        let catalog_path = self.catalog.as_deref().or(config.catalog.as_deref());
        let catalog = ContentCatalog::load(catalog_path)?;

        match self.command {
            Command::View(cmd) => cmd.run(catalog, config),
            Command::Catalog(cmd) => cmd.run(&catalog),
            Command::Replay(cmd) => cmd.run(catalog, &config),
        }
    }
}
