//! Catalog subcommand - print the content in use.

use clap::Parser;

use super::OutputFormat;
use crate::models::ContentCatalog;

/// Print the content catalog.
#[derive(Parser)]
pub struct CatalogCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl CatalogCommand {
    /// Run the catalog command.
    pub fn run(self, catalog: &ContentCatalog) -> color_eyre::Result<()> {
        println!("{}", self.format.render(catalog.data())?);
        Ok(())
    }
}
