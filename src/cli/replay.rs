//! Replay subcommand - run a scripted session without a window.

use std::path::PathBuf;

use clap::Parser;

use super::OutputFormat;
use crate::config::Config;
use crate::models::ContentCatalog;
use crate::stage::{ReplayScript, Stage};

/// Run a replay script and print the final stage snapshot.
#[derive(Parser)]
pub struct ReplayCommand {
    /// Path to the JSON replay script.
    pub script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print the info panel as plain text after the snapshot
    #[arg(long)]
    pub panel: bool,
}

impl ReplayCommand {
    /// Run the replay command.
    pub fn run(self, catalog: ContentCatalog, config: &Config) -> color_eyre::Result<()> {
        let script = ReplayScript::from_file(&self.script)?;
        let mut stage = Stage::new(catalog, config);
        let snapshot = script.run(&mut stage)?;

        println!("{}", self.format.render(&snapshot)?);
        if self.panel {
            println!();
            print!("{}", stage.panel().to_text());
        }
        Ok(())
    }
}
