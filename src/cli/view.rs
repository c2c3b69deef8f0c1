//! View subcommand - open the interactive 3D scene.

use clap::Parser;

use crate::config::Config;
use crate::models::ContentCatalog;
use crate::stage::Stage;
use crate::visualization::run_viewer;

/// Open the interactive viewer.
#[derive(Parser)]
pub struct ViewCommand {
    /// Disable hub spin and ring motion
    #[arg(long)]
    pub still: bool,
}

impl ViewCommand {
    /// Run the view command. Blocks until the window is closed.
    pub fn run(self, catalog: ContentCatalog, mut config: Config) -> color_eyre::Result<()> {
        if self.still {
            config.layout.idle_motion = false;
        }
        tracing::info!("Opening viewer ({} layers)", catalog.layer_count());
        run_viewer(Stage::new(catalog, &config));
        Ok(())
    }
}
