//! 3D viewer for the hub-and-rings scene.
//!
//! The viewer holds a [`Stage`](crate::stage::Stage) in a resource and only
//! mirrors its scene model onto Bevy entities each frame; every interaction
//! decision is made by the stage.
//!
//! ## Module Structure
//!
//! - `components` - ECS components linking entities to scene objects
//! - `resources` - ECS resources (the stage, materials)
//! - `systems` - ECS systems (camera, interaction, scene sync, UI)
//! - `setup` - Scene initialization
//! - `plugin` - Bevy plugin definition
//! - `constants` - Colors, sizes, and other constants

mod components;
mod constants;
mod plugin;
mod resources;
mod setup;
mod systems;

pub use plugin::ViewerPlugin;

use bevy::prelude::*;

use crate::stage::Stage;
use constants::COLOR_BACKGROUND;

/// Run the viewer for `stage`.
///
/// This spawns a Bevy window and blocks until it is closed. Bevy's own log
/// plugin is disabled; the subscriber installed by the binary stays in charge.
pub fn run_viewer(stage: Stage) {
    let window = &stage.config().window;
    let primary_window = Window {
        title: window.title.clone(),
        resolution: (window.width, window.height).into(),
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(primary_window),
                    ..default()
                })
                .disable::<bevy::log::LogPlugin>(),
        )
        .insert_resource(ClearColor(COLOR_BACKGROUND))
        .add_plugins(ViewerPlugin::new(stage))
        .run();
}
