//! Viewer plugin for Bevy.

use bevy::prelude::*;

use super::resources::StageRes;
use super::setup::setup_scene;
use super::systems;
use crate::stage::Stage;

/// Plugin that renders and drives a [`Stage`].
pub struct ViewerPlugin {
    /// Session to render; cloned into the app on build.
    pub stage: Stage,
}

impl ViewerPlugin {
    pub fn new(stage: Stage) -> Self {
        Self { stage }
    }
}

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(StageRes(self.stage.clone()))
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    systems::resize_system,
                    systems::button_system,
                    systems::keyboard_system,
                    systems::pointer_system,
                    systems::camera_orbit_system,
                    systems::tick_stage_system,
                    systems::sync_scene_system,
                    systems::sync_camera_system,
                    systems::update_outline_system,
                    systems::update_labels_system,
                    systems::update_info_panel_system,
                    systems::update_button_colors_system,
                )
                    .chain(),
            );
    }
}
