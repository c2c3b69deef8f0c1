//! Camera orbit and zoom systems.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::stage::SceneGraph;
use crate::visualization::constants::{ORBIT_SENSITIVITY, ZOOM_STEP};
use crate::visualization::resources::StageRes;

/// Camera orbit control system.
///
/// Controls:
/// - Right-click drag: Orbit around the focus
/// - Scroll wheel: Zoom
///
/// The left button is left to hovering and the UI buttons.
pub fn camera_orbit_system(
    mut stage: ResMut<StageRes>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    if mouse_button.pressed(MouseButton::Right) {
        for ev in mouse_motion.read() {
            stage
                .0
                .orbit_camera(-ev.delta.x * ORBIT_SENSITIVITY, ev.delta.y * ORBIT_SENSITIVITY);
        }
    } else {
        mouse_motion.clear();
    }

    for ev in scroll.read() {
        stage.0.zoom_camera(ev.y * ZOOM_STEP);
    }
}

/// Place the camera where the stage's camera rig is.
pub fn sync_camera_system(
    stage: Res<StageRes>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    let rig = stage.0.scene().camera();
    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = Transform::from_translation(rig.eye).looking_at(rig.focus, Vec3::Y);
    }
}
