//! Window input translated into stage events.

use bevy::prelude::*;
use bevy::window::{CursorMoved, WindowResized};

use crate::stage::{InputEvent, PickRay};
use crate::visualization::components::{LayerButton, ResetButton};
use crate::visualization::resources::StageRes;

// Keys 1..9 activate layers by position.
const LAYER_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Activate a layer or reset when a button is pressed.
pub fn button_system(
    mut stage: ResMut<StageRes>,
    buttons: Query<
        (&Interaction, Option<&LayerButton>, Option<&ResetButton>),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, layer, reset) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Some(LayerButton(layer)) = layer {
            stage.0.dispatch(InputEvent::Activate(*layer));
        } else if reset.is_some() {
            stage.0.dispatch(InputEvent::Reset);
        }
    }
}

/// Keys 1-9 activate layers, R resets.
pub fn keyboard_system(mut stage: ResMut<StageRes>, keyboard: Res<ButtonInput<KeyCode>>) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        stage.0.dispatch(InputEvent::Reset);
        return;
    }

    let pressed = LAYER_KEYS
        .iter()
        .position(|key| keyboard.just_pressed(*key));
    if let Some(index) = pressed {
        let layer = stage.0.catalog().layer_ids().nth(index);
        if let Some(layer) = layer {
            stage.0.dispatch(InputEvent::Activate(layer));
        }
    }
}

/// Cast a ray through the cursor on every pointer move and hand it to the
/// stage for hover highlighting.
pub fn pointer_system(
    mut stage: ResMut<StageRes>,
    mut cursor_moved: EventReader<CursorMoved>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) {
    // Only the latest position matters
    let Some(cursor) = cursor_moved.read().last().map(|ev| ev.position) else {
        return;
    };
    // Orbiting
    if mouse_button.pressed(MouseButton::Right) {
        return;
    }
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    if let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) {
        let ray = PickRay::new(ray.origin, *ray.direction);
        stage.0.dispatch(InputEvent::PointerMoved(ray));
    }
}

/// Keep the stage viewport in sync with the window.
pub fn resize_system(mut stage: ResMut<StageRes>, mut resized: EventReader<WindowResized>) {
    for ev in resized.read() {
        stage.0.dispatch(InputEvent::Resized {
            width: ev.width,
            height: ev.height,
        });
    }
}
