//! UI systems for labels, the info panel and the button bar.

use bevy::prelude::*;
use bevy::ui::Node as UiNode;

use crate::stage::{emphasis_spans, PanelView, SceneGraph};
use crate::visualization::components::{InfoPanelText, LayerButton, SceneLabel};
use crate::visualization::constants::{
    COLOR_BUTTON, COLOR_BUTTON_ACTIVE, COLOR_BUTTON_HOVER, COLOR_TEXT, COLOR_TEXT_DIM,
    COLOR_TEXT_EMPHASIS, LABEL_FONT_PER_UNIT,
};
use crate::visualization::resources::StageRes;

// Labels scaled below this are not drawn (mid pop-in).
const MIN_LABEL_FONT: f32 = 1.0;

/// Update label positions by projecting 3D label positions to screen space.
/// The font size follows the label's scale, so the pop-in animation shows.
pub fn update_labels_system(
    stage: Res<StageRes>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut label_query: Query<(&mut UiNode, &mut Visibility, &mut TextFont, &SceneLabel)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let scene = stage.0.scene();

    for (mut node_ui, mut visibility, mut font, label) in label_query.iter_mut() {
        if !scene.is_effectively_visible(label.object) {
            *visibility = Visibility::Hidden;
            continue;
        }

        let world = scene.world_transform(label.object);
        let font_size = LABEL_FONT_PER_UNIT * world.scale.y;
        if font_size < MIN_LABEL_FONT {
            *visibility = Visibility::Hidden;
            continue;
        }

        let to_label = world.position - camera_transform.translation();
        let is_in_front = to_label.dot(*camera_transform.forward()) > 0.0;
        let projected = camera.world_to_viewport(camera_transform, world.position);

        match projected {
            Ok(viewport_pos) if is_in_front => {
                if (font.font_size - font_size).abs() > 0.1 {
                    font.font_size = font_size;
                }
                // Center text roughly
                node_ui.left = Val::Px(viewport_pos.x - font_size * 3.0);
                node_ui.top = Val::Px(viewport_pos.y - font_size * 0.6);
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// Rebuild the info panel text whenever the stage's panel changes.
pub fn update_info_panel_system(
    mut commands: Commands,
    stage: Res<StageRes>,
    mut shown: Local<Option<PanelView>>,
    text_query: Query<Entity, With<InfoPanelText>>,
) {
    let panel = stage.0.panel();
    if shown.as_ref() == Some(panel) {
        return;
    }
    let Ok(entity) = text_query.get_single() else {
        return;
    };

    commands.entity(entity).despawn_descendants();
    commands.entity(entity).with_children(|text| {
        let mut span = |content: String, size: f32, color: Color| {
            text.spawn((
                TextSpan::new(content),
                TextFont {
                    font_size: size,
                    ..default()
                },
                TextColor(color),
            ));
        };

        span(format!("{}\n", panel.headline), 17.0, COLOR_TEXT);
        if let Some(description) = &panel.description {
            span(format!("\n{}\n", description), 13.0, COLOR_TEXT_DIM);
        }

        span("\n".to_string(), 8.0, COLOR_TEXT);
        for fact in &panel.facts {
            span("• ".to_string(), 13.0, COLOR_TEXT_DIM);
            for part in emphasis_spans(fact) {
                let color = if part.emphasized {
                    COLOR_TEXT_EMPHASIS
                } else {
                    COLOR_TEXT
                };
                span(part.text.to_string(), 13.0, color);
            }
            span("\n".to_string(), 13.0, COLOR_TEXT);
        }

        if !panel.functions.is_empty() {
            span("\nKey functions:\n".to_string(), 14.0, COLOR_TEXT);
            for function in &panel.functions {
                span(format!("  - {}\n", function), 12.0, COLOR_TEXT_DIM);
            }
        }

        if let Some(prompt) = &panel.prompt {
            span(format!("\n{}", prompt), 12.0, COLOR_TEXT_DIM);
        }
    });

    tracing::debug!("Info panel now shows '{}'", panel.headline);
    *shown = Some(panel.clone());
}

/// Color buttons by hover state and the active layer.
pub fn update_button_colors_system(
    stage: Res<StageRes>,
    mut buttons: Query<(&Interaction, Option<&LayerButton>, &mut BackgroundColor), With<Button>>,
) {
    let active = stage.0.state().active_layer();

    for (interaction, layer, mut background) in buttons.iter_mut() {
        let is_active = layer.is_some_and(|LayerButton(l)| Some(*l) == active);
        let color = if is_active {
            COLOR_BUTTON_ACTIVE
        } else if *interaction == Interaction::Hovered {
            COLOR_BUTTON_HOVER
        } else {
            COLOR_BUTTON
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}
