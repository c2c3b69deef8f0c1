//! Stage advancement and scene-to-entity sync.

use bevy::prelude::*;

use crate::stage::SceneGraph;
use crate::visualization::components::{OutlineShell, SceneEntity};
use crate::visualization::constants::{color_of, emissive_of, OUTLINE_SCALE};
use crate::visualization::resources::StageRes;

/// Advance the stage by the frame time.
pub fn tick_stage_system(mut stage: ResMut<StageRes>, time: Res<Time>) {
    stage.0.tick(time.delta());
}

/// Copy transforms, visibility and material state of every scene object onto
/// its entity.
pub fn sync_scene_system(
    stage: Res<StageRes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(
        &SceneEntity,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let scene = stage.0.scene();

    for (entity, mut transform, mut visibility, material) in query.iter_mut() {
        let id = entity.object;

        let shown = scene.is_effectively_visible(id);
        let wanted = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
        if !shown {
            continue;
        }

        let world = scene.world_transform(id);
        transform.translation = world.position;
        transform.rotation = Quat::from_rotation_y(world.spin);
        transform.scale = world.scale;

        let object = scene.object(id);
        let base_color = color_of(object.color).with_alpha(object.opacity);
        let emissive = emissive_of(object.emissive, object.emphasis);

        // Only touch the asset when something changed
        let unchanged = materials
            .get(&material.0)
            .is_some_and(|m| m.base_color == base_color && m.emissive == emissive);
        if unchanged {
            continue;
        }
        if let Some(m) = materials.get_mut(&material.0) {
            m.base_color = base_color;
            m.emissive = emissive;
            m.alpha_mode = if object.opacity < 1.0 {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            };
        }
    }
}

/// Move the outline shell onto the outlined object, or hide it.
pub fn update_outline_system(
    stage: Res<StageRes>,
    mut query: Query<(&mut Transform, &mut Visibility), With<OutlineShell>>,
) {
    let Ok((mut transform, mut visibility)) = query.get_single_mut() else {
        return;
    };
    let scene = stage.0.scene();

    let target = scene
        .outlined()
        .filter(|id| scene.is_effectively_visible(*id));
    let Some(id) = target else {
        *visibility = Visibility::Hidden;
        return;
    };

    let world = scene.world_transform(id);
    let radius = scene.object(id).pick_radius.unwrap_or(1.0);
    transform.translation = world.position;
    transform.scale = Vec3::splat(radius * world.scale.max_element() * OUTLINE_SCALE);
    *visibility = Visibility::Visible;
}
