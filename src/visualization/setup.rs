//! Scene setup and material creation for the viewer.

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy::ui::PositionType;

use crate::stage::layout::{HALO_RADIUS, HUB_SIZE, POINT_RADIUS};
use crate::stage::{ObjectKind, SceneGraph};
use crate::visualization::components::{
    InfoPanel, InfoPanelText, LayerButton, OutlineShell, ResetButton, SceneEntity, SceneLabel,
};
use crate::visualization::constants::{
    color_of, emissive_of, COLOR_BUTTON, COLOR_OUTLINE, COLOR_PANEL, COLOR_TEXT,
};
use crate::visualization::resources::StageRes;

/// Setup the scene with camera, lighting, scene objects and UI.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    stage: Res<StageRes>,
) {
    let stage = &stage.0;
    let scene = stage.scene();
    let layout = stage.layout();
    let catalog = stage.catalog();

    // Camera
    let rig = scene.camera();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.eye).looking_at(rig.focus, Vec3::Y),
    ));

    // Key light
    commands.spawn((
        DirectionalLight {
            illuminance: 12000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Point lights around the rings
    let point_light_positions = [
        Vec3::new(12.0, 6.0, 12.0),
        Vec3::new(-12.0, 6.0, -12.0),
        Vec3::new(0.0, 12.0, 0.0),
    ];
    for pos in point_light_positions {
        commands.spawn((
            PointLight {
                intensity: 400000.0,
                color: Color::WHITE,
                shadows_enabled: false,
                range: 60.0,
                ..default()
            },
            Transform::from_translation(pos),
        ));
    }

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });

    // One mesh per object, each with its own material so opacity and
    // emphasis can be driven per object.
    let hub_mesh = meshes.add(Cuboid::new(HUB_SIZE, HUB_SIZE, HUB_SIZE));
    let halo_mesh = meshes.add(Sphere::new(HALO_RADIUS).mesh().uv(32, 18));
    let point_mesh = meshes.add(Sphere::new(POINT_RADIUS).mesh().uv(16, 12));
    let ring_thickness = stage.config().layout.ring_thickness;

    let text_font = TextFont {
        font_size: 12.0,
        ..default()
    };

    for (id, object) in scene.objects() {
        let mesh = match object.kind {
            ObjectKind::Hub => hub_mesh.clone(),
            ObjectKind::HubHalo => halo_mesh.clone(),
            ObjectKind::Ring(layer) => meshes.add(Torus {
                minor_radius: ring_thickness,
                major_radius: layout.ring_radius(layer),
            }),
            ObjectKind::Point(_) => point_mesh.clone(),
            ObjectKind::HubLabel | ObjectKind::RingLabel(_) | ObjectKind::PointLabel(_) => {
                commands.spawn((
                    Text::new(object.text.clone().unwrap_or_default()),
                    text_font.clone(),
                    TextColor(COLOR_TEXT),
                    bevy::ui::Node {
                        position_type: PositionType::Absolute,
                        ..default()
                    },
                    Visibility::Hidden,
                    SceneLabel { object: id },
                ));
                continue;
            }
        };

        let material = materials.add(StandardMaterial {
            base_color: color_of(object.color).with_alpha(object.opacity),
            metallic: 0.3,
            perceptual_roughness: 0.5,
            reflectance: 0.3,
            emissive: emissive_of(object.emissive, object.emphasis),
            alpha_mode: if object.opacity < 1.0 {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            ..default()
        });

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(object.position),
            Visibility::Hidden,
            SceneEntity { object: id },
        ));
    }

    // Outline shell, moved onto whatever the stage outlines
    let outline_material = materials.add(StandardMaterial {
        base_color: COLOR_OUTLINE,
        emissive: LinearRgba::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: Some(Face::Front),
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0).mesh().uv(16, 12))),
        MeshMaterial3d(outline_material),
        Transform::default(),
        Visibility::Hidden,
        OutlineShell,
    ));

    // Info panel on the left
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                width: Val::Px(340.0),
                min_height: Val::Px(100.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(COLOR_PANEL),
            BorderRadius::all(Val::Px(8.0)),
            InfoPanel,
        ))
        .with_children(|parent| {
            // Content spans are rebuilt whenever the stage's panel changes
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(COLOR_TEXT),
                InfoPanelText,
            ));
        });

    // Layer buttons and reset along the bottom
    let button_node = bevy::ui::Node {
        padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    };
    let button_font = TextFont {
        font_size: 14.0,
        ..default()
    };

    commands
        .spawn(bevy::ui::Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            column_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|bar| {
            for layer in catalog.layer_ids() {
                bar.spawn((
                    Button,
                    button_node.clone(),
                    BackgroundColor(COLOR_BUTTON),
                    BorderRadius::all(Val::Px(6.0)),
                    LayerButton(layer),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(catalog.layer(layer).label.clone()),
                        button_font.clone(),
                        TextColor(COLOR_TEXT),
                    ));
                });
            }
            bar.spawn((
                Button,
                button_node.clone(),
                BackgroundColor(COLOR_BUTTON),
                BorderRadius::all(Val::Px(6.0)),
                ResetButton,
            ))
            .with_children(|button| {
                button.spawn((Text::new("Reset View"), button_font.clone(), TextColor(COLOR_TEXT)));
            });
        });

    tracing::debug!("Spawned viewer entities for {} scene objects", scene.len());
}
