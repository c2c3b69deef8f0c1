//! Scene construction and the id tables linking domain ids to render objects.

use std::collections::HashMap;

use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::scene::{CameraRig, ObjectId, ObjectKind, Pick, SceneModel, SceneObject};
use crate::config::{AppearanceConfig, LayoutConfig};
use crate::models::{ContentCatalog, LayerId, Rgb, SubItemId};

/// Edge length of the hub box.
pub const HUB_SIZE: f32 = 3.0;
/// Radius of the glow shell around the hub.
pub const HALO_RADIUS: f32 = 3.2;
/// Visual radius of a point sphere.
pub const POINT_RADIUS: f32 = 0.2;
/// Text above the hub.
pub const HUB_LABEL: &str = "Corporate Finance";

const HUB_COLOR: Rgb = Rgb(0x78909C);
const HUB_EMISSIVE: Rgb = Rgb(0x30404C);
const HALO_COLOR: Rgb = Rgb(0x87CEEB);
const LABEL_SIZE_LARGE: Vec3 = Vec3::new(4.0, 1.5, 1.0);
const POINT_EMPHASIS: f32 = 0.8;
// Hit radius relative to the visual radius, for easier targeting.
const POINT_HIT_FACTOR: f32 = 1.8;
const LABEL_HIT_RADIUS: f32 = 0.35;

#[derive(Debug, Clone, Copy)]
struct RingHandles {
    ring: ObjectId,
    label: ObjectId,
    radius: f32,
}

#[derive(Debug, Clone, Copy)]
struct PointHandles {
    point: ObjectId,
    label: ObjectId,
    angle: f32,
}

/// Render handles of every domain object.
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub hub: ObjectId,
    pub hub_halo: ObjectId,
    pub hub_label: ObjectId,
    rings: Vec<RingHandles>,
    points: Vec<PointHandles>,
    owners: HashMap<ObjectId, SubItemId>,
}

impl SceneLayout {
    /// Build the scene for `catalog`: hub, one ring per layer and one point
    /// (with label) per sub-item. Rings and labels start hidden.
    pub fn build(
        catalog: &ContentCatalog,
        layout: &LayoutConfig,
        appearance: &AppearanceConfig,
        camera: CameraRig,
    ) -> (SceneModel, SceneLayout) {
        let mut scene = SceneModel::new(camera);
        let mut rng = StdRng::seed_from_u64(layout.seed);
        let jitter = layout.jitter.abs();

        let hub = scene.add(
            SceneObject::new(ObjectKind::Hub)
                .colored(HUB_COLOR, HUB_EMISSIVE, 0.7)
                .pickable(HUB_SIZE * 0.5),
        );
        let hub_halo = scene.add(
            SceneObject::new(ObjectKind::HubHalo)
                .with_parent(hub)
                .colored(HALO_COLOR, HALO_COLOR, 0.0)
                .with_opacity(0.1),
        );
        let hub_label = scene.add(
            SceneObject::new(ObjectKind::HubLabel)
                .with_parent(hub)
                .at(Vec3::new(0.0, 1.8, 0.0))
                .scaled(LABEL_SIZE_LARGE)
                .with_text(HUB_LABEL),
        );

        let label_size = Vec3::from_array(appearance.label_size);
        let mut rings = Vec::with_capacity(catalog.layer_count());
        let mut points = Vec::with_capacity(catalog.sub_item_count());
        let mut owners = HashMap::new();

        for layer in catalog.layer_ids() {
            let entry = catalog.layer(layer);
            let radius = layout.base_radius + layer.index() as f32 * layout.ring_spacing;

            let ring = scene.add(
                SceneObject::new(ObjectKind::Ring(layer))
                    .colored(entry.color, entry.emissive, appearance.idle_emphasis)
                    .with_opacity(appearance.idle_opacity)
                    .hidden(),
            );
            let label = scene.add(
                SceneObject::new(ObjectKind::RingLabel(layer))
                    .with_parent(ring)
                    .at(Vec3::new(radius + 1.5, 0.5, 0.0))
                    .scaled(LABEL_SIZE_LARGE)
                    .with_text(&entry.label)
                    .hidden(),
            );
            rings.push(RingHandles {
                ring,
                label,
                radius,
            });

            let count = entry.functions.len().max(1) as f32;
            for sub_item in catalog.sub_items_of(layer) {
                let item = catalog.sub_item(sub_item);
                let nominal = item.ordinal as f32 / count * std::f32::consts::TAU;
                let angle = nominal + rng.random_range(-jitter..=jitter);
                let distance = radius + rng.random_range(-jitter..=jitter);
                let height = rng.random_range(-jitter..=jitter);
                let position = Vec3::new(distance * angle.cos(), height, distance * angle.sin());

                let point = scene.add(
                    SceneObject::new(ObjectKind::Point(sub_item))
                        .with_parent(ring)
                        .at(position)
                        .colored(entry.color, entry.color, POINT_EMPHASIS)
                        .pickable(POINT_RADIUS * POINT_HIT_FACTOR),
                );
                let label = scene.add(
                    SceneObject::new(ObjectKind::PointLabel(sub_item))
                        .with_parent(point)
                        .at(Vec3::new(0.0, 0.65, 0.0))
                        .scaled(label_size)
                        .with_text(&item.text)
                        .pickable(LABEL_HIT_RADIUS)
                        .hidden(),
                );

                owners.insert(point, sub_item);
                owners.insert(label, sub_item);
                points.push(PointHandles {
                    point,
                    label,
                    angle: position.z.atan2(position.x),
                });
            }
        }

        tracing::debug!(
            "Built scene with {} objects ({} rings, {} points)",
            scene.len(),
            rings.len(),
            points.len()
        );

        let layout = SceneLayout {
            hub,
            hub_halo,
            hub_label,
            rings,
            points,
            owners,
        };
        (scene, layout)
    }

    pub fn ring(&self, layer: LayerId) -> ObjectId {
        self.rings[layer.index()].ring
    }

    pub fn ring_label(&self, layer: LayerId) -> ObjectId {
        self.rings[layer.index()].label
    }

    /// Nominal radius of a layer's ring.
    pub fn ring_radius(&self, layer: LayerId) -> f32 {
        self.rings[layer.index()].radius
    }

    pub fn point(&self, sub_item: SubItemId) -> ObjectId {
        self.points[sub_item.index()].point
    }

    pub fn point_label(&self, sub_item: SubItemId) -> ObjectId {
        self.points[sub_item.index()].label
    }

    /// Angular position of a sub-item on its ring, in (-π, π].
    pub fn angle(&self, sub_item: SubItemId) -> f32 {
        self.points[sub_item.index()].angle
    }

    /// The sub-item an object belongs to (its point or its label).
    pub fn sub_item_for(&self, object: ObjectId) -> Option<SubItemId> {
        self.owners.get(&object).copied()
    }

    /// Resolve a pick, walking up the ancestry, to a sub-item.
    pub fn resolve(&self, pick: &Pick) -> Option<SubItemId> {
        pick.chain().find_map(|id| self.sub_item_for(id))
    }

    /// Sub-items of `layer` by ascending angle; ties keep catalog order.
    pub fn reveal_order(&self, catalog: &ContentCatalog, layer: LayerId) -> Vec<SubItemId> {
        let mut order: Vec<SubItemId> = catalog.sub_items_of(layer).collect();
        order.sort_by(|a, b| self.angle(*a).total_cmp(&self.angle(*b)));
        order
    }
}
