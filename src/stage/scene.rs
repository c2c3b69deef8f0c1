//! Scene graph contract and the in-memory scene model.
//!
//! [`SceneGraph`] is everything the interaction core needs from a renderer:
//! visibility, opacity / emphasis / emissive mutation, scale, world-space
//! anchors, ray picking with ancestry, the camera rig and the single-object
//! outline selection. [`SceneModel`] implements it with plain data; the Bevy
//! viewer mirrors that data into ECS transforms and materials every frame.

use bevy::math::{Quat, Vec3};

use crate::models::{LayerId, Rgb, SubItemId};

/// Handle of one render object in a [`SceneModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a render object depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Central finance box.
    Hub,
    /// Translucent glow shell around the hub.
    HubHalo,
    /// Text above the hub.
    HubLabel,
    /// Torus ring of a layer.
    Ring(LayerId),
    /// Text next to a ring.
    RingLabel(LayerId),
    /// Sphere of a sub-item, child of its ring.
    Point(SubItemId),
    /// Text above a point, child of the point.
    PointLabel(SubItemId),
}

/// Render state of one object. Transform fields are relative to the parent.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub parent: Option<ObjectId>,
    pub position: Vec3,
    /// Rotation about the Y axis, radians.
    pub spin: f32,
    pub scale: Vec3,
    pub visible: bool,
    pub opacity: f32,
    pub color: Rgb,
    pub emissive: Rgb,
    /// Emissive intensity.
    pub emphasis: f32,
    /// Hit-test sphere radius at unit scale; `None` when not pickable.
    pub pick_radius: Option<f32>,
    /// Text of label objects.
    pub text: Option<String>,
}

impl SceneObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            parent: None,
            position: Vec3::ZERO,
            spin: 0.0,
            scale: Vec3::ONE,
            visible: true,
            opacity: 1.0,
            color: Rgb::WHITE,
            emissive: Rgb::BLACK,
            emphasis: 1.0,
            pick_radius: None,
            text: None,
        }
    }

    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn colored(mut self, color: Rgb, emissive: Rgb, emphasis: f32) -> Self {
        self.color = color;
        self.emissive = emissive;
        self.emphasis = emphasis;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn pickable(mut self, radius: f32) -> Self {
        self.pick_radius = Some(radius);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Camera eye and orbit focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub focus: Vec3,
}

impl CameraRig {
    pub fn new(eye: Vec3, focus: Vec3) -> Self {
        Self { eye, focus }
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.focus).length()
    }

    /// Rotate the eye around the focus.
    ///
    /// `yaw` turns around the vertical axis, `pitch` tilts towards the pole.
    /// The polar angle stays within `(0, max_polar]` so the eye never passes
    /// over the pole or below the ground plane.
    pub fn orbit(&mut self, yaw: f32, pitch: f32, max_polar: f32) {
        let offset = self.eye - self.focus;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let polar = (polar - pitch).clamp(0.01, max_polar);
        let azimuth = azimuth + yaw;

        self.eye = self.focus
            + radius
                * Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                );
    }

    /// Move the eye along the view axis, keeping the distance within `[min, max]`.
    pub fn zoom(&mut self, delta: f32, min: f32, max: f32) {
        let offset = self.eye - self.focus;
        let direction = offset.try_normalize().unwrap_or(Vec3::Z);
        let distance = (offset.length() - delta).clamp(min, max);
        self.eye = self.focus + direction * distance;
    }
}

/// A world-space ray used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    /// Unit direction (zero if constructed from a zero vector).
    pub direction: Vec3,
}

impl PickRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `origin` through `target`.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }
}

/// Nearest hit of a ray, with the chain of parents above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub object: ObjectId,
    /// Distance along the ray to the hit.
    pub distance: f32,
    /// Parents of `object`, nearest first.
    pub ancestry: Vec<ObjectId>,
}

impl Pick {
    /// The hit object followed by its ancestors.
    pub fn chain(&self) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::once(self.object).chain(self.ancestry.iter().copied())
    }
}

/// Render collaborator contract used by the interaction core.
pub trait SceneGraph {
    fn is_visible(&self, id: ObjectId) -> bool;
    fn set_visible(&mut self, id: ObjectId, visible: bool);

    fn opacity(&self, id: ObjectId) -> f32;
    fn set_opacity(&mut self, id: ObjectId, opacity: f32);

    /// Emissive intensity.
    fn emphasis(&self, id: ObjectId) -> f32;
    fn set_emphasis(&mut self, id: ObjectId, emphasis: f32);

    fn emissive(&self, id: ObjectId) -> Rgb;
    fn set_emissive(&mut self, id: ObjectId, color: Rgb);

    fn scale(&self, id: ObjectId) -> Vec3;
    fn set_scale(&mut self, id: ObjectId, scale: Vec3);

    /// World-space position of the object.
    fn world_position(&self, id: ObjectId) -> Vec3;

    /// Nearest visible pickable object hit by `ray`.
    fn pick(&self, ray: &PickRay) -> Option<Pick>;

    fn camera(&self) -> CameraRig;
    fn set_camera(&mut self, camera: CameraRig);

    /// The object drawn with an outline, if any.
    fn outlined(&self) -> Option<ObjectId>;
    fn set_outlined(&mut self, id: Option<ObjectId>);
}

/// World-space transform of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub spin: f32,
    pub scale: Vec3,
}

/// In-memory scene: an id-indexed object table plus camera and viewport.
#[derive(Debug, Clone)]
pub struct SceneModel {
    objects: Vec<SceneObject>,
    camera: CameraRig,
    outlined: Option<ObjectId>,
    viewport: (f32, f32),
}

impl SceneModel {
    pub fn new(camera: CameraRig) -> Self {
        Self {
            objects: Vec::new(),
            camera,
            outlined: None,
            viewport: (1.0, 1.0),
        }
    }

    /// Add an object; its parent must already exist.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        debug_assert!(object.parent.is_none_or(|p| p.0 < self.objects.len()));
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.0]
    }

    /// All objects with their ids, in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(idx, obj)| (ObjectId(idx), obj))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Visible itself and through every ancestor.
    pub fn is_effectively_visible(&self, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let obj = &self.objects[id.0];
            if !obj.visible {
                return false;
            }
            current = obj.parent;
        }
        true
    }

    /// Compose the transform chain from the root down to `id`.
    pub fn world_transform(&self, id: ObjectId) -> WorldTransform {
        let obj = &self.objects[id.0];
        match obj.parent {
            None => WorldTransform {
                position: obj.position,
                spin: obj.spin,
                scale: obj.scale,
            },
            Some(parent) => {
                let base = self.world_transform(parent);
                let rotation = Quat::from_rotation_y(base.spin);
                WorldTransform {
                    position: base.position + rotation * (obj.position * base.scale),
                    spin: base.spin + obj.spin,
                    scale: base.scale * obj.scale,
                }
            }
        }
    }

    /// Parents of `id`, nearest first.
    pub fn ancestry(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let mut current = self.objects[id.0].parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.objects[parent.0].parent;
        }
        chain
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width.max(1.0), height.max(1.0));
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.0 / self.viewport.1
    }
}

impl SceneGraph for SceneModel {
    fn is_visible(&self, id: ObjectId) -> bool {
        self.objects[id.0].visible
    }

    fn set_visible(&mut self, id: ObjectId, visible: bool) {
        self.objects[id.0].visible = visible;
    }

    fn opacity(&self, id: ObjectId) -> f32 {
        self.objects[id.0].opacity
    }

    fn set_opacity(&mut self, id: ObjectId, opacity: f32) {
        self.objects[id.0].opacity = opacity;
    }

    fn emphasis(&self, id: ObjectId) -> f32 {
        self.objects[id.0].emphasis
    }

    fn set_emphasis(&mut self, id: ObjectId, emphasis: f32) {
        self.objects[id.0].emphasis = emphasis;
    }

    fn emissive(&self, id: ObjectId) -> Rgb {
        self.objects[id.0].emissive
    }

    fn set_emissive(&mut self, id: ObjectId, color: Rgb) {
        self.objects[id.0].emissive = color;
    }

    fn scale(&self, id: ObjectId) -> Vec3 {
        self.objects[id.0].scale
    }

    fn set_scale(&mut self, id: ObjectId, scale: Vec3) {
        self.objects[id.0].scale = scale;
    }

    fn world_position(&self, id: ObjectId) -> Vec3 {
        self.world_transform(id).position
    }

    fn pick(&self, ray: &PickRay) -> Option<Pick> {
        if ray.direction == Vec3::ZERO {
            return None;
        }

        let mut closest: Option<(ObjectId, f32)> = None;
        for (id, obj) in self.objects() {
            let Some(radius) = obj.pick_radius else {
                continue;
            };
            if !self.is_effectively_visible(id) {
                continue;
            }

            let world = self.world_transform(id);
            let radius = radius * world.scale.max_element();
            let to_center = world.position - ray.origin;
            let along = to_center.dot(ray.direction);
            if along <= 0.0 {
                continue;
            }
            let miss_sq = to_center.length_squared() - along * along;
            if miss_sq > radius * radius {
                continue;
            }
            let distance = (along - (radius * radius - miss_sq).sqrt()).max(0.0);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((id, distance));
            }
        }

        closest.map(|(object, distance)| Pick {
            object,
            distance,
            ancestry: self.ancestry(object),
        })
    }

    fn camera(&self) -> CameraRig {
        self.camera
    }

    fn set_camera(&mut self, camera: CameraRig) {
        self.camera = camera;
    }

    fn outlined(&self) -> Option<ObjectId> {
        self.outlined
    }

    fn set_outlined(&mut self, id: Option<ObjectId>) {
        self.outlined = id;
    }
}
