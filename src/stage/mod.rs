//! Headless interaction core.
//!
//! A [`Stage`] owns the catalog, the scene model, the animation engine, the
//! reveal queue and the activation state, and moves them forward one tick at
//! a time. The Bevy viewer and the `replay` command both drive a `Stage`; the
//! viewer only mirrors the scene model onto entities.

pub mod easing;
pub mod hover;
pub mod idle;
pub mod layers;
pub mod layout;
pub mod panel;
pub mod replay;
pub mod router;
pub mod scene;
pub mod schedule;
pub mod state;
pub mod tween;

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{ContentCatalog, LayerId, SubItemId, Topic};

pub use easing::Easing;
pub use hover::HoverHighlightController;
pub use idle::IdleMotion;
pub use layers::LayerActivationController;
pub use layout::SceneLayout;
pub use panel::{emphasis_spans, InfoPanelPresenter, PanelKind, PanelView, Span};
pub use replay::{ReplayAction, ReplayScript, ReplayStep};
pub use router::InputEvent;
pub use scene::{CameraRig, ObjectId, ObjectKind, Pick, PickRay, SceneGraph, SceneModel, SceneObject};
pub use schedule::{RevealQueue, ScheduledReveal};
pub use state::ActivationState;
pub use tween::{Animator, Channel, Tween, TweenEngine, TweenValue};

// Keeps the orbiting eye just above the ground plane.
const MAX_POLAR: f32 = FRAC_PI_2 - 0.05;

/// Borrowed collaborators handed to the controllers.
pub(crate) struct Deps<'a> {
    pub catalog: &'a ContentCatalog,
    pub layout: &'a SceneLayout,
    pub scene: &'a mut dyn SceneGraph,
    pub animator: &'a mut dyn Animator,
    pub reveals: &'a mut RevealQueue,
    pub state: &'a mut ActivationState,
    pub panel: &'a mut PanelView,
    pub now: Duration,
}

/// One interactive session.
#[derive(Debug, Clone)]
pub struct Stage {
    catalog: ContentCatalog,
    config: Config,
    scene: SceneModel,
    layout: SceneLayout,
    tweens: TweenEngine,
    reveals: RevealQueue,
    state: ActivationState,
    panel: PanelView,
    layers: LayerActivationController,
    hover: HoverHighlightController,
    idle: IdleMotion,
    clock: Duration,
}

impl Stage {
    /// Build the scene for `catalog` in the Idle state with the overview panel.
    pub fn new(catalog: ContentCatalog, config: &Config) -> Self {
        let camera = CameraRig::new(
            Vec3::from_array(config.camera.home_eye),
            Vec3::from_array(config.camera.home_focus),
        );
        let (mut scene, layout) =
            SceneLayout::build(&catalog, &config.layout, &config.appearance, camera);
        scene.set_viewport(config.window.width, config.window.height);
        let panel = InfoPanelPresenter::present(&catalog, Topic::Overview);

        tracing::info!(
            "Stage ready: {} layer(s), {} sub-item(s)",
            catalog.layer_count(),
            catalog.sub_item_count()
        );

        Self {
            layers: LayerActivationController::new(
                &config.timing,
                &config.appearance,
                &config.camera,
            ),
            hover: HoverHighlightController::new(&config.timing, &config.appearance),
            idle: IdleMotion::default(),
            catalog,
            config: config.clone(),
            scene,
            layout,
            tweens: TweenEngine::new(),
            reveals: RevealQueue::new(),
            state: ActivationState::default(),
            panel,
            clock: Duration::ZERO,
        }
    }

    fn parts(
        &mut self,
    ) -> (
        Deps<'_>,
        &LayerActivationController,
        &mut HoverHighlightController,
    ) {
        let Stage {
            catalog,
            scene,
            layout,
            tweens,
            reveals,
            state,
            panel,
            layers,
            hover,
            clock,
            ..
        } = self;
        let deps = Deps {
            catalog,
            layout,
            scene,
            animator: tweens,
            reveals,
            state,
            panel,
            now: *clock,
        };
        (deps, &*layers, hover)
    }

    /// Route one input event. Returns `true` if the state changed.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Activate(layer) => self.activate(layer),
            InputEvent::Reset => {
                self.reset();
                true
            }
            InputEvent::PointerMoved(ray) => self.pointer_moved(&ray),
            InputEvent::Resized { width, height } => {
                self.scene.set_viewport(width, height);
                tracing::trace!("Viewport resized to {}x{}", width, height);
                false
            }
        }
    }

    pub fn activate(&mut self, layer: LayerId) -> bool {
        let (mut deps, layers, hover) = self.parts();
        layers.activate(&mut deps, hover, layer)
    }

    pub fn reset(&mut self) {
        let (mut deps, layers, hover) = self.parts();
        layers.reset(&mut deps, hover);
    }

    pub fn pointer_moved(&mut self, ray: &PickRay) -> bool {
        let (mut deps, _, hover) = self.parts();
        hover.on_pointer_move(&mut deps, ray)
    }

    /// Advance the session by `dt`: fire due reveals, advance tweens, then
    /// apply idle motion.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;

        for reveal in self.reveals.take_due(self.clock) {
            let (mut deps, layers, _) = self.parts();
            layers.fire_reveal(&mut deps, reveal);
        }

        self.tweens.advance(dt, &mut self.scene);

        if self.config.layout.idle_motion {
            self.idle.apply(
                &mut self.scene,
                &self.layout,
                &self.catalog,
                self.state.active_layer,
                self.clock,
                dt,
            );
        }
        tracing::trace!("Tick at {:?}, {} tween(s) running", self.clock, self.tweens.running());
    }

    /// Rotate the camera around its focus.
    pub fn orbit_camera(&mut self, yaw: f32, pitch: f32) {
        let mut camera = self.scene.camera();
        camera.orbit(yaw, pitch, MAX_POLAR);
        self.scene.set_camera(camera);
    }

    /// Move the camera towards (positive) or away from its focus.
    pub fn zoom_camera(&mut self, delta: f32) {
        let mut camera = self.scene.camera();
        camera.zoom(
            delta,
            self.config.camera.min_distance,
            self.config.camera.max_distance,
        );
        self.scene.set_camera(camera);
    }

    /// A ray that hits `sub_item` from just above it.
    pub fn ray_onto(&self, sub_item: SubItemId) -> PickRay {
        let target = self.scene.world_position(self.layout.point(sub_item));
        PickRay::towards(target + Vec3::Y * 2.0, target)
    }

    /// A ray from the camera that misses every object.
    pub fn ray_away(&self) -> PickRay {
        let camera = self.scene.camera();
        PickRay::new(camera.eye, camera.eye - camera.focus)
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn panel(&self) -> &PanelView {
        &self.panel
    }

    pub fn reveals(&self) -> &RevealQueue {
        &self.reveals
    }

    pub fn tweens(&self) -> &TweenEngine {
        &self.tweens
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Whether the label of `sub_item` is currently shown.
    pub fn label_shown(&self, sub_item: SubItemId) -> bool {
        self.scene
            .is_effectively_visible(self.layout.point_label(sub_item))
    }

    /// Serializable summary of the session.
    pub fn snapshot(&self) -> StageSnapshot {
        let camera = self.scene.camera();
        let text = |sub: SubItemId| self.catalog.sub_item(sub).text.clone();

        StageSnapshot {
            clock_ms: self.clock.as_millis() as u64,
            active_layer: self
                .state
                .active_layer
                .map(|l| self.catalog.layer(l).key.clone()),
            hovered: self.state.hovered.map(text),
            outlined: self
                .scene
                .outlined()
                .and_then(|id| self.layout.sub_item_for(id))
                .map(text),
            camera: CameraSnapshot {
                eye: camera.eye.to_array(),
                focus: camera.focus.to_array(),
            },
            layers: self
                .catalog
                .layer_ids()
                .map(|layer| {
                    let ring = self.layout.ring(layer);
                    LayerSnapshot {
                        key: self.catalog.layer(layer).key.clone(),
                        visible: self.scene.is_visible(ring),
                        opacity: self.scene.opacity(ring),
                        emphasis: self.scene.emphasis(ring),
                        scale: self.scene.scale(ring).x,
                    }
                })
                .collect(),
            labels_shown: self
                .catalog
                .sub_item_ids()
                .filter(|sub| self.label_shown(*sub))
                .map(text)
                .collect(),
            pending_reveals: self
                .reveals
                .pending()
                .iter()
                .map(|r| PendingReveal {
                    item: text(r.sub_item),
                    delay_ms: r.delay.as_millis() as u64,
                    due_ms: r.due.as_millis() as u64,
                })
                .collect(),
            panel: self.panel.clone(),
        }
    }
}

/// Point-in-time summary of a [`Stage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub clock_ms: u64,
    pub active_layer: Option<String>,
    pub hovered: Option<String>,
    pub outlined: Option<String>,
    pub camera: CameraSnapshot,
    pub layers: Vec<LayerSnapshot>,
    pub labels_shown: Vec<String>,
    pub pending_reveals: Vec<PendingReveal>,
    pub panel: PanelView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSnapshot {
    pub eye: [f32; 3],
    pub focus: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub key: String,
    pub visible: bool,
    pub opacity: f32,
    pub emphasis: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReveal {
    pub item: String,
    pub delay_ms: u64,
    pub due_ms: u64,
}
