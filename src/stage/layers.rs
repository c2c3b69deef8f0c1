//! Layer activation, deactivation and reset.

use bevy::math::Vec3;

use super::easing::Easing;
use super::hover::HoverHighlightController;
use super::panel::InfoPanelPresenter;
use super::schedule::ScheduledReveal;
use super::tween::{Channel, Tween};
use super::Deps;
use crate::config::{AppearanceConfig, CameraConfig, TimingConfig};
use crate::models::{LayerId, Topic};

/// Drives the Idle / LayerActive state machine.
#[derive(Debug, Clone)]
pub struct LayerActivationController {
    timing: TimingConfig,
    appearance: AppearanceConfig,
    camera: CameraConfig,
}

impl LayerActivationController {
    pub fn new(timing: &TimingConfig, appearance: &AppearanceConfig, camera: &CameraConfig) -> Self {
        Self {
            timing: timing.clone(),
            appearance: appearance.clone(),
            camera: camera.clone(),
        }
    }

    /// Make `layer` the active layer.
    ///
    /// Returns `false` without touching anything if it is already active.
    pub(crate) fn activate(
        &self,
        deps: &mut Deps<'_>,
        hover: &mut HoverHighlightController,
        layer: LayerId,
    ) -> bool {
        if deps.state.active_layer == Some(layer) {
            tracing::debug!("Layer '{}' already active", deps.catalog.layer(layer).key);
            return false;
        }

        if let Some(previous) = deps.state.active_layer {
            hover.clear(deps);
            self.deactivate(deps, previous);
        }

        let generation = deps.reveals.next_generation();
        deps.state.active_layer = Some(layer);
        tracing::info!(
            "Activating layer '{}' (generation {})",
            deps.catalog.layer(layer).key,
            generation
        );

        self.reveal_layer(deps, layer);
        self.pulse(deps, layer);
        self.schedule_reveals(deps, layer);

        let anchor = deps.scene.world_position(deps.layout.ring(layer));
        self.move_camera(deps, anchor + Vec3::from_array(self.camera.focus_offset), anchor);

        *deps.panel = InfoPanelPresenter::present(deps.catalog, Topic::Layer(layer));
        true
    }

    /// Return to the overview with no active layer.
    pub(crate) fn reset(&self, deps: &mut Deps<'_>, hover: &mut HoverHighlightController) {
        if let Some(active) = deps.state.active_layer {
            self.deactivate(deps, active);
        }
        deps.state.active_layer = None;
        let generation = deps.reveals.next_generation();
        tracing::info!("Reset to overview (generation {})", generation);

        self.move_camera(
            deps,
            Vec3::from_array(self.camera.home_eye),
            Vec3::from_array(self.camera.home_focus),
        );
        *deps.panel = InfoPanelPresenter::present(deps.catalog, Topic::Overview);
        hover.clear(deps);
    }

    /// Pop in the label of a due reveal.
    ///
    /// Reveals from a stale generation or for a layer that is no longer
    /// active are ignored.
    pub(crate) fn fire_reveal(&self, deps: &mut Deps<'_>, reveal: ScheduledReveal) {
        if reveal.generation != deps.reveals.generation()
            || deps.state.active_layer != Some(reveal.layer)
        {
            tracing::debug!("Discarding stale reveal (generation {})", reveal.generation);
            return;
        }

        let label = deps.layout.point_label(reveal.sub_item);
        deps.scene.set_visible(label, true);
        deps.scene.set_scale(label, Vec3::ZERO);
        deps.animator.schedule(
            Tween::scale(label, Vec3::from_array(self.appearance.label_size), self.timing.label())
                .from(Vec3::ZERO)
                .easing(Easing::BackOut),
        );
        tracing::debug!(
            "Revealed '{}' at {:?}",
            deps.catalog.sub_item(reveal.sub_item).text,
            deps.now
        );
    }

    fn deactivate(&self, deps: &mut Deps<'_>, layer: LayerId) {
        let ring = deps.layout.ring(layer);
        deps.animator.cancel(Channel::Opacity(ring));
        deps.animator.cancel(Channel::Emphasis(ring));
        deps.animator.schedule(
            Tween::opacity(ring, self.appearance.idle_opacity, self.timing.fade())
                .easing(Easing::QuadraticOut)
                .hide_on_complete(ring),
        );
        deps.animator.schedule(
            Tween::emphasis(ring, self.appearance.idle_emphasis, self.timing.fade())
                .easing(Easing::QuadraticOut),
        );

        for sub_item in deps.catalog.sub_items_of(layer) {
            let point = deps.layout.point(sub_item);
            let label = deps.layout.point_label(sub_item);
            deps.animator.schedule(
                Tween::scale(point, Vec3::ONE, self.timing.settle()).easing(Easing::QuadraticOut),
            );
            deps.animator.cancel(Channel::Scale(label));
            deps.scene.set_visible(label, false);
        }
        deps.scene.set_visible(deps.layout.ring_label(layer), false);

        let dropped = deps.reveals.cancel_layer(layer);
        tracing::debug!(
            "Deactivated layer '{}' ({} pending reveal(s) dropped)",
            deps.catalog.layer(layer).key,
            dropped
        );
    }

    fn reveal_layer(&self, deps: &mut Deps<'_>, layer: LayerId) {
        let ring = deps.layout.ring(layer);
        // A fade-out still running from an earlier deactivation would hide
        // the ring on completion.
        deps.animator.cancel(Channel::Opacity(ring));
        deps.animator.cancel(Channel::Emphasis(ring));

        deps.scene.set_visible(ring, true);
        deps.scene.set_visible(deps.layout.ring_label(layer), true);
        for sub_item in deps.catalog.sub_items_of(layer) {
            deps.scene.set_visible(deps.layout.point(sub_item), true);
            deps.scene.set_visible(deps.layout.point_label(sub_item), false);
        }

        deps.animator.schedule(
            Tween::opacity(ring, self.appearance.active_opacity, self.timing.fade())
                .easing(Easing::QuadraticOut),
        );
        deps.animator.schedule(
            Tween::emphasis(ring, self.appearance.active_emphasis, self.timing.fade())
                .easing(Easing::QuadraticOut),
        );
    }

    fn pulse(&self, deps: &mut Deps<'_>, layer: LayerId) {
        let ring = deps.layout.ring(layer);
        deps.animator.cancel(Channel::Scale(ring));
        let back = Tween::scale(ring, Vec3::ONE, self.timing.pulse()).easing(Easing::QuadraticOut);
        deps.animator.schedule(
            Tween::scale(ring, Vec3::splat(self.appearance.pulse_scale), self.timing.pulse())
                .easing(Easing::QuadraticOut)
                .then(back),
        );
    }

    fn schedule_reveals(&self, deps: &mut Deps<'_>, layer: LayerId) {
        let interval = self.timing.reveal_interval();
        for (i, sub_item) in deps.layout.reveal_order(deps.catalog, layer).into_iter().enumerate() {
            deps.reveals.schedule(deps.now, interval * i as u32, layer, sub_item);
        }
        tracing::trace!("Scheduled {} reveal(s)", deps.reveals.pending().len());
    }

    fn move_camera(&self, deps: &mut Deps<'_>, eye: Vec3, focus: Vec3) {
        let duration = self.timing.camera();
        deps.animator.cancel(Channel::CameraEye);
        deps.animator.cancel(Channel::CameraFocus);
        deps.animator
            .schedule(Tween::camera_eye(eye, duration).easing(Easing::QuadraticOut));
        deps.animator
            .schedule(Tween::camera_focus(focus, duration).easing(Easing::QuadraticOut));
    }
}
