//! Hover highlighting of the active layer's points.

use std::time::Duration;

use bevy::math::Vec3;

use super::scene::PickRay;
use super::tween::Tween;
use super::Deps;
use crate::config::{AppearanceConfig, TimingConfig};
use crate::models::{Rgb, SubItemId};

/// Tracks the hovered sub-item and its displaced emissive color.
///
/// At most one point is highlighted and outlined at a time, and only points
/// of the active layer qualify.
#[derive(Debug, Clone)]
pub struct HoverHighlightController {
    duration: Duration,
    hover_scale: f32,
    highlight: Rgb,
    saved_emissive: Option<Rgb>,
}

impl HoverHighlightController {
    pub fn new(timing: &TimingConfig, appearance: &AppearanceConfig) -> Self {
        Self {
            duration: timing.hover(),
            hover_scale: appearance.hover_scale,
            highlight: appearance.highlight_color,
            saved_emissive: None,
        }
    }

    /// Hit-test `ray` and move the highlight accordingly.
    ///
    /// Returns `true` if the hovered sub-item changed.
    pub(crate) fn on_pointer_move(&mut self, deps: &mut Deps<'_>, ray: &PickRay) -> bool {
        let active = deps.state.active_layer;
        let target = deps
            .scene
            .pick(ray)
            .and_then(|pick| deps.layout.resolve(&pick))
            .filter(|sub| Some(deps.catalog.layer_of(*sub)) == active);

        if target == deps.state.hovered {
            return false;
        }

        if let Some(previous) = deps.state.hovered {
            self.revert(deps, previous);
        }

        match target {
            Some(sub) => self.highlight(deps, sub),
            None => {
                deps.state.hovered = None;
                deps.scene.set_outlined(None);
            }
        }
        true
    }

    /// Drop the highlight, if any.
    pub(crate) fn clear(&mut self, deps: &mut Deps<'_>) {
        if let Some(previous) = deps.state.hovered.take() {
            self.revert(deps, previous);
        }
        deps.scene.set_outlined(None);
    }

    fn highlight(&mut self, deps: &mut Deps<'_>, sub: SubItemId) {
        let point = deps.layout.point(sub);
        self.saved_emissive = Some(deps.scene.emissive(point));
        deps.state.hovered = Some(sub);
        deps.scene.set_emissive(point, self.highlight);
        deps.animator.schedule(Tween::scale(
            point,
            Vec3::splat(self.hover_scale),
            self.duration,
        ));
        deps.scene.set_outlined(Some(point));
        tracing::debug!("Hovering '{}'", deps.catalog.sub_item(sub).text);
    }

    fn revert(&mut self, deps: &mut Deps<'_>, sub: SubItemId) {
        let point = deps.layout.point(sub);
        if let Some(color) = self.saved_emissive.take() {
            deps.scene.set_emissive(point, color);
        }
        deps.animator
            .schedule(Tween::scale(point, Vec3::ONE, self.duration));
        deps.scene.set_outlined(None);
        tracing::debug!("Released '{}'", deps.catalog.sub_item(sub).text);
    }
}
