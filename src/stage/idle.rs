//! Ambient motion applied every tick.

use std::time::Duration;

use super::layout::SceneLayout;
use super::scene::SceneModel;
use crate::models::{ContentCatalog, LayerId};

/// Continuous hub spin plus spin and bobbing of the active ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleMotion {
    /// Hub rotation in rad/s.
    pub hub_spin: f32,
    /// Active ring rotation in rad/s.
    pub ring_spin: f32,
    pub bob_amplitude: f32,
    /// Angular frequency of the bob in rad/s.
    pub bob_frequency: f32,
    /// Phase offset between successive points.
    pub bob_phase: f32,
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self {
            hub_spin: 0.12,
            ring_spin: 0.06,
            bob_amplitude: 0.3,
            bob_frequency: 2.0,
            bob_phase: 0.5,
        }
    }
}

impl IdleMotion {
    pub fn apply(
        &self,
        scene: &mut SceneModel,
        layout: &SceneLayout,
        catalog: &ContentCatalog,
        active: Option<LayerId>,
        elapsed: Duration,
        dt: Duration,
    ) {
        let dt = dt.as_secs_f32();
        scene.object_mut(layout.hub).spin += self.hub_spin * dt;

        let Some(layer) = active else {
            return;
        };
        scene.object_mut(layout.ring(layer)).spin += self.ring_spin * dt;

        let t = elapsed.as_secs_f32();
        for (i, sub_item) in catalog.sub_items_of(layer).enumerate() {
            let phase = self.bob_frequency * t + self.bob_phase * i as f32;
            scene.object_mut(layout.point(sub_item)).position.y = phase.sin() * self.bob_amplitude;
        }
    }
}
