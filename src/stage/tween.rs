//! Time-boxed property interpolation.
//!
//! A [`Tween`] drives one [`Channel`] (a property of a scene object or of the
//! camera) from its current value to a target over a fixed duration with an
//! easing curve. Tweens on the same channel are not exclusive: they are
//! applied in schedule order, so the most recently scheduled one wins.

use std::time::Duration;

use bevy::math::Vec3;

use super::easing::Easing;
use super::scene::{CameraRig, ObjectId, SceneGraph};

/// An animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Opacity(ObjectId),
    Emphasis(ObjectId),
    Scale(ObjectId),
    CameraEye,
    CameraFocus,
}

/// Value carried by a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vector(Vec3),
}

impl From<f32> for TweenValue {
    fn from(value: f32) -> Self {
        TweenValue::Scalar(value)
    }
}

impl From<Vec3> for TweenValue {
    fn from(value: Vec3) -> Self {
        TweenValue::Vector(value)
    }
}

impl TweenValue {
    fn lerp(self, to: TweenValue, t: f32) -> TweenValue {
        match (self, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(a + (b - a) * t),
            (TweenValue::Vector(a), TweenValue::Vector(b)) => TweenValue::Vector(a.lerp(b, t)),
            (_, to) => to,
        }
    }
}

impl Channel {
    fn read(self, scene: &dyn SceneGraph) -> TweenValue {
        match self {
            Channel::Opacity(id) => scene.opacity(id).into(),
            Channel::Emphasis(id) => scene.emphasis(id).into(),
            Channel::Scale(id) => scene.scale(id).into(),
            Channel::CameraEye => scene.camera().eye.into(),
            Channel::CameraFocus => scene.camera().focus.into(),
        }
    }

    fn write(self, scene: &mut dyn SceneGraph, value: TweenValue) {
        match (self, value) {
            (Channel::Opacity(id), TweenValue::Scalar(v)) => scene.set_opacity(id, v),
            (Channel::Emphasis(id), TweenValue::Scalar(v)) => scene.set_emphasis(id, v),
            (Channel::Scale(id), TweenValue::Vector(v)) => scene.set_scale(id, v),
            (Channel::CameraEye, TweenValue::Vector(v)) => {
                let camera = scene.camera();
                scene.set_camera(CameraRig::new(v, camera.focus));
            }
            (Channel::CameraFocus, TweenValue::Vector(v)) => {
                let camera = scene.camera();
                scene.set_camera(CameraRig::new(camera.eye, v));
            }
            (channel, value) => {
                tracing::warn!("Ignoring {:?} written to {:?}", value, channel);
            }
        }
    }
}

/// Action run when a tween reaches its target.
#[derive(Debug, Clone, PartialEq)]
pub enum OnComplete {
    /// Hide an object.
    Hide(ObjectId),
    /// Start another tween.
    Then(Box<Tween>),
}

/// A scheduled interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    channel: Channel,
    from: Option<TweenValue>,
    to: TweenValue,
    duration: Duration,
    easing: Easing,
    on_complete: Option<OnComplete>,
}

impl Tween {
    fn new(channel: Channel, to: TweenValue, duration: Duration) -> Self {
        Self {
            channel,
            from: None,
            to,
            duration,
            easing: Easing::Linear,
            on_complete: None,
        }
    }

    pub fn opacity(id: ObjectId, to: f32, duration: Duration) -> Self {
        Self::new(Channel::Opacity(id), to.into(), duration)
    }

    pub fn emphasis(id: ObjectId, to: f32, duration: Duration) -> Self {
        Self::new(Channel::Emphasis(id), to.into(), duration)
    }

    pub fn scale(id: ObjectId, to: Vec3, duration: Duration) -> Self {
        Self::new(Channel::Scale(id), to.into(), duration)
    }

    pub fn camera_eye(to: Vec3, duration: Duration) -> Self {
        Self::new(Channel::CameraEye, to.into(), duration)
    }

    pub fn camera_focus(to: Vec3, duration: Duration) -> Self {
        Self::new(Channel::CameraFocus, to.into(), duration)
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start from `value` instead of the channel's current value.
    pub fn from(mut self, value: impl Into<TweenValue>) -> Self {
        self.from = Some(value.into());
        self
    }

    /// Start `next` once this tween completes.
    pub fn then(mut self, next: Tween) -> Self {
        self.on_complete = Some(OnComplete::Then(Box::new(next)));
        self
    }

    /// Hide `id` once this tween completes.
    pub fn hide_on_complete(mut self, id: ObjectId) -> Self {
        self.on_complete = Some(OnComplete::Hide(id));
        self
    }
}

/// Animation collaborator contract used by the interaction core.
pub trait Animator {
    /// Start a tween on the next advance.
    fn schedule(&mut self, tween: Tween);

    /// Drop every running tween on `channel`, including their completion
    /// actions. Returns how many were dropped.
    fn cancel(&mut self, channel: Channel) -> usize;

    /// Step every running tween by `dt` and write the results into `scene`.
    fn advance(&mut self, dt: Duration, scene: &mut dyn SceneGraph);

    /// Number of running tweens.
    fn running(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Running {
    tween: Tween,
    start: Option<TweenValue>,
    elapsed: Duration,
}

/// Default [`Animator`] implementation.
#[derive(Debug, Clone, Default)]
pub struct TweenEngine {
    running: Vec<Running>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets of running tweens on `channel`, in schedule order.
    pub fn targets(&self, channel: Channel) -> Vec<TweenValue> {
        self.running
            .iter()
            .filter(|r| r.tween.channel == channel)
            .map(|r| r.tween.to)
            .collect()
    }
}

impl Animator for TweenEngine {
    fn schedule(&mut self, tween: Tween) {
        tracing::trace!("Scheduling {:?} over {:?}", tween.channel, tween.duration);
        self.running.push(Running {
            tween,
            start: None,
            elapsed: Duration::ZERO,
        });
    }

    fn cancel(&mut self, channel: Channel) -> usize {
        let before = self.running.len();
        self.running.retain(|r| r.tween.channel != channel);
        before - self.running.len()
    }

    fn advance(&mut self, dt: Duration, scene: &mut dyn SceneGraph) {
        let mut completed = Vec::new();

        for (idx, run) in self.running.iter_mut().enumerate() {
            let start = match run.start {
                Some(start) => start,
                None => {
                    let start = match run.tween.from {
                        Some(from) => from,
                        None => run.tween.channel.read(&*scene),
                    };
                    run.start = Some(start);
                    start
                }
            };

            run.elapsed += dt;
            let progress = if run.elapsed >= run.tween.duration {
                1.0
            } else {
                run.elapsed.as_secs_f32() / run.tween.duration.as_secs_f32()
            };

            let value = if progress >= 1.0 {
                run.tween.to
            } else {
                start.lerp(run.tween.to, run.tween.easing.evaluate(progress))
            };
            run.tween.channel.write(scene, value);

            if progress >= 1.0 {
                completed.push(idx);
            }
        }

        // Remove back to front so indices stay valid.
        let mut actions = Vec::new();
        for idx in completed.into_iter().rev() {
            let run = self.running.remove(idx);
            if let Some(action) = run.tween.on_complete {
                actions.push(action);
            }
        }

        for action in actions.into_iter().rev() {
            match action {
                OnComplete::Hide(id) => scene.set_visible(id, false),
                OnComplete::Then(next) => self.schedule(*next),
            }
        }
    }

    fn running(&self) -> usize {
        self.running.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::scene::{ObjectKind, SceneModel, SceneObject};

    fn scene_with_object() -> (SceneModel, ObjectId) {
        let mut scene = SceneModel::new(CameraRig::new(Vec3::new(0.0, 8.0, 25.0), Vec3::ZERO));
        let id = scene.add(SceneObject::new(ObjectKind::Hub).with_opacity(0.0));
        (scene, id)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_linear_tween_reaches_target_and_finishes() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::opacity(id, 1.0, ms(100)));

        engine.advance(ms(50), &mut scene);
        assert!((scene.opacity(id) - 0.5).abs() < 1e-5);
        assert_eq!(engine.running(), 1);

        engine.advance(ms(60), &mut scene);
        assert_eq!(scene.opacity(id), 1.0);
        assert_eq!(engine.running(), 0);
    }

    #[test]
    fn test_explicit_start_value() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::scale(id, Vec3::new(2.0, 0.7, 1.0), ms(300)).from(Vec3::ZERO));

        engine.advance(ms(150), &mut scene);
        assert!((scene.scale(id) - Vec3::new(1.0, 0.35, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_hide_on_complete() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::opacity(id, 0.1, ms(500)).hide_on_complete(id));

        engine.advance(ms(499), &mut scene);
        assert!(scene.is_visible(id));
        engine.advance(ms(1), &mut scene);
        assert!(!scene.is_visible(id));
    }

    #[test]
    fn test_chained_tween_runs_after_first() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(
            Tween::scale(id, Vec3::splat(1.05), ms(500))
                .easing(Easing::QuadraticOut)
                .then(Tween::scale(id, Vec3::ONE, ms(500)).easing(Easing::QuadraticOut)),
        );

        engine.advance(ms(500), &mut scene);
        assert_eq!(scene.scale(id), Vec3::splat(1.05));
        assert_eq!(engine.targets(Channel::Scale(id)), vec![TweenValue::Vector(Vec3::ONE)]);

        engine.advance(ms(500), &mut scene);
        assert_eq!(scene.scale(id), Vec3::ONE);
        assert_eq!(engine.running(), 0);
    }

    #[test]
    fn test_cancel_drops_completion_actions() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::opacity(id, 0.1, ms(100)).hide_on_complete(id));
        engine.schedule(Tween::emphasis(id, 0.3, ms(100)));

        assert_eq!(engine.cancel(Channel::Opacity(id)), 1);
        engine.advance(ms(200), &mut scene);
        assert!(scene.is_visible(id));
        assert_eq!(scene.emphasis(id), 0.3);
    }

    #[test]
    fn test_last_scheduled_tween_wins() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::opacity(id, 1.0, ms(100)));
        engine.schedule(Tween::opacity(id, 0.2, ms(100)));

        engine.advance(ms(100), &mut scene);
        assert!((scene.opacity(id) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_camera_channels_move_independently() {
        let (mut scene, _) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::camera_eye(Vec3::new(5.0, 2.0, 5.0), ms(1000)));
        engine.schedule(Tween::camera_focus(Vec3::new(5.0, 0.0, 0.0), ms(1000)));

        engine.advance(ms(1000), &mut scene);
        assert_eq!(scene.camera().eye, Vec3::new(5.0, 2.0, 5.0));
        assert_eq!(scene.camera().focus, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_duration_applies_immediately() {
        let (mut scene, id) = scene_with_object();
        let mut engine = TweenEngine::new();
        engine.schedule(Tween::opacity(id, 0.7, Duration::ZERO));
        engine.advance(Duration::ZERO, &mut scene);
        assert_eq!(scene.opacity(id), 0.7);
        assert_eq!(engine.running(), 0);
    }
}
