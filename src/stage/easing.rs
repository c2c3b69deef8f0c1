//! Easing curves for tweens.

/// Easing curve applied to a tween's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Fast start, slow end.
    QuadraticOut,
    /// Overshoots the target slightly before settling.
    BackOut,
}

/// Overshoot amount for [`Easing::BackOut`].
const BACK_OVERSHOOT: f32 = 1.70158;

impl Easing {
    /// Evaluate the curve at `t`, clamped to [0, 1].
    ///
    /// Returns 0 at t=0 and 1 at t=1. `BackOut` exceeds 1 in between.
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Easing::BackOut => {
                let s = BACK_OVERSHOOT;
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::QuadraticOut, Easing::BackOut] {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_quadratic_out() {
        assert_eq!(Easing::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::BackOut.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "BackOut should overshoot, peak {}", peak);
    }

    #[test]
    fn test_input_clamping() {
        assert_eq!(Easing::Linear.evaluate(-0.5), 0.0);
        assert_eq!(Easing::Linear.evaluate(1.5), 1.0);
        assert!((Easing::BackOut.evaluate(2.0) - 1.0).abs() < 1e-6);
    }
}
