//! Easing curves (Robert Penner's equations).

use serde::{Deserialize, Serialize};

/// Maps linear progress `t` in `[0, 1]` to eased progress.
///
/// All curves satisfy `apply(0) == 0` and `apply(1) == 1`; `BackOut`
/// overshoots in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    CubicOut,
    BackOut,
    BounceOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::CubicOut => {
                let k = t - 1.0;
                k * k * k + 1.0
            }
            Easing::BackOut => {
                const S: f32 = 1.70158;
                let k = t - 1.0;
                k * k * ((S + 1.0) * k + S) + 1.0
            }
            Easing::BounceOut => bounce_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / 2.75 {
        7.5625 * t * t
    } else if t < 2.0 / 2.75 {
        let k = t - 1.5 / 2.75;
        7.5625 * k * k + 0.75
    } else if t < 2.5 / 2.75 {
        let k = t - 2.25 / 2.75;
        7.5625 * k * k + 0.9375
    } else {
        let k = t - 2.625 / 2.75;
        7.5625 * k * k + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::CubicOut,
        Easing::BackOut,
        Easing::BounceOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-5, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::QuadraticIn.apply(2.0), 1.0);
        assert_eq!(Easing::QuadraticIn.apply(-1.0), 0.0);
    }

    #[test]
    fn test_shapes() {
        // In curves lag, out curves lead
        assert!(Easing::QuadraticIn.apply(0.5) < 0.5);
        assert!(Easing::QuadraticOut.apply(0.5) > 0.5);
        assert!(Easing::CubicOut.apply(0.5) > Easing::QuadraticOut.apply(0.5));

        // Back overshoots before settling
        assert!((0..100).any(|i| Easing::BackOut.apply(i as f32 / 100.0) > 1.0));
    }
}
