//! Easing functions for the explosion transition.
//!
//! Every curve maps 0 to 0 and 1 to 1, so the endpoints of an eased
//! interpolation are exactly the start and end layouts.

use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Natural ease-out: CubicHermite with c1=0.33, c2=1.0.
    pub const EASE_OUT: Self = Self::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SqrtOut => t.sqrt(),
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::Linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::SqrtOut,
        EasingFunction::EASE_OUT,
    ];

    #[test]
    fn every_curve_hits_endpoints_exactly() {
        for easing in ALL {
            assert_eq!(easing.evaluate(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.evaluate(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.evaluate(-0.5), 0.0);
            assert_eq!(easing.evaluate(1.5), 1.0);
        }
    }

    #[test]
    fn quadratic_shapes() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
        assert!((EasingFunction::SqrtOut.evaluate(0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ease_out_leads_linear_early() {
        assert!(EasingFunction::EASE_OUT.evaluate(0.25) > 0.25);
    }

    #[test]
    fn default_is_linear() {
        assert_eq!(EasingFunction::default(), EasingFunction::Linear);
    }
}
