//! Interpolation helpers shared by the slot animator.

use glam::Vec3;

use super::EasingFunction;

/// Progress of a transition, computed once per frame and shared across every
/// atom so the whole structure moves in lockstep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationContext {
    /// Raw progress (0.0 to 1.0), unmodified from the animation timer.
    pub raw_t: f32,
    /// Eased progress; the value interpolation actually uses.
    pub eased_t: f32,
}

impl InterpolationContext {
    /// Context for `raw_t` shaped by `easing`.
    pub fn eased(raw_t: f32, easing: EasingFunction) -> Self {
        Self {
            raw_t,
            eased_t: easing.evaluate(raw_t),
        }
    }

    /// Linear context (no easing).
    pub fn linear(raw_t: f32) -> Self {
        Self::eased(raw_t, EasingFunction::Linear)
    }

    /// Transition complete (t=1.0).
    pub fn identity() -> Self {
        Self::linear(1.0)
    }
}

impl Default for InterpolationContext {
    fn default() -> Self {
        Self::identity()
    }
}

/// Lerp two positions using the context's eased progress.
///
/// Exact at the endpoints: `t = 0` yields `start`, `t = 1` yields `end`.
#[inline]
pub fn lerp_position(
    ctx: &InterpolationContext,
    start: Vec3,
    end: Vec3,
) -> Vec3 {
    if ctx.eased_t >= 1.0 {
        return end;
    }
    start + (end - start) * ctx.eased_t
}

/// Write `lerp(start[i], end[i]) + offset` for every atom into `out`.
pub fn lerp_positions_into(
    ctx: &InterpolationContext,
    start: &[Vec3],
    end: &[Vec3],
    offset: Vec3,
    out: &mut Vec<Vec3>,
) {
    out.clear();
    out.extend(
        start
            .iter()
            .zip(end)
            .map(|(&s, &e)| lerp_position(ctx, s, e) + offset),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_context_is_complete() {
        let ctx = InterpolationContext::identity();
        assert_eq!(ctx.raw_t, 1.0);
        assert_eq!(ctx.eased_t, 1.0);
    }

    #[test]
    fn eased_context_keeps_raw_progress() {
        let ctx = InterpolationContext::eased(0.5, EasingFunction::QuadraticIn);
        assert_eq!(ctx.raw_t, 0.5);
        assert_eq!(ctx.eased_t, 0.25);
    }

    #[test]
    fn lerp_midpoint() {
        let ctx = InterpolationContext::linear(0.5);
        let result =
            lerp_position(&ctx, Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0));
        assert!((result - Vec3::new(5.0, 10.0, 15.0)).length() < 0.001);
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let start = Vec3::new(0.1, -7.3, 2.9);
        let end = Vec3::new(13.7, 0.3, -4.1);
        assert_eq!(
            lerp_position(&InterpolationContext::linear(0.0), start, end),
            start
        );
        assert_eq!(
            lerp_position(&InterpolationContext::linear(1.0), start, end),
            end
        );
    }

    #[test]
    fn lerp_positions_into_applies_offset() {
        let start = [Vec3::ZERO, Vec3::X];
        let end = [Vec3::Y, Vec3::X + Vec3::Y];
        let mut out = vec![Vec3::splat(99.0); 5];

        lerp_positions_into(
            &InterpolationContext::linear(0.5),
            &start,
            &end,
            Vec3::Z,
            &mut out,
        );

        assert_eq!(
            out,
            vec![Vec3::new(0.0, 0.5, 1.0), Vec3::new(1.0, 0.5, 1.0)]
        );
    }
}
