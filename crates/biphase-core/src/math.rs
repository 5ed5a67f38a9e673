//! Small math utilities: pot tapers, output limiting, denormal flushing.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Pot Tapers
//!
//! Hardware-style controls arrive as normalized "pot" values in \[0, 1\].
//! [`linear`] and [`cubic`] map them onto a parameter range. Values outside
//! \[0, 1\] extrapolate; nothing is clamped.
//!
//! # Output Limiting
//!
//! [`limit_value`] keeps the final effect output inside the canonical
//! \[-1, 1\] range with a soft knee.

use libm::{copysignf, fabsf, tanhf};

/// Level above which [`limit_value`] starts compressing.
pub const LIMIT_KNEE: f32 = 0.75;

/// Linear pot taper: `a + pot · (b − a)`.
///
/// # Example
/// ```rust
/// use biphase_core::math::linear;
///
/// assert_eq!(linear(0.0, 0.25, 2.0), 0.25);
/// assert_eq!(linear(1.0, 0.25, 2.0), 2.0);
/// ```
#[inline]
pub fn linear(pot: f32, a: f32, b: f32) -> f32 {
    a + pot * (b - a)
}

/// Cubic pot taper: [`linear`] applied to `pot³`.
///
/// Spends most of the knob travel near `a`, which suits time and
/// frequency ranges spanning more than a decade.
///
/// # Example
/// ```rust
/// use biphase_core::math::cubic;
///
/// assert_eq!(cubic(0.0, 25.0, 2000.0), 25.0);
/// assert_eq!(cubic(1.0, 25.0, 2000.0), 2000.0);
/// assert!(cubic(0.5, 25.0, 2000.0) < 300.0);
/// ```
#[inline]
pub fn cubic(pot: f32, a: f32, b: f32) -> f32 {
    linear(pot * pot * pot, a, b)
}

/// Soft-knee output limiter.
///
/// Samples with magnitude up to [`LIMIT_KNEE`] pass unchanged. Above the
/// knee the excess is tanh-compressed into the remaining headroom, so the
/// result never exceeds 1.0 in magnitude. The curve is odd-symmetric and
/// continuous with a continuous first derivative at the knee.
///
/// NaN passes through unchanged.
///
/// # Example
/// ```rust
/// use biphase_core::math::limit_value;
///
/// assert_eq!(limit_value(0.5), 0.5);
/// assert!(limit_value(4.0) <= 1.0);
/// assert_eq!(limit_value(-4.0), -limit_value(4.0));
/// ```
#[inline]
pub fn limit_value(x: f32) -> f32 {
    let magnitude = fabsf(x);
    if magnitude.is_nan() || magnitude <= LIMIT_KNEE {
        return x;
    }
    const HEADROOM: f32 = 1.0 - LIMIT_KNEE;
    let compressed = LIMIT_KNEE + HEADROOM * tanhf((magnitude - LIMIT_KNEE) / HEADROOM);
    copysignf(compressed, x)
}

/// Flush denormal (subnormal) floats to zero.
///
/// Feedback loops that decay toward silence can wander into the subnormal
/// range, which is dramatically slower on most FPUs. Values below 1e-20
/// become zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if fabsf(x) < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints_and_extrapolation() {
        assert_eq!(linear(0.0, 0.0, 0.75), 0.0);
        assert_eq!(linear(1.0, 0.0, 0.75), 0.75);
        assert!((linear(0.5, 0.25, 2.0) - 1.125).abs() < 1e-6);
        // Out-of-range pots extrapolate rather than clamp
        assert!((linear(2.0, 0.0, 0.75) - 1.5).abs() < 1e-6);
        assert!((linear(-1.0, 0.25, 2.0) + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_taper_shape() {
        assert_eq!(cubic(0.0, 50.0, 880.0), 50.0);
        assert_eq!(cubic(1.0, 50.0, 880.0), 880.0);
        // Midpoint is 1/8 of the way up the range
        assert!((cubic(0.5, 0.0, 800.0) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_limit_below_knee_is_identity() {
        for i in -75..=75 {
            let x = i as f32 / 100.0;
            assert_eq!(limit_value(x), x);
        }
    }

    #[test]
    fn test_limit_bounded_and_monotonic() {
        let mut prev = limit_value(0.0);
        for i in 1..=2000 {
            let x = i as f32 / 100.0;
            let y = limit_value(x);
            assert!(y <= 1.0, "limit_value({x}) = {y}");
            assert!(y >= prev, "not monotonic at {x}");
            assert_eq!(limit_value(-x), -y);
            prev = y;
        }
    }

    #[test]
    fn test_limit_continuous_at_knee() {
        let below = limit_value(LIMIT_KNEE);
        let above = limit_value(LIMIT_KNEE + 1e-4);
        assert!((above - below).abs() < 2e-4);
    }

    #[test]
    fn test_limit_non_finite() {
        assert!(limit_value(f32::NAN).is_nan());
        assert_eq!(limit_value(f32::INFINITY), 1.0);
        assert_eq!(limit_value(f32::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }
}
