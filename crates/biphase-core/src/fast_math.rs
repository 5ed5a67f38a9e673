//! Fast transcendental approximations for per-sample control math.
//!
//! The phaser recomputes its allpass coefficients on every sample, so the
//! `sin`/`cos` pair and the `2^x` sweep mapping sit in the hot path. These
//! functions trade full IEEE 754 precision for a handful of multiplies.
//!
//! | Function | Replaces | Use case | Max error |
//! |----------|----------|----------|-----------|
//! | [`fast_log2`] | `libm::log2f` | [`fast_pow`] | < 0.006 absolute |
//! | [`fast_exp2`] | `libm::exp2f` | LFO sweep mapping | < 0.02% relative |
//! | [`fast_pow`] | `libm::powf` | Pot tapers, test signals | < 1% relative (small exponents) |
//! | [`fast_sin_turns`] | `libm::sinf` | LFO, coefficient design | < 0.002 absolute |
//! | [`fast_sincos_turns`] | `libm::sinf` + `libm::cosf` | Coefficient design | < 0.002 absolute |
//!
//! An allpass designed from approximate trig values is still exactly allpass;
//! only its center frequency moves.

use libm::floorf;

/// Fast base-2 logarithm via IEEE 754 float decomposition.
///
/// Extracts the exponent directly from the float bit representation,
/// then applies a 2nd-order minimax polynomial to the mantissa.
///
/// # Arguments
///
/// * `x` - Input value. Must be > 0. Returns garbage for x ≤ 0.
///
/// # Examples
///
/// ```
/// use biphase_core::fast_math::fast_log2;
///
/// assert!((fast_log2(1.0) - 0.0).abs() < 0.01);
/// assert!((fast_log2(2.0) - 1.0).abs() < 0.01);
/// assert!((fast_log2(0.5) - (-1.0)).abs() < 0.01);
/// ```
#[inline]
pub fn fast_log2(x: f32) -> f32 {
    let bits = x.to_bits();
    let exponent = ((bits >> 23) & 0xFF) as i32 - 127;
    // Mantissa in [1.0, 2.0)
    let m = f32::from_bits((bits & 0x007F_FFFF) | 0x3F80_0000);
    exponent as f32 + (m * (m * -0.344_845_6 + 2.024_094) - 1.674_094)
}

/// Fast base-2 exponential via polynomial approximation.
///
/// Decomposes `x` into integer and fractional parts: `2^x = 2^⌊x⌋ · 2^frac(x)`.
/// The integer part is written straight into the exponent bits, the
/// fractional part uses a 3rd-order minimax polynomial. Integer inputs are exact,
/// so `fast_exp2(0.0) == 1.0`.
///
/// # Examples
///
/// ```
/// use biphase_core::fast_math::fast_exp2;
///
/// assert_eq!(fast_exp2(0.0), 1.0);
/// assert_eq!(fast_exp2(2.0), 4.0);
/// assert!((fast_exp2(-0.5) - 0.7071).abs() < 0.01);
/// ```
#[inline]
pub fn fast_exp2(x: f32) -> f32 {
    let x = x.clamp(-126.0, 126.0);
    let i = floorf(x) as i32;
    let f = x - i as f32;
    let p = 1.0 + f * (0.696_065_6 + f * (0.224_494_3 + f * 0.079_440_24));
    f32::from_bits(((i + 127) as u32) << 23) * p
}

/// Fast `base^exponent` for positive bases.
///
/// Computed as `2^(exponent · log2(base))`. The log error is multiplied by
/// the exponent, so keep exponents small (|exponent| ≲ 4) where accuracy
/// matters.
///
/// # Examples
///
/// ```
/// use biphase_core::fast_math::fast_pow;
///
/// assert!((fast_pow(8000.0, 0.0) - 1.0).abs() < 1e-6);
/// assert!((fast_pow(10.0, 1.0) - 10.0).abs() < 0.1);
/// ```
#[inline]
pub fn fast_pow(base: f32, exponent: f32) -> f32 {
    fast_exp2(exponent * fast_log2(base))
}

/// Fast sine from phase in turns (full cycles).
///
/// `turns` = 0.0 → 0, 0.25 → 1, 0.5 → 0, 0.75 → −1. Values outside \[0, 1)
/// are wrapped.
///
/// Uses the corrected parabolic approximation (Bhaskara I variant):
/// base parabola `4p(1−p)` for the half-wave plus a `0.225·y·(y−1)`
/// correction.
///
/// # Examples
///
/// ```
/// use biphase_core::fast_math::fast_sin_turns;
///
/// assert_eq!(fast_sin_turns(0.0), 0.0);
/// assert!((fast_sin_turns(0.25) - 1.0).abs() < 0.002);
/// assert!((fast_sin_turns(0.75) + 1.0).abs() < 0.002);
/// ```
#[inline]
pub fn fast_sin_turns(turns: f32) -> f32 {
    let p = turns - floorf(turns);
    let (half_p, sign) = if p < 0.5 {
        (p * 2.0, 1.0_f32)
    } else {
        ((p - 0.5) * 2.0, -1.0_f32)
    };
    let y = 4.0 * half_p * (1.0 - half_p);
    sign * (0.225 * y * (y - 1.0) + y)
}

/// Fast sine and cosine of an angle given as a fraction of a full turn.
///
/// For filter design the angle is `frequency / sample_rate`, so callers never
/// multiply by 2π themselves. The cosine is the sine a quarter turn ahead.
///
/// # Examples
///
/// ```
/// use biphase_core::fast_math::fast_sincos_turns;
///
/// let (s, c) = fast_sincos_turns(0.0);
/// assert_eq!(s, 0.0);
/// assert!((c - 1.0).abs() < 0.002);
/// ```
#[inline]
pub fn fast_sincos_turns(turns: f32) -> (f32, f32) {
    (fast_sin_turns(turns), fast_sin_turns(turns + 0.25))
}
