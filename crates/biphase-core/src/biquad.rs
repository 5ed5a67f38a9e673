//! Biquad (bi-quadratic) filter design and stepping.
//!
//! Filter design and filter state are kept apart:
//!
//! - [`design`] / [`design_fast`] are pure functions from
//!   (type, frequency, Q, sample rate) to a [`FilterCoefficients`] value.
//! - [`FilterState`] is the two-element delay line of one filter stage and
//!   is advanced by [`step`] with whatever coefficients the caller supplies.
//!
//! That split lets several stages share one coefficient set
//! ([`FilterBank`]) while each keeps its own memory.
//!
//! Coefficient formulas follow the RBJ Audio EQ Cookbook, normalized by
//! `a0 = 1 + alpha`.
//!
//! # Structure
//!
//! Stepping uses Direct Form II:
//!
//! ```text
//! w[n] = x[n] - a1*w[n-1] - a2*w[n-2]
//! y[n] = b0*w[n] + b1*w[n-1] + b2*w[n-2]
//! ```

use core::f32::consts::TAU;
use core::fmt;
use core::str::FromStr;

use libm::{cosf, sinf};

use crate::fast_math::fast_sincos_turns;

/// Filter response selected at design time.
///
/// The type only changes the coefficient formula; stepping is identical for
/// every type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Second-order low-pass.
    Lowpass,
    /// Second-order high-pass.
    Highpass,
    /// Band-reject (notch).
    Notch,
    /// Band-pass with peak gain equal to Q.
    BandpassPeak,
    /// Band-pass with constant 0 dB peak (constant skirt gain).
    BandpassSkirt,
    /// Unity-magnitude, phase-shifting all-pass.
    Allpass,
}

impl FilterType {
    /// All filter types, in declaration order.
    pub const ALL: [FilterType; 6] = [
        FilterType::Lowpass,
        FilterType::Highpass,
        FilterType::Notch,
        FilterType::BandpassPeak,
        FilterType::BandpassSkirt,
        FilterType::Allpass,
    ];

    /// Stable lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            FilterType::Lowpass => "lowpass",
            FilterType::Highpass => "highpass",
            FilterType::Notch => "notch",
            FilterType::BandpassPeak => "bandpass-peak",
            FilterType::BandpassSkirt => "bandpass",
            FilterType::Allpass => "allpass",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown filter type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownFilterType;

impl fmt::Display for UnknownFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown filter type")
    }
}

impl FromStr for FilterType {
    type Err = UnknownFilterType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or(UnknownFilterType)
    }
}

/// Normalized biquad coefficients (already divided by `a0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterCoefficients {
    /// Feedforward coefficient for `w[n]`.
    pub b0: f32,
    /// Feedforward coefficient for `w[n-1]`.
    pub b1: f32,
    /// Feedforward coefficient for `w[n-2]`.
    pub b2: f32,
    /// Feedback coefficient for `w[n-1]`.
    pub a1: f32,
    /// Feedback coefficient for `w[n-2]`.
    pub a2: f32,
}

impl FilterCoefficients {
    /// Coefficients that pass the input through unchanged.
    pub const fn passthrough() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }
}

impl Default for FilterCoefficients {
    fn default() -> Self {
        Self::passthrough()
    }
}

/// Designs biquad coefficients using `libm` trigonometry.
///
/// # Arguments
///
/// * `filter_type` - Response to design
/// * `frequency` - Cutoff / center frequency in Hz
/// * `q` - Quality factor
/// * `sample_rate` - Sample rate in Hz
///
/// # Preconditions
///
/// `q > 0` and `frequency < sample_rate / 2`. Neither is checked: `q → 0`
/// drives `alpha` to infinity and yields non-finite coefficients.
///
/// # Example
///
/// ```rust
/// use biphase_core::{FilterType, design};
///
/// let c = design(FilterType::Lowpass, 1000.0, 0.707, 48000.0);
/// assert!((c.b0 - c.b2).abs() < 1e-9);
/// assert!((c.b1 - 2.0 * c.b0).abs() < 1e-6);
/// ```
pub fn design(
    filter_type: FilterType,
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> FilterCoefficients {
    let w0 = TAU * frequency / sample_rate;
    coefficients_from_trig(filter_type, sinf(w0), cosf(w0), q)
}

/// Designs biquad coefficients using [`fast_sincos_turns`].
///
/// Same formulas and preconditions as [`design`]; the trig pair comes from
/// the polynomial approximation, evaluated on the angle as a fraction of a
/// turn (`frequency / sample_rate`). This is the path for coefficients that
/// are recomputed every sample.
#[inline]
pub fn design_fast(
    filter_type: FilterType,
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> FilterCoefficients {
    let (sin_w0, cos_w0) = fast_sincos_turns(frequency / sample_rate);
    coefficients_from_trig(filter_type, sin_w0, cos_w0, q)
}

#[inline]
fn coefficients_from_trig(
    filter_type: FilterType,
    sin_w0: f32,
    cos_w0: f32,
    q: f32,
) -> FilterCoefficients {
    let alpha = sin_w0 / (2.0 * q);
    let a0_inv = 1.0 / (1.0 + alpha);
    let a1 = -2.0 * cos_w0 * a0_inv;
    let a2 = (1.0 - alpha) * a0_inv;

    match filter_type {
        FilterType::Lowpass => {
            let b1 = (1.0 - cos_w0) * a0_inv;
            FilterCoefficients {
                b0: b1 / 2.0,
                b1,
                b2: b1 / 2.0,
                a1,
                a2,
            }
        }
        FilterType::Highpass => {
            let b1 = (1.0 + cos_w0) * a0_inv;
            FilterCoefficients {
                b0: b1 / 2.0,
                b1: -b1,
                b2: b1 / 2.0,
                a1,
                a2,
            }
        }
        FilterType::Notch => FilterCoefficients {
            b0: a0_inv,
            b1: a1,
            b2: a0_inv,
            a1,
            a2,
        },
        FilterType::BandpassPeak => FilterCoefficients {
            b0: q * alpha * a0_inv,
            b1: 0.0,
            b2: -q * alpha * a0_inv,
            a1,
            a2,
        },
        FilterType::BandpassSkirt => FilterCoefficients {
            b0: alpha * a0_inv,
            b1: 0.0,
            b2: -alpha * a0_inv,
            a1,
            a2,
        },
        // The allpass numerator is the mirrored denominator, so b2 takes
        // a0's normalized value of exactly 1.
        FilterType::Allpass => FilterCoefficients {
            b0: a2,
            b1: a1,
            b2: 1.0,
            a1,
            a2,
        },
    }
}

/// Delay line of one biquad stage.
///
/// Owned by exactly one stage; two stages never share a state, even when
/// they share coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterState {
    w1: f32,
    w2: f32,
}

impl FilterState {
    /// Zeroed state.
    pub const fn new() -> Self {
        Self { w1: 0.0, w2: 0.0 }
    }

    /// `w[n-1]`.
    pub fn w1(&self) -> f32 {
        self.w1
    }

    /// `w[n-2]`.
    pub fn w2(&self) -> f32 {
        self.w2
    }

    /// Advance this state by one sample. See [`step`].
    #[inline]
    pub fn step(&mut self, coeffs: &FilterCoefficients, x0: f32) -> f32 {
        let Self { w1, w2 } = *self;

        let w0 = x0 - coeffs.a1 * w1 - coeffs.a2 * w2;
        let y0 = coeffs.b0 * w0 + coeffs.b1 * w1 + coeffs.b2 * w2;

        // Shift from the copies taken above: new w2 is the old w1.
        self.w2 = w1;
        self.w1 = w0;
        y0
    }

    /// Clear the delay line.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Run one sample through a biquad stage.
///
/// Computes `w0 = x0 - a1*w1 - a2*w2`, outputs `b0*w0 + b1*w1 + b2*w2`, and
/// shifts the delay line so the next `w2` is the current `w1` and the next
/// `w1` is `w0`. Constant time, no allocation, never fails.
#[inline]
pub fn step(coeffs: &FilterCoefficients, state: &mut FilterState, x0: f32) -> f32 {
    state.step(coeffs, x0)
}

/// A single biquad filter: one coefficient set plus its own state.
///
/// # Example
///
/// ```rust
/// use biphase_core::{Biquad, FilterType};
///
/// let mut lpf = Biquad::new(FilterType::Lowpass, 1000.0, 0.707, 48000.0);
/// let mut out = 0.0;
/// for _ in 0..4800 {
///     out = lpf.process(1.0);
/// }
/// assert!((out - 1.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coeffs: FilterCoefficients,
    state: FilterState,
}

impl Biquad {
    /// Create a filter designed with [`design`].
    pub fn new(filter_type: FilterType, frequency: f32, q: f32, sample_rate: f32) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!("biquad: {filter_type} f={frequency} Hz q={q} fs={sample_rate}");
        Self {
            coeffs: design(filter_type, frequency, q, sample_rate),
            state: FilterState::new(),
        }
    }

    /// Redesign the coefficients, keeping the state.
    pub fn set_design(
        &mut self,
        filter_type: FilterType,
        frequency: f32,
        q: f32,
        sample_rate: f32,
    ) {
        #[cfg(feature = "tracing")]
        tracing::debug!("biquad redesign: {filter_type} f={frequency} Hz q={q} fs={sample_rate}");
        self.coeffs = design(filter_type, frequency, q, sample_rate);
    }

    /// Replace the coefficients, keeping the state.
    pub fn set_coefficients(&mut self, coeffs: FilterCoefficients) {
        self.coeffs = coeffs;
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coeffs
    }

    /// Current state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state.step(&self.coeffs, input)
    }

    /// Clears the filter state without changing coefficients.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

/// One coefficient set driving `N` cascaded stages with independent states.
///
/// All stages see the same coefficients on a given sample; stage `i` feeds
/// stage `i + 1`. Storage is a fixed array, so processing never allocates.
///
/// # Example
///
/// ```rust
/// use biphase_core::{FilterBank, FilterType, design};
///
/// let mut bank: FilterBank<3> = FilterBank::new();
/// bank.set_coefficients(design(FilterType::Allpass, 440.0, 0.5, 48000.0));
/// let y = bank.process(1.0);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct FilterBank<const N: usize> {
    coeffs: FilterCoefficients,
    stages: [FilterState; N],
}

impl<const N: usize> Default for FilterBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FilterBank<N> {
    /// Passthrough coefficients, zeroed states.
    pub const fn new() -> Self {
        Self {
            coeffs: FilterCoefficients::passthrough(),
            stages: [FilterState::new(); N],
        }
    }

    /// Number of stages.
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for a zero-stage bank.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Replace the shared coefficients.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: FilterCoefficients) {
        self.coeffs = coeffs;
    }

    /// Shared coefficients.
    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coeffs
    }

    /// State of stage `index`, if it exists.
    pub fn stage(&self, index: usize) -> Option<&FilterState> {
        self.stages.get(index)
    }

    /// Step a single stage with the shared coefficients.
    ///
    /// Returns `None` if `index >= N`.
    #[inline]
    pub fn process_stage(&mut self, index: usize, input: f32) -> Option<f32> {
        let coeffs = &self.coeffs;
        self.stages.get_mut(index).map(|s| s.step(coeffs, input))
    }

    /// Run `input` through every stage in order.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let coeffs = &self.coeffs;
        self.stages
            .iter_mut()
            .fold(input, |signal, stage| stage.step(coeffs, signal))
    }

    /// Clear every stage's delay line.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}
