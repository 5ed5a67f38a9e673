//! Three-stage allpass phaser with feedback.
//!
//! A phaser sums the dry input with a phase-shifted copy of itself. The phase
//! shift comes from cascaded second-order allpass filters whose frequency is
//! swept by a triangle LFO, so the resulting notches move up and down the
//! spectrum. Part of the cascade output is fed back into its own input for
//! resonance.
//!
//! # Signal flow
//!
//! ```text
//!           ┌──────────────────────────────────────────┐
//!           │                                          │ × feedback
//!  in ──┬──(+)──▶ AP1 ──▶ AP2 ──▶ AP3 ──┬── prev ──────┘
//!       │                               │
//!       └─────────────────────────────(+)──▶ limit ──▶ out
//! ```
//!
//! All three stages share one coefficient set, recomputed every sample from
//! the LFO position. The feedback tap is the raw cascade output, taken before
//! the dry sum and before limiting.

use biphase_core::{
    Effect, FilterBank, FilterType, Lfo, LfoWaveform, SAMPLE_RATE, cubic, design_fast, fast_exp2,
    flush_denormal, limit_value, linear,
};
use core::fmt;

/// Number of cascaded allpass stages.
pub const STAGES: usize = 3;

/// Sweep depth either side of the center frequency, in octaves.
pub const OCTAVES: f32 = 2.0;

/// Highest frequency the sweep is allowed to reach (0.45 × sample rate).
///
/// Above Nyquist the allpass poles leave the unit circle; high pot3 settings
/// combined with the ±2 octave sweep would otherwise get there.
pub const MAX_SWEEP_HZ: f32 = SAMPLE_RATE * 0.45;

/// An effect controlled by four normalized pots, like a hardware pedal.
///
/// `init` is called once before streaming; pots are nominally in \[0, 1\]
/// but are not clamped.
pub trait PedalEffect: Effect {
    /// Derive all parameters from the four pot positions.
    fn init(&mut self, pot1: f32, pot2: f32, pot3: f32, pot4: f32);

    /// Stable lowercase effect name.
    fn name(&self) -> &'static str;
}

/// Parameters derived from the pots at init.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaserParams {
    /// LFO period in milliseconds.
    pub period_ms: f32,
    /// Feedback gain applied to the previous cascade output.
    pub feedback: f32,
    /// Sweep center frequency in Hz.
    pub center_hz: f32,
    /// Sweep depth in octaves.
    pub octaves: f32,
    /// Allpass quality factor.
    pub q: f32,
}

impl PhaserParams {
    /// Map pot positions to phaser parameters.
    ///
    /// | Pot | Parameter | Taper | Range |
    /// |-----|-----------|-------|-------|
    /// | 1 | LFO period | cubic | 25 ms – 2000 ms |
    /// | 2 | Feedback | linear | 0 – 0.75 |
    /// | 3 | Center | cubic of `2·pot3` | 50 Hz – 880 Hz at pot3 = 0.5 |
    /// | 4 | Q | linear | 0.25 – 2 |
    ///
    /// Pot 3 is doubled before the cubic taper, so the upper half of its
    /// travel extrapolates past 880 Hz (6690 Hz at pot3 = 1).
    pub fn from_pots(pot1: f32, pot2: f32, pot3: f32, pot4: f32) -> Self {
        let pot3 = 2.0 * pot3;
        Self {
            period_ms: cubic(pot1, 25.0, 2000.0),
            feedback: linear(pot2, 0.0, 0.75),
            center_hz: cubic(pot3, 50.0, 880.0),
            octaves: OCTAVES,
            q: linear(pot4, 0.25, 2.0),
        }
    }
}

impl Default for PhaserParams {
    fn default() -> Self {
        Self::from_pots(0.0, 0.0, 0.0, 0.0)
    }
}

impl fmt::Display for PhaserParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phaser: lfo={} ms center_f={} Hz feedback={} Q={}",
            self.period_ms, self.center_hz, self.feedback, self.q
        )
    }
}

/// Phaser effect: triangle-swept 3-stage allpass cascade with feedback.
///
/// Each instance owns all of its state, so any number of phasers can run
/// side by side (or on separate threads) without interacting.
///
/// # Example
///
/// ```rust
/// use biphase_core::Effect;
/// use biphase_effects::PhaserEffect;
///
/// let mut phaser = PhaserEffect::with_pots(0.5, 0.3, 0.4, 0.5);
/// let output = phaser.step(0.25);
/// assert!(output.is_finite());
///
/// let mut block = [0.1f32; 64];
/// phaser.process_block_inplace(&mut block);
/// ```
#[derive(Debug, Clone)]
pub struct PhaserEffect {
    /// Sweep oscillator
    lfo: Lfo,
    /// Shared coefficients + one delay state per stage
    stages: FilterBank<STAGES>,
    /// Derived parameters
    params: PhaserParams,
    /// Previous raw cascade output, stored unflushed
    feedback_sample: f32,
}

impl PhaserEffect {
    /// Effect name used by presets and the CLI.
    pub const NAME: &'static str = "phaser";

    /// Create an unprimed phaser with the parameters of every pot at 0.
    ///
    /// Does not call [`init`](PedalEffect::init), so nothing is logged.
    pub fn new() -> Self {
        let params = PhaserParams::default();
        let mut lfo = Lfo::new(SAMPLE_RATE);
        lfo.set_period_ms(params.period_ms);
        Self {
            lfo,
            stages: FilterBank::new(),
            params,
            feedback_sample: 0.0,
        }
    }

    /// Create a phaser and run [`init`](PedalEffect::init) with the given pots.
    pub fn with_pots(pot1: f32, pot2: f32, pot3: f32, pot4: f32) -> Self {
        let mut phaser = Self::new();
        phaser.init(pot1, pot2, pot3, pot4);
        phaser
    }

    /// Current derived parameters.
    pub fn params(&self) -> PhaserParams {
        self.params
    }

    /// Process one sample. Same as [`Effect::process`].
    #[inline]
    pub fn step(&mut self, input: f32) -> f32 {
        let lfo = self.lfo.step(LfoWaveform::Triangle);
        let freq = self.params.center_hz * fast_exp2(lfo * self.params.octaves);
        let freq = freq.min(MAX_SWEEP_HZ);

        self.stages.set_coefficients(design_fast(
            FilterType::Allpass,
            freq,
            self.params.q,
            SAMPLE_RATE,
        ));

        let feedback = flush_denormal(self.feedback_sample) * self.params.feedback;
        let wet = self.stages.process(input + feedback);
        self.feedback_sample = wet;

        limit_value(input + wet)
    }
}

impl Default for PhaserEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl PedalEffect for PhaserEffect {
    fn init(&mut self, pot1: f32, pot2: f32, pot3: f32, pot4: f32) {
        self.params = PhaserParams::from_pots(pot1, pot2, pot3, pot4);
        self.lfo.set_period_ms(self.params.period_ms);

        #[cfg(feature = "tracing")]
        tracing::info!("{}", self.params);
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl Effect for PhaserEffect {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.step(input)
    }

    fn reset(&mut self) {
        self.lfo.reset();
        self.stages.reset();
        self.feedback_sample = 0.0;
    }
}
