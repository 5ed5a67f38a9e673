//! Low Frequency Oscillator for modulation effects.
//!
//! Drives the phaser's frequency sweep. Both waveforms start at zero and
//! rise, so an oscillator fresh from [`Lfo::new`] or [`Lfo::reset`] always
//! yields `0.0` on its first step.

use libm::floorf;

use crate::fast_math::fast_sin_turns;

/// LFO waveform type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LfoWaveform {
    /// Sine wave (computed with [`fast_sin_turns`]).
    #[default]
    Sine,
    /// Sine-aligned triangle: 0 → +1 → 0 → −1 → 0 over one period.
    Triangle,
}

/// Low Frequency Oscillator for generating modulation signals.
///
/// Phase accumulates in \[0, 1) by `frequency / sample_rate` per step. The
/// waveform is chosen per call to [`step`](Self::step) rather than stored,
/// so one oscillator can be read as either shape.
///
/// # Example
///
/// ```rust
/// use biphase_core::{Lfo, LfoWaveform};
///
/// let mut lfo = Lfo::new(48000.0);
/// lfo.set_period_ms(500.0); // 2 Hz
///
/// assert_eq!(lfo.step(LfoWaveform::Triangle), 0.0);
/// let value = lfo.step(LfoWaveform::Triangle);
/// assert!(value > 0.0 && value <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(crate::SAMPLE_RATE)
    }
}

impl Lfo {
    /// Create a stopped LFO (frequency 0) at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
        }
    }

    /// Set frequency in Hz.
    ///
    /// Non-positive or non-finite frequencies stop the oscillator.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        let inc = freq_hz / self.sample_rate;
        self.phase_inc = if inc.is_finite() && inc > 0.0 { inc } else { 0.0 };
    }

    /// Set the period in milliseconds (`1000 / ms` Hz).
    pub fn set_period_ms(&mut self, ms: f32) {
        self.set_frequency(1000.0 / ms);
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Current phase (0.0 - 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Sync phase to a specific value (0.0 - 1.0).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.clamp(0.0, 1.0);
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Evaluate the waveform at the current phase, then advance one sample.
    ///
    /// Output is bipolar in \[-1.0, 1.0\].
    #[inline]
    pub fn step(&mut self, waveform: LfoWaveform) -> f32 {
        let output = match waveform {
            LfoWaveform::Sine => fast_sin_turns(self.phase),
            LfoWaveform::Triangle => triangle(self.phase),
        };

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            // Increments of a whole cycle or more wrap in one go
            self.phase -= floorf(self.phase);
        }

        output
    }
}

#[inline]
fn triangle(phase: f32) -> f32 {
    if phase < 0.25 {
        4.0 * phase
    } else if phase < 0.75 {
        2.0 - 4.0 * phase
    } else {
        4.0 * phase - 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfo_phase_accumulation() {
        let mut lfo = Lfo::new(48000.0);
        lfo.set_frequency(1.0);

        for _ in 0..48000 {
            lfo.step(LfoWaveform::Sine);
        }

        let phase_error = lfo.phase.min((lfo.phase - 1.0).abs());
        assert!(phase_error < 0.01);
    }

    #[test]
    fn test_lfo_period_ms() {
        let mut lfo = Lfo::new(48000.0);
        lfo.set_period_ms(25.0);
        assert!((lfo.frequency() - 40.0).abs() < 1e-3);

        lfo.set_period_ms(2000.0);
        assert!((lfo.frequency() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_lfo_first_step_is_zero() {
        for waveform in [LfoWaveform::Sine, LfoWaveform::Triangle] {
            let mut lfo = Lfo::new(48000.0);
            lfo.set_period_ms(100.0);
            assert_eq!(lfo.step(waveform), 0.0, "{waveform:?}");
        }
    }

    #[test]
    fn test_lfo_output_range() {
        for waveform in [LfoWaveform::Sine, LfoWaveform::Triangle] {
            let mut lfo = Lfo::new(48000.0);
            lfo.set_frequency(7.0);

            for _ in 0..10000 {
                let value = lfo.step(waveform);
                assert!(
                    (-1.0..=1.0).contains(&value),
                    "Waveform {:?} out of range: {}",
                    waveform,
                    value
                );
            }
        }
    }

    #[test]
    fn test_triangle_shape() {
        assert_eq!(triangle(0.0), 0.0);
        assert_eq!(triangle(0.25), 1.0);
        assert_eq!(triangle(0.5), 0.0);
        assert_eq!(triangle(0.75), -1.0);
        assert!((triangle(0.125) - 0.5).abs() < 1e-6);
        assert!((triangle(0.875) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_is_periodic() {
        let mut lfo = Lfo::new(48000.0);
        lfo.set_frequency(480.0); // exactly 100 samples per period
        let first: Vec<f32> = (0..100).map(|_| lfo.step(LfoWaveform::Triangle)).collect();
        let second: Vec<f32> = (0..100).map(|_| lfo.step(LfoWaveform::Triangle)).collect();
        for (a, b) in first.iter().zip(&second) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_lfo_bounded_at_and_above_sample_rate() {
        for freq in [48000.0, 48001.0, 100_000.0, 1.0e7] {
            for waveform in [LfoWaveform::Sine, LfoWaveform::Triangle] {
                let mut lfo = Lfo::new(48000.0);
                lfo.set_frequency(freq);
                for _ in 0..100 {
                    let value = lfo.step(waveform);
                    assert!(
                        (-1.0..=1.0).contains(&value),
                        "{waveform:?} at {freq} Hz produced {value}"
                    );
                    assert!((0.0..1.0).contains(&lfo.phase()), "phase {}", lfo.phase());
                }
            }
        }
    }

    #[test]
    fn test_lfo_degenerate_frequency_stops() {
        let mut lfo = Lfo::new(48000.0);
        lfo.set_period_ms(0.0);
        assert_eq!(lfo.frequency(), 0.0);
        lfo.set_frequency(-3.0);
        assert_eq!(lfo.frequency(), 0.0);
        for _ in 0..10 {
            assert_eq!(lfo.step(LfoWaveform::Triangle), 0.0);
        }
    }

    #[test]
    fn test_lfo_reset() {
        let mut lfo = Lfo::new(48000.0);
        lfo.set_frequency(3.0);
        for _ in 0..1234 {
            lfo.step(LfoWaveform::Sine);
        }
        lfo.reset();
        assert_eq!(lfo.phase(), 0.0);
        assert_eq!(lfo.step(LfoWaveform::Sine), 0.0);
    }
}
