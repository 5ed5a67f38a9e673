//! Shared test fixtures.
//!
//! [`AmGenerator`] is an amplitude-modulated sine source with the same
//! four-pot interface as the pedal effects. It ignores its input, which
//! makes it a convenient deterministic signal for driving other effects.

#![allow(dead_code)]

use biphase_core::{Effect, Lfo, LfoWaveform, SAMPLE_RATE, fast_pow};
use biphase_effects::PedalEffect;

/// Amplitude-modulation test-signal generator.
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 1 | Volume | 0 – 1 |
/// | 2 | Carrier | `8000^pot2 + 100` Hz (101 Hz – 8.1 kHz) |
/// | 3 | Depth | 0 – 1 |
/// | 4 | Modulator | `1 + 10·pot4` Hz (1 – 11 Hz) |
#[derive(Debug, Clone)]
pub struct AmGenerator {
    carrier: Lfo,
    modulator: Lfo,
    depth: f32,
    volume: f32,
}

impl AmGenerator {
    pub fn with_pots(pot1: f32, pot2: f32, pot3: f32, pot4: f32) -> Self {
        let mut generator = Self {
            carrier: Lfo::new(SAMPLE_RATE),
            modulator: Lfo::new(SAMPLE_RATE),
            depth: 0.0,
            volume: 0.0,
        };
        generator.init(pot1, pot2, pot3, pot4);
        generator
    }

    pub fn carrier_hz(&self) -> f32 {
        self.carrier.frequency()
    }

    pub fn modulator_hz(&self) -> f32 {
        self.modulator.frequency()
    }

    /// Render `len` samples.
    pub fn render(&mut self, len: usize) -> Vec<f32> {
        (0..len).map(|_| self.process(0.0)).collect()
    }
}

impl Effect for AmGenerator {
    fn process(&mut self, _input: f32) -> f32 {
        let carrier = self.carrier.step(LfoWaveform::Sine);
        let modulation = self.modulator.step(LfoWaveform::Sine);
        carrier * (1.0 + modulation * self.depth) * self.volume
    }

    fn reset(&mut self) {
        self.carrier.reset();
        self.modulator.reset();
    }
}

impl PedalEffect for AmGenerator {
    fn init(&mut self, pot1: f32, pot2: f32, pot3: f32, pot4: f32) {
        self.volume = pot1;
        self.carrier.set_frequency(fast_pow(8000.0, pot2) + 100.0);
        self.depth = pot3;
        self.modulator.set_frequency(1.0 + 10.0 * pot4);
    }

    fn name(&self) -> &'static str {
        "am"
    }
}

/// RMS amplitude of a signal buffer.
pub fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    (sum_sq / signal.len() as f32).sqrt()
}

/// Peak absolute amplitude of a signal buffer.
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |m, &s| m.max(s.abs()))
}
