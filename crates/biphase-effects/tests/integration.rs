//! Whole-signal behaviour of the phaser, driven by the AM test generator.

mod common;

use biphase_core::{Effect, FilterType, LIMIT_KNEE, SAMPLE_RATE, design_fast, limit_value};
use biphase_effects::{PedalEffect, PhaserEffect, registry};
use common::{AmGenerator, peak, rms};

const ONE_SECOND: usize = SAMPLE_RATE as usize;

#[test]
fn am_generator_pot_mapping() {
    let low = AmGenerator::with_pots(1.0, 0.0, 0.0, 0.0);
    assert!((low.carrier_hz() - 101.0).abs() < 0.01);
    assert!((low.modulator_hz() - 1.0).abs() < 1e-4);

    let high = AmGenerator::with_pots(1.0, 1.0, 1.0, 1.0);
    assert!((high.carrier_hz() - 8100.0).abs() < 100.0);
    assert!((high.modulator_hz() - 11.0).abs() < 1e-3);
}

#[test]
fn am_generator_envelope() {
    // Full depth: the envelope swings between 0 and 2 × volume
    let mut generator = AmGenerator::with_pots(0.4, 0.3, 1.0, 0.0);
    let signal = generator.render(ONE_SECOND);
    assert!(peak(&signal) <= 0.8 + 1e-3);
    assert!(peak(&signal) > 0.7);

    // Zero depth: plain sine at volume
    let mut flat = AmGenerator::with_pots(0.4, 0.3, 0.0, 0.0);
    let signal = flat.render(ONE_SECOND);
    assert!((rms(&signal) - 0.4 / 2.0f32.sqrt()).abs() < 0.01);
}

#[test]
fn am_generator_ignores_input() {
    let mut a = AmGenerator::with_pots(0.5, 0.5, 0.5, 0.5);
    let mut b = AmGenerator::with_pots(0.5, 0.5, 0.5, 0.5);
    for i in 0..1000 {
        assert_eq!(a.process(i as f32), b.process(0.0));
    }
}

/// Two independent instances with identical pots produce bit-identical
/// output for identical input.
#[test]
fn phaser_is_deterministic_across_instances() {
    let input = AmGenerator::with_pots(0.6, 0.4, 0.8, 0.3).render(ONE_SECOND);

    let mut a = PhaserEffect::with_pots(0.5, 0.6, 0.35, 0.4);
    let mut b = PhaserEffect::with_pots(0.5, 0.6, 0.35, 0.4);
    let mut out_a = vec![0.0; input.len()];
    let mut out_b = vec![0.0; input.len()];

    // Interleave: a runs sample-wise, b in blocks; neither sees the other
    for (x, y) in input.iter().zip(out_a.iter_mut()) {
        *y = a.process(*x);
    }
    for (chunk_in, chunk_out) in input.chunks(256).zip(out_b.chunks_mut(256)) {
        b.process_block(chunk_in, chunk_out);
    }

    assert!(
        out_a.iter().zip(&out_b).all(|(x, y)| x.to_bits() == y.to_bits()),
        "instances diverged"
    );
}

/// Running a second phaser in between calls does not disturb the first.
#[test]
fn phaser_instances_do_not_share_state() {
    let input = AmGenerator::with_pots(0.5, 0.2, 0.5, 0.5).render(4800);

    let mut solo = PhaserEffect::with_pots(0.3, 0.5, 0.4, 0.5);
    let expected: Vec<f32> = input.iter().map(|&x| solo.process(x)).collect();

    let mut first = PhaserEffect::with_pots(0.3, 0.5, 0.4, 0.5);
    let mut other = PhaserEffect::with_pots(0.9, 0.75, 0.1, 0.0);
    for (i, &x) in input.iter().enumerate() {
        other.process(-x);
        assert_eq!(first.process(x), expected[i], "sample {i}");
    }
}

#[test]
fn phaser_output_bounded() {
    let input = AmGenerator::with_pots(1.0, 0.5, 1.0, 0.5).render(ONE_SECOND);
    let mut phaser = PhaserEffect::with_pots(0.2, 1.0, 0.5, 1.0);
    let mut output = input.clone();
    phaser.process_block_inplace(&mut output);

    assert!(output.iter().all(|s| s.is_finite()));
    assert!(peak(&output) <= 1.0);
}

/// Quiet input stays below the limiter knee, so the output is exactly
/// dry + wet and has energy comparable to the input.
#[test]
fn phaser_quiet_signal_passes_unlimited() {
    let input = AmGenerator::with_pots(0.1, 0.4, 0.0, 0.0).render(ONE_SECOND);
    let mut phaser = PhaserEffect::with_pots(0.4, 0.0, 0.3, 0.5);
    let output: Vec<f32> = input.iter().map(|&x| phaser.process(x)).collect();

    assert!(peak(&output) < LIMIT_KNEE);
    // dry + allpassed copy: between full cancellation and doubling
    let gain = rms(&output) / rms(&input);
    assert!(gain > 0.05 && gain < 2.0, "gain {gain}");
}

/// Summing dry and allpassed signal cuts notches into the spectrum. With a
/// 2 s period the sweep stays within ~15% of center during each 50 ms probe,
/// so probing a spread of frequencies around center must find a deep dip.
#[test]
fn phaser_creates_notches() {
    let mut phaser = PhaserEffect::with_pots(1.0, 0.0, 0.5, 0.5);
    let center = phaser.params().center_hz;

    let probe = |freq: f32, phaser: &mut PhaserEffect| -> f32 {
        phaser.reset();
        let input: Vec<f32> = (0..2400)
            .map(|i| (core::f32::consts::TAU * freq * i as f32 / SAMPLE_RATE).sin() * 0.3)
            .collect();
        let output: Vec<f32> = input.iter().map(|&x| phaser.process(x)).collect();
        rms(&output[1200..]) / rms(&input[1200..])
    };

    let gains: Vec<f32> = [0.1, 0.2, 0.3, 0.4, 0.5, 0.7, 1.0, 1.5, 2.0, 3.0, 5.0]
        .iter()
        .map(|ratio| probe(center * ratio, &mut phaser))
        .collect();
    let deepest = gains.iter().copied().fold(f32::INFINITY, f32::min);
    let loudest = gains.iter().copied().fold(0.0f32, f32::max);
    assert!(deepest < 0.5 * loudest, "no notch: {gains:?}");
}

#[test]
fn phaser_first_sample_from_registry() {
    let mut boxed = registry::create("phaser", [0.0; 4]).unwrap();
    let b0 = design_fast(FilterType::Allpass, 50.0, 0.25, SAMPLE_RATE).b0;
    let out = boxed.process(1.0);
    assert!((out - limit_value(1.0 + b0 * b0 * b0)).abs() < 1e-6);
}

#[test]
fn reinit_changes_parameters_not_state() {
    let mut phaser = PhaserEffect::new();
    for _ in 0..100 {
        phaser.process(0.5);
    }
    phaser.init(1.0, 1.0, 0.5, 1.0);
    let params = phaser.params();
    assert_eq!(params.period_ms, 2000.0);
    assert_eq!(params.center_hz, 880.0);
    // Delay lines still hold signal from before init
    assert_ne!(phaser.process(0.0), 0.0);
}
