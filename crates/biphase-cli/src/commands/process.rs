//! File-based effect processing command.

use crate::audio::{AudioFormat, RATE_HZ, read_audio, write_audio};
use crate::commands::common::PotArgs;
use crate::error::Error;
use biphase_core::Effect;
use biphase_effects::{PedalEffect, registry};
use clap::Args;
use std::path::PathBuf;

/// Render a file through an effect.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (WAV, or raw little-endian f32 with a .raw/.f32 extension)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (container chosen by extension, like INPUT)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    pots: PotArgs,

    /// Processing block size
    #[arg(long, default_value_t = 512, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    block_size: usize,

    /// Output WAV bit depth (16, 24, or 32)
    #[arg(long, default_value_t = 32, value_parser = parse_bit_depth)]
    bit_depth: u16,
}

/// Run the process command.
pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let setup = args.pots.resolve()?;
    let mut effect = registry::create(&setup.effect, setup.pots)
        .ok_or_else(|| Error::UnknownEffect(setup.effect.clone()))?;

    if let Some(name) = &setup.preset_name {
        println!("Loading preset: {name}");
    }

    println!("Reading {}...", args.input.display());
    let samples = read_audio(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        RATE_HZ,
        samples.len() as f32 / RATE_HZ as f32
    );

    println!("Processing with {}...", effect.name());
    let mut output = vec![0.0; samples.len()];
    for (in_chunk, out_chunk) in samples
        .chunks(args.block_size)
        .zip(output.chunks_mut(args.block_size))
    {
        effect.process_block(in_chunk, out_chunk);
    }

    let stats = Stats::measure(&samples, &output);
    tracing::debug!(?stats, "processing finished");
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(stats.input_rms),
        linear_to_db(stats.input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(stats.output_rms),
        linear_to_db(stats.output_peak)
    );

    println!("\nWriting {}...", args.output.display());
    if AudioFormat::from_path(&args.output) == AudioFormat::RawF32 && args.bit_depth != 32 {
        tracing::warn!(bit_depth = args.bit_depth, "raw output is always 32-bit float");
    }
    write_audio(&args.output, &output, args.bit_depth)?;
    println!("Done!");

    Ok(())
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Unsupported bit depth '{s}' (expected 16, 24, or 32)")),
    }
}

/// Level statistics for one processing run.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stats {
    input_rms: f32,
    input_peak: f32,
    output_rms: f32,
    output_peak: f32,
}

impl Stats {
    fn measure(input: &[f32], output: &[f32]) -> Self {
        Self {
            input_rms: rms(input),
            input_peak: peak(input),
            output_rms: rms(output),
            output_peak: peak(output),
        }
    }
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
