//! Audio file reading and writing.
//!
//! Two containers are supported, both mono at [`SAMPLE_RATE`]:
//!
//! - WAV via `hound` (PCM or float; multi-channel input is averaged to mono)
//! - Headerless little-endian `f32` (`.raw` / `.f32`), the format plotting
//!   scripts read straight into an array

use crate::error::{Error, Result};
use biphase_core::SAMPLE_RATE;
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The fixed processing rate as a WAV header value.
pub const RATE_HZ: u32 = SAMPLE_RATE as u32;

/// On-disk container, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// RIFF/WAVE file.
    Wav,
    /// Headerless little-endian 32-bit float samples.
    RawF32,
}

impl AudioFormat {
    /// `.raw` and `.f32` (any case) are raw floats; everything else is WAV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("raw") || ext.eq_ignore_ascii_case("f32") => {
                AudioFormat::RawF32
            }
            _ => AudioFormat::Wav,
        }
    }
}

/// Read mono samples from either container.
pub fn read_audio(path: &Path) -> Result<Vec<f32>> {
    match AudioFormat::from_path(path) {
        AudioFormat::Wav => read_wav(path),
        AudioFormat::RawF32 => read_raw(path),
    }
}

/// Write mono samples to the container the path's extension names.
///
/// `bits_per_sample` applies to WAV only; raw output is always 32-bit float.
pub fn write_audio(path: &Path, samples: &[f32], bits_per_sample: u16) -> Result<()> {
    match AudioFormat::from_path(path) {
        AudioFormat::Wav => write_wav(path, samples, bits_per_sample),
        AudioFormat::RawF32 => write_raw(path, samples),
    }
}

/// Read a WAV file as mono f32 samples.
///
/// Multi-channel files are mixed down to mono by averaging channels. Files
/// not at [`RATE_HZ`] are rejected.
pub fn read_wav(path: &Path) -> Result<Vec<f32>> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_rate != RATE_HZ {
        return Err(Error::UnsupportedSampleRate {
            found: spec.sample_rate,
            expected: RATE_HZ,
        });
    }
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = pcm_full_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    if channels > 1 {
        Ok(samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect())
    } else {
        Ok(samples)
    }
}

/// Write mono samples to a WAV file at [`RATE_HZ`].
///
/// 32-bit output is IEEE float; 16 and 24-bit output is PCM, clamped.
pub fn write_wav(path: &Path, samples: &[f32], bits_per_sample: u16) -> Result<()> {
    let sample_format = match bits_per_sample {
        32 => SampleFormat::Float,
        16 | 24 => SampleFormat::Int,
        other => return Err(Error::UnsupportedBitDepth(other)),
    };
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE_HZ,
        bits_per_sample,
        sample_format,
    };
    let mut writer = WavWriter::create(path, spec)?;

    if sample_format == SampleFormat::Float {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = pcm_full_scale(bits_per_sample);
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// `2^(bits - 1)`, computed wide so 32-bit PCM stays positive.
fn pcm_full_scale(bits_per_sample: u16) -> f32 {
    (1i64 << (bits_per_sample - 1)) as f32
}

/// Read headerless little-endian f32 samples.
pub fn read_raw(path: &Path) -> Result<Vec<f32>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(Error::TruncatedRaw {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Write headerless little-endian f32 samples.
pub fn write_raw(path: &Path, samples: &[f32]) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    for sample in samples {
        writer.write_all(&sample.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
