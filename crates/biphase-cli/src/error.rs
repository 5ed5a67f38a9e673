//! Error types for the biphase CLI.

use std::path::PathBuf;

/// Errors raised while loading presets or reading and writing audio.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preset file is not valid TOML or does not match the preset schema.
    #[error("Preset parse error: {0}")]
    Preset(#[from] toml::de::Error),

    /// Input is not at the fixed processing rate; nothing is resampled.
    #[error("Unsupported sample rate: {found} Hz (expected {expected} Hz)")]
    UnsupportedSampleRate {
        /// Rate found in the file header.
        found: u32,
        /// The fixed processing rate.
        expected: u32,
    },

    /// Output bit depth other than 16, 24 or 32.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// A pot value that is NaN or infinite.
    #[error("Invalid value for pot {index}: {value} (must be finite)")]
    InvalidPot {
        /// One-based pot number.
        index: usize,
        /// Offending value.
        value: f32,
    },

    /// Preset names an effect the registry does not know.
    #[error("Unknown effect: '{0}'")]
    UnknownEffect(String),

    /// Raw float file whose size is not a whole number of samples.
    #[error("Truncated raw float file {path}: {len} bytes is not a multiple of 4")]
    TruncatedRaw {
        /// File path.
        path: PathBuf,
        /// File size in bytes.
        len: usize,
    },
}

/// Convenience result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;
