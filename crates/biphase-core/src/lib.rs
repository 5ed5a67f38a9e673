//! Biphase Core - filter design and DSP primitives
//!
//! This crate provides the building blocks for the biphase effects, designed
//! for real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for mono sample processors
//!
//! ## Filters
//!
//! - [`design`] / [`design_fast`] - RBJ cookbook coefficient design for six
//!   [`FilterType`]s
//! - [`FilterState`] / [`step`] - Direct Form II stepping, decoupled from
//!   coefficients
//! - [`Biquad`] - Coefficients and state in one value
//! - [`FilterBank`] - `N` cascaded stages sharing one coefficient set
//!
//! ## Modulation
//!
//! - [`Lfo`] - Low-frequency oscillator (sine, triangle)
//!
//! ## Utilities
//!
//! - Fast approximations: [`fast_exp2`], [`fast_log2`], [`fast_pow`],
//!   [`fast_sincos_turns`]
//! - Pot tapers and limiting: [`linear`], [`cubic`], [`limit_value`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! biphase-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use biphase_core::{FilterBank, FilterType, SAMPLE_RATE, design_fast};
//!
//! let mut bank: FilterBank<3> = FilterBank::new();
//! let mut buffer = [0.0f32; 64];
//! buffer[0] = 1.0;
//!
//! for (i, sample) in buffer.iter_mut().enumerate() {
//!     // Recompute the shared coefficients every sample
//!     let freq = 200.0 + i as f32 * 10.0;
//!     bank.set_coefficients(design_fast(FilterType::Allpass, freq, 0.7, SAMPLE_RATE));
//!     *sample = bank.process(*sample);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod effect;
pub mod fast_math;
pub mod lfo;
pub mod math;

/// Fixed processing sample rate in Hz.
///
/// Every effect in the workspace runs at this rate; filter design takes the
/// rate as an argument, but effect state is tuned for this value.
pub const SAMPLE_RATE: f32 = 48_000.0;

// Re-export main types at crate root
pub use biquad::{
    Biquad, FilterBank, FilterCoefficients, FilterState, FilterType, UnknownFilterType, design,
    design_fast, step,
};
pub use effect::Effect;
pub use fast_math::{fast_exp2, fast_log2, fast_pow, fast_sin_turns, fast_sincos_turns};
pub use lfo::{Lfo, LfoWaveform};
pub use math::{LIMIT_KNEE, cubic, flush_denormal, limit_value, linear};
