//! Biphase Effects - pedal-style effects built on biphase-core
//!
//! - [`PhaserEffect`] - Triangle-swept 3-stage allpass phaser with feedback
//! - [`PedalEffect`] - The four-pot `init` contract shared by pedal effects
//! - [`registry`] - Effect lookup and construction by name
//!
//! ## Example
//!
//! ```rust
//! use biphase_core::Effect;
//! use biphase_effects::{PedalEffect, PhaserEffect};
//!
//! let mut phaser = PhaserEffect::new();
//! phaser.init(0.5, 0.4, 0.3, 0.6);
//! println!("{}", phaser.params());
//!
//! let input = [0.0f32, 0.5, 1.0, 0.5];
//! let mut output = [0.0f32; 4];
//! phaser.process_block(&input, &mut output);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod phaser;
pub mod registry;

// Re-export main types at crate root
pub use phaser::{MAX_SWEEP_HZ, OCTAVES, PedalEffect, PhaserEffect, PhaserParams, STAGES};
pub use registry::EffectDescriptor;
