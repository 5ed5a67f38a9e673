//! Preset file format.
//!
//! A preset names one effect and its four pot positions:
//!
//! ```toml
//! name = "Slow swirl"
//! description = "Long sweep, moderate resonance"
//! effect = "phaser"
//! pots = [0.8, 0.5, 0.35, 0.6]
//! ```

use crate::error::{Error, Result};
use biphase_effects::registry;
use serde::Deserialize;
use std::path::Path;

/// Preset file format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Effect id, as listed by the registry
    #[serde(default = "default_effect")]
    pub effect: String,
    /// Pot positions, nominally in [0, 1]
    pub pots: [f32; 4],
}

fn default_effect() -> String {
    biphase_effects::PhaserEffect::NAME.to_string()
}

impl Preset {
    /// Parse and validate a preset from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let preset: Preset = toml::from_str(text)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Load and validate a preset file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Check the effect id and pot values.
    ///
    /// Pots outside [0, 1] are allowed and extrapolate; only NaN and
    /// infinities are rejected.
    pub fn validate(&self) -> Result<()> {
        if registry::find(&self.effect).is_none() {
            return Err(Error::UnknownEffect(self.effect.clone()));
        }
        check_pots(&self.pots)
    }
}

/// Reject non-finite pot values.
pub fn check_pots(pots: &[f32; 4]) -> Result<()> {
    match pots.iter().position(|p| !p.is_finite()) {
        Some(i) => Err(Error::InvalidPot {
            index: i + 1,
            value: pots[i],
        }),
        None => Ok(()),
    }
}
