//! Shared CLI helpers used across multiple commands.

use crate::error::Result;
use crate::preset::{Preset, check_pots};
use biphase_effects::PhaserEffect;
use clap::Args;
use std::path::PathBuf;

/// Pot positions used when neither `--pots` nor `--preset` is given.
pub const DEFAULT_POTS: [f32; 4] = [0.5; 4];

/// Where the effect and its pot positions come from.
#[derive(Args, Debug, Clone)]
pub struct PotArgs {
    /// Pot positions as four comma-separated values (e.g. "0.5,0.3,0.4,0.6")
    #[arg(long, value_parser = parse_pots, conflicts_with = "preset")]
    pub pots: Option<[f32; 4]>,

    /// Preset file (TOML) naming the effect and its pots
    #[arg(short, long)]
    pub preset: Option<PathBuf>,
}

/// Effect selection after resolving flags and presets.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSetup {
    /// Registry id of the effect.
    pub effect: String,
    /// Pot positions.
    pub pots: [f32; 4],
    /// Preset name, if one was loaded.
    pub preset_name: Option<String>,
}

impl PotArgs {
    /// Load the preset, or fall back to `--pots` / [`DEFAULT_POTS`] on the phaser.
    pub fn resolve(&self) -> Result<EffectSetup> {
        if let Some(path) = &self.preset {
            let preset = Preset::load(path)?;
            tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
            return Ok(EffectSetup {
                effect: preset.effect,
                pots: preset.pots,
                preset_name: Some(preset.name),
            });
        }

        let pots = self.pots.unwrap_or(DEFAULT_POTS);
        check_pots(&pots)?;
        Ok(EffectSetup {
            effect: PhaserEffect::NAME.to_string(),
            pots,
            preset_name: None,
        })
    }
}

/// Parse `a,b,c,d` into four pot values for clap's `value_parser`.
pub fn parse_pots(s: &str) -> std::result::Result<[f32; 4], String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("Invalid pot value '{}': {}", part.trim(), e))
        })
        .collect::<std::result::Result<Vec<f32>, String>>()?;

    let pots: [f32; 4] = values
        .try_into()
        .map_err(|v: Vec<f32>| format!("Expected 4 comma-separated pots, got {}", v.len()))?;
    check_pots(&pots).map_err(|e| e.to_string())?;
    Ok(pots)
}
