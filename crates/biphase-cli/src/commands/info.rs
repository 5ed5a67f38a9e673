//! Show how a set of pots maps onto effect parameters.

use crate::commands::common::PotArgs;
use crate::error::Error;
use biphase_effects::{PhaserEffect, PhaserParams, registry};
use clap::Args;

/// Print the effect and its derived parameters without processing audio.
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pots: PotArgs,

    /// List every registered effect instead
    #[arg(long, conflicts_with_all = ["pots", "preset"])]
    list: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    if args.list {
        for desc in registry::all_effects() {
            println!("{:<10} {}", desc.id, desc.description);
        }
        return Ok(());
    }

    let setup = args.pots.resolve()?;
    let desc = registry::find(&setup.effect)
        .ok_or_else(|| Error::UnknownEffect(setup.effect.clone()))?;

    if let Some(name) = &setup.preset_name {
        println!("Preset:  {name}");
    }
    println!("Effect:  {} ({})", desc.name, desc.id);
    println!("         {}", desc.description);
    println!("\nPots:");
    for (i, (label, value)) in desc.pots.iter().zip(setup.pots).enumerate() {
        println!("  {}. {:<18} {:.3}", i + 1, label, value);
    }

    if desc.id == PhaserEffect::NAME {
        let [p1, p2, p3, p4] = setup.pots;
        println!("\n{}", PhaserParams::from_pots(p1, p2, p3, p4));
    }

    Ok(())
}
