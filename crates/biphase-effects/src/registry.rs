//! Effect lookup by name.
//!
//! Presets and the CLI name effects with a lowercase id. The registry maps
//! that id to a descriptor and a factory returning a boxed [`PedalEffect`].

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::phaser::{PedalEffect, PhaserEffect};

/// Describes an effect in the registry.
#[derive(Debug, Clone, Copy)]
pub struct EffectDescriptor {
    /// Unique identifier for the effect (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description of the effect.
    pub description: &'static str,
    /// What each of the four pots controls.
    pub pots: [&'static str; 4],
}

/// Factory function type for creating effects.
type EffectFactory = fn() -> Box<dyn PedalEffect + Send>;

struct RegistryEntry {
    descriptor: EffectDescriptor,
    factory: EffectFactory,
}

static ENTRIES: &[RegistryEntry] = &[RegistryEntry {
    descriptor: EffectDescriptor {
        id: PhaserEffect::NAME,
        name: "Phaser",
        description: "Triangle-swept 3-stage allpass phaser with feedback",
        pots: ["LFO period", "Feedback", "Center frequency", "Q"],
    },
    factory: || Box::new(PhaserEffect::new()),
}];

/// All registered effects.
pub fn all_effects() -> impl Iterator<Item = &'static EffectDescriptor> {
    ENTRIES.iter().map(|e| &e.descriptor)
}

/// Look up a descriptor by id.
pub fn find(id: &str) -> Option<&'static EffectDescriptor> {
    all_effects().find(|d| d.id == id)
}

/// Create an effect by id, initialized with the given pots.
///
/// Returns `None` for an unknown id.
///
/// # Example
///
/// ```rust
/// use biphase_core::Effect;
/// use biphase_effects::{PedalEffect, registry};
///
/// let mut phaser = registry::create("phaser", [0.5, 0.2, 0.4, 0.5]).unwrap();
/// assert_eq!(phaser.name(), "phaser");
/// assert!(phaser.process(0.5).is_finite());
/// assert!(registry::create("flanger", [0.0; 4]).is_none());
/// ```
pub fn create(id: &str, pots: [f32; 4]) -> Option<Box<dyn PedalEffect + Send>> {
    let entry = ENTRIES.iter().find(|e| e.descriptor.id == id)?;
    let mut effect = (entry.factory)();
    let [p1, p2, p3, p4] = pots;
    effect.init(p1, p2, p3, p4);
    Some(effect)
}
