//! Item-collection generator selection.
//!
//! A candidate list of generator specs is assembled per trigger: membership of
//! the rare AI-core generator is conditional on a rarity roll and a technology
//! gate, while the bulk generators are always present, so the list can never
//! be empty and selection always yields something. One candidate is then
//! picked uniformly and resolved by the host's item-generation service.
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::site::{Faction, TechLevel};
use crate::content::Item;
use crate::random::{chance, pick, range_f32, roll_inclusive};

/// Chance that the AI-core generator joins the candidate list.
pub const AI_CORE_CHANCE: f32 = 0.25;

/// Inclusive item-count range for bulk generators.
pub const ITEM_COUNT_RANGE: (u32, u32) = (5, 9);

/// Total market value target range for bulk generators.
pub const TOTAL_VALUE_RANGE: (f32, f32) = (2_000.0, 4_000.0);

/// Families of item collections the host can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LootGenerator {
    AiCores,
    Weapons,
    RawResources,
    Apparel,
    AncientRelics,
}

/// A resolved generator request handed to the host.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LootSpec {
    /// Which collection family to generate.
    pub generator: LootGenerator,
    /// Number of items to produce.
    pub count: u32,
    /// Total market value target, if the family is value-driven.
    pub total_value: Option<f32>,
    /// Technology filter for generated items.
    pub tech_level: TechLevel,
}

/// Faction tech level used when a site has no faction.
pub const DEFAULT_TECH_LEVEL: TechLevel = TechLevel::Spacer;

/// Assemble the candidate generator list and pick one uniformly.
///
/// `value_scale` shrinks the market-value target for scavenged or otherwise
/// diminished outcomes.
pub fn pick_loot_spec(
    faction: Option<&Faction>,
    value_scale: f32,
    rng: &mut dyn RngCore,
) -> LootSpec {
    let tech_level = faction.map(|f| f.tech_level).unwrap_or(DEFAULT_TECH_LEVEL);

    let mut candidates: Vec<LootGenerator> = Vec::with_capacity(5);
    if chance(AI_CORE_CHANCE, rng) && tech_level >= TechLevel::Spacer {
        candidates.push(LootGenerator::AiCores);
    }
    candidates.extend([
        LootGenerator::Weapons,
        LootGenerator::RawResources,
        LootGenerator::Apparel,
        LootGenerator::AncientRelics,
    ]);

    // The bulk generators above guarantee a non-empty list; fall back to
    // weapons if that invariant is ever broken.
    let generator = pick(&candidates, rng)
        .copied()
        .unwrap_or(LootGenerator::Weapons);

    match generator {
        LootGenerator::AiCores => LootSpec {
            generator,
            count: 1,
            total_value: None,
            tech_level,
        },
        _ => LootSpec {
            generator,
            count: roll_inclusive(ITEM_COUNT_RANGE.0, ITEM_COUNT_RANGE.1, rng),
            total_value: Some(
                range_f32(TOTAL_VALUE_RANGE.0, TOTAL_VALUE_RANGE.1, rng) * value_scale,
            ),
            tech_level,
        },
    }
}

/// Chance gate for the rare bonus weapon, applied on top of the tech gate.
pub const RARE_WEAPON_CHANCE: f32 = 0.10;

/// Definition id of the rare bonus weapon.
pub const RARE_WEAPON_DEF: &str = "prototype_railgun";

/// Roll for the rare bonus weapon: requires a faction at industrial tech or
/// better and a low-probability success.
pub fn maybe_rare_weapon(faction: Option<&Faction>, rng: &mut dyn RngCore) -> Option<Item> {
    let faction = faction?;
    if faction.tech_level < TechLevel::Industrial {
        return None;
    }
    if !chance(RARE_WEAPON_CHANCE, rng) {
        return None;
    }
    Some(Item::new(RARE_WEAPON_DEF, 1, 1_500.0))
}
