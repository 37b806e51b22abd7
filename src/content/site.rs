//! Site archetype, part, and faction selection.
//!
//! Two of the weighted-selection flavors live here: the repetition-weighted
//! site-core pick (listing an archetype twice doubles its odds) and the
//! default `[0,100]` threshold table of event outcomes.
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::outcome::OutcomeTable;
use crate::random::pick;

/// Core archetype of a generated site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SiteCore {
    /// A site with nothing of value.
    Nothing,
    /// A stash of generated items.
    ItemStash,
}

/// Optional hostile garrison part attached to a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SitePart {
    Manhunters,
    Outpost,
    Turrets,
}

/// Technology tier of a faction, ordered from primitive to advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TechLevel {
    Medieval,
    Industrial,
    Spacer,
    Ultra,
}

/// Disposition of an offworld faction toward the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FactionKind {
    OffworldCivil,
    OffworldHostile,
}

/// A faction assignment for a generated site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Faction {
    pub kind: FactionKind,
    pub tech_level: TechLevel,
}

impl Faction {
    /// An offworld faction at spacer tech, civil or hostile.
    pub fn offworld(kind: FactionKind) -> Self {
        Self {
            kind,
            tech_level: TechLevel::Spacer,
        }
    }
}

/// Event outcome archetype selected from the `[0,100]` threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutcomeKind {
    /// Long-dead site, nobody home.
    Abandoned,
    /// Survivors willing to talk.
    FriendlyCrew,
    /// Survivors in need of rescue.
    DistressedCrew,
    /// Prisoners held at the site.
    Captives,
    /// Picked over by looters; little remains.
    Scavenged,
    /// A trap laid around the wreck.
    Ambush,
}

impl OutcomeKind {
    /// Scale applied to the stash's total market value target.
    pub fn loot_value_scale(&self) -> f32 {
        match self {
            OutcomeKind::Scavenged => 0.5,
            OutcomeKind::Captives => 0.75,
            _ => 1.0,
        }
    }

    /// Whether this outcome forces a hostile garrison onto the site.
    pub fn forces_guards(&self) -> bool {
        matches!(self, OutcomeKind::Ambush)
    }

    /// Whether this outcome forces a civil offworld faction.
    pub fn forces_civil_faction(&self) -> bool {
        matches!(self, OutcomeKind::FriendlyCrew | OutcomeKind::DistressedCrew)
    }
}

/// The default outcome table.
///
/// Bounds partition `0..=100` with boundary rolls falling into the following
/// bucket: 0-9 abandoned, 10-19 friendly, 20-29 distressed, 30-44 captives,
/// 45-49 scavenged, 50-100 ambush.
pub fn default_outcome_table() -> OutcomeTable<OutcomeKind> {
    OutcomeTable::new(vec![
        (10, OutcomeKind::Abandoned),
        (20, OutcomeKind::FriendlyCrew),
        (30, OutcomeKind::DistressedCrew),
        (45, OutcomeKind::Captives),
        (50, OutcomeKind::Scavenged),
        (101, OutcomeKind::Ambush),
    ])
    .expect("default outcome table is well formed")
}

/// Pick a site core. The stash archetype is listed twice, doubling its odds
/// against the empty site.
pub fn pick_site_core(rng: &mut dyn RngCore) -> SiteCore {
    const CORES: [SiteCore; 3] = [SiteCore::ItemStash, SiteCore::ItemStash, SiteCore::Nothing];
    *pick(&CORES, rng).expect("core list is non-empty")
}

/// Pick a hostile garrison part, or none, uniformly.
pub fn pick_hostile_part(rng: &mut dyn RngCore) -> Option<SitePart> {
    const PARTS: [Option<SitePart>; 4] = [
        Some(SitePart::Manhunters),
        Some(SitePart::Outpost),
        Some(SitePart::Turrets),
        None,
    ];
    *pick(&PARTS, rng).expect("part list is non-empty")
}

/// Pick an offworld faction, civil or hostile with equal odds.
pub fn pick_offworld_faction(rng: &mut dyn RngCore) -> Faction {
    const KINDS: [FactionKind; 2] = [FactionKind::OffworldCivil, FactionKind::OffworldHostile];
    Faction::offworld(*pick(&KINDS, rng).expect("faction list is non-empty"))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn default_table_buckets_match_documented_ranges() {
        let table = default_outcome_table();
        assert_eq!(*table.select(0), OutcomeKind::Abandoned);
        assert_eq!(*table.select(9), OutcomeKind::Abandoned);
        assert_eq!(*table.select(10), OutcomeKind::FriendlyCrew);
        assert_eq!(*table.select(29), OutcomeKind::DistressedCrew);
        assert_eq!(*table.select(44), OutcomeKind::Captives);
        assert_eq!(*table.select(45), OutcomeKind::Scavenged);
        assert_eq!(*table.select(50), OutcomeKind::Ambush);
        assert_eq!(*table.select(100), OutcomeKind::Ambush);
    }

    #[test]
    fn stash_core_is_roughly_twice_as_likely() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut stash = 0u32;
        let total = 3_000u32;
        for _ in 0..total {
            if pick_site_core(&mut rng) == SiteCore::ItemStash {
                stash += 1;
            }
        }
        let fraction = stash as f32 / total as f32;
        assert!(
            (fraction - 2.0 / 3.0).abs() < 0.05,
            "stash fraction {fraction}"
        );
    }

    #[test]
    fn hostile_part_pick_includes_the_empty_option() {
        let mut rng = StdRng::seed_from_u64(32);
        let mut saw_none = false;
        let mut saw_some = false;
        for _ in 0..200 {
            match pick_hostile_part(&mut rng) {
                None => saw_none = true,
                Some(_) => saw_some = true,
            }
        }
        assert!(saw_none && saw_some);
    }

    #[test]
    fn tech_levels_are_ordered() {
        assert!(TechLevel::Spacer >= TechLevel::Industrial);
        assert!(TechLevel::Medieval < TechLevel::Industrial);
    }

    #[test]
    fn outcome_modifiers_follow_the_archetype() {
        assert_eq!(OutcomeKind::Scavenged.loot_value_scale(), 0.5);
        assert_eq!(OutcomeKind::Ambush.loot_value_scale(), 1.0);
        assert!(OutcomeKind::Ambush.forces_guards());
        assert!(OutcomeKind::FriendlyCrew.forces_civil_faction());
        assert!(!OutcomeKind::Abandoned.forces_civil_faction());
    }
}
