//! Weighted content generation: assembling the site produced by a trigger.
//!
//! The pipeline runs three weighted selections in sequence: the outcome
//! archetype (threshold table over `[0,100]`), the site core
//! (repetition-weighted), and the loot generator (conditional candidate list).
//! Generated items flow into a bounded [`Stash`]; anything the stash refuses
//! is routed to the host's fallback disposal path rather than dropped.
use glam::Vec3;
use mint::Vector3;
use rand::RngCore;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod loot;
pub mod outcome;
pub mod site;

use crate::adapter::WorldAdapter;
use crate::error::Result;
use crate::random::{chance, roll_inclusive};
use crate::scanner::{Scanner, ScannerId};
use crate::schedule::TICKS_PER_DAY;
use loot::{maybe_rare_weapon, pick_loot_spec};
use outcome::OutcomeTable;
use site::{
    default_outcome_table, pick_hostile_part, pick_offworld_faction, pick_site_core, Faction,
    FactionKind, OutcomeKind, SiteCore, SitePart,
};

/// One generated item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Host definition id.
    pub def: String,
    /// Stack count.
    pub stack: u32,
    /// Market value of the whole stack.
    pub market_value: f32,
}

impl Item {
    /// Create an item.
    pub fn new(def: impl Into<String>, stack: u32, market_value: f32) -> Self {
        Self {
            def: def.into(),
            stack,
            market_value,
        }
    }
}

/// Bounded item container attached to a generated site.
#[derive(Debug, Clone, Default)]
pub struct Stash {
    items: Vec<Item>,
    capacity: usize,
}

impl Stash {
    /// Create a stash holding at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Add an item, handing it back when the stash is full.
    pub fn try_add(&mut self, item: Item) -> std::result::Result<(), Item> {
        if self.items.len() >= self.capacity {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Stored items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stash holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fully assembled site, handed to the host for registration. The subsystem
/// keeps no reference to it afterward.
#[derive(Debug, Clone)]
pub struct SiteSpec {
    /// Scanner that produced this event.
    pub scanner: ScannerId,
    /// Target location on the unit sphere.
    pub pos: Vector3<f32>,
    /// Core archetype.
    pub core: SiteCore,
    /// Optional hostile garrison.
    pub part: Option<SitePart>,
    /// Outcome archetype drawn from the threshold table.
    pub outcome: OutcomeKind,
    /// Optional faction assignment.
    pub faction: Option<Faction>,
    /// Expiry in host ticks, if any.
    pub timeout_ticks: Option<u64>,
    /// Generated contents.
    pub stash: Stash,
}

/// Tuning for the content pipeline.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Chance a site spawns without a hostile garrison.
    pub chance_no_hostile_part: f32,
    /// Chance an ungarrisoned site is claimed by an offworld faction.
    pub offworld_faction_chance: f32,
    /// Inclusive site-timeout range in days.
    pub timeout_days: (u32, u32),
    /// Maximum items the stash accepts.
    pub stash_capacity: usize,
    /// Outcome archetype table. Always validated: construction of a table
    /// fails on malformed input, so no defect can reach trigger time.
    pub outcome_table: OutcomeTable<OutcomeKind>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            chance_no_hostile_part: 0.4,
            offworld_faction_chance: 0.35,
            timeout_days: (15, 60),
            stash_capacity: 20,
            outcome_table: default_outcome_table(),
        }
    }
}

impl ContentConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chance of skipping the hostile garrison.
    pub fn with_chance_no_hostile_part(mut self, chance: f32) -> Self {
        self.chance_no_hostile_part = chance;
        self
    }

    /// Set the offworld faction claim chance.
    pub fn with_offworld_faction_chance(mut self, chance: f32) -> Self {
        self.offworld_faction_chance = chance;
        self
    }

    /// Set the inclusive timeout range in days.
    pub fn with_timeout_days(mut self, lo: u32, hi: u32) -> Self {
        self.timeout_days = (lo, hi);
        self
    }

    /// Set the stash capacity.
    pub fn with_stash_capacity(mut self, capacity: usize) -> Self {
        self.stash_capacity = capacity;
        self
    }

    /// Replace the outcome table.
    pub fn with_outcome_table(mut self, table: OutcomeTable<OutcomeKind>) -> Self {
        self.outcome_table = table;
        self
    }

    /// Validate the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.chance_no_hostile_part) {
            return Err(crate::error::Error::InvalidConfig(
                "chance_no_hostile_part must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.offworld_faction_chance) {
            return Err(crate::error::Error::InvalidConfig(
                "offworld_faction_chance must be within [0, 1]".into(),
            ));
        }
        if self.timeout_days.0 > self.timeout_days.1 {
            return Err(crate::error::Error::InvalidConfig(
                "timeout_days range is inverted".into(),
            ));
        }
        if self.stash_capacity == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "stash_capacity must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Assemble the site for a triggered event at `target`.
///
/// Loot is generated only for stash cores on scanners with improved sensors;
/// items the stash refuses go to the adapter's disposal path.
pub fn build_site(
    scanner: &Scanner,
    target: Vec3,
    config: &ContentConfig,
    adapter: &mut dyn WorldAdapter,
    rng: &mut dyn RngCore,
) -> SiteSpec {
    let outcome = *config.outcome_table.roll(rng);

    let core = pick_site_core(rng);

    let part = if outcome.forces_guards() {
        pick_hostile_part(rng).or(Some(SitePart::Manhunters))
    } else if chance(config.chance_no_hostile_part, rng) {
        None
    } else {
        pick_hostile_part(rng)
    };

    let faction = if outcome.forces_civil_faction() {
        Some(Faction::offworld(FactionKind::OffworldCivil))
    } else if part.is_some() {
        Some(Faction::offworld(FactionKind::OffworldHostile))
    } else if chance(config.offworld_faction_chance, rng) {
        Some(pick_offworld_faction(rng))
    } else {
        None
    };

    let mut stash = Stash::with_capacity(config.stash_capacity);
    if core == SiteCore::ItemStash && scanner.improved_sensors {
        let loot_spec = pick_loot_spec(faction.as_ref(), outcome.loot_value_scale(), rng);
        debug!(
            "Scanner {:?} stash loot: {:?} x{}.",
            scanner.id, loot_spec.generator, loot_spec.count
        );
        for item in adapter.generate_items(&loot_spec, rng) {
            if let Err(rejected) = stash.try_add(item) {
                adapter.discard_item(rejected);
            }
        }
        if let Some(weapon) = maybe_rare_weapon(faction.as_ref(), rng) {
            if let Err(rejected) = stash.try_add(weapon) {
                adapter.discard_item(rejected);
            }
        }
    }

    let days = roll_inclusive(config.timeout_days.0, config.timeout_days.1, rng);
    let timeout_ticks = Some(days as u64 * TICKS_PER_DAY as u64);

    SiteSpec {
        scanner: scanner.id,
        pos: target.into(),
        core,
        part,
        outcome,
        faction,
        timeout_ticks,
        stash,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::adapter::SiteHandle;
    use crate::content::loot::LootSpec;
    use crate::scanner::{ScannerRegistry, ScannerSpec};

    struct ScriptedHost {
        items_per_request: u32,
        discarded: Vec<Item>,
    }

    impl ScriptedHost {
        fn yielding(items_per_request: u32) -> Self {
            Self {
                items_per_request,
                discarded: Vec::new(),
            }
        }
    }

    impl WorldAdapter for ScriptedHost {
        fn is_occupied(&self, _point: Vector3<f32>) -> bool {
            false
        }

        fn create_site(&mut self, _site: SiteSpec) -> SiteHandle {
            SiteHandle(1)
        }

        fn generate_items(&mut self, spec: &LootSpec, _rng: &mut dyn RngCore) -> Vec<Item> {
            (0..self.items_per_request)
                .map(|i| Item::new(format!("{:?}_{i}", spec.generator), 1, 100.0))
                .collect()
        }

        fn discard_item(&mut self, item: Item) {
            self.discarded.push(item);
        }

        fn notify(&mut self, _site: SiteHandle) {}
    }

    fn scanner(improved_sensors: bool) -> Scanner {
        let mut registry = ScannerRegistry::new();
        let id = registry.register(
            ScannerSpec::new(Vec3::Z, 20.0, 30.0).with_improved_sensors(improved_sensors),
        );
        registry.get(id).unwrap().clone()
    }

    #[test]
    fn stash_try_add_enforces_capacity() {
        let mut stash = Stash::with_capacity(2);
        assert!(stash.try_add(Item::new("a", 1, 1.0)).is_ok());
        assert!(stash.try_add(Item::new("b", 1, 1.0)).is_ok());
        let rejected = stash.try_add(Item::new("c", 1, 1.0)).unwrap_err();
        assert_eq!(rejected.def, "c");
        assert_eq!(stash.len(), 2);
    }

    #[test]
    fn build_site_records_scanner_and_timeout() {
        let scanner = scanner(false);
        let mut adapter = ScriptedHost::yielding(0);
        let config = ContentConfig::default();
        let mut rng = StdRng::seed_from_u64(50);

        let spec = build_site(&scanner, Vec3::X, &config, &mut adapter, &mut rng);
        assert_eq!(spec.scanner, scanner.id);

        let ticks = spec.timeout_ticks.unwrap();
        let lo = 15 * TICKS_PER_DAY as u64;
        let hi = 60 * TICKS_PER_DAY as u64;
        assert!((lo..=hi).contains(&ticks));
    }

    #[test]
    fn sites_without_improved_sensors_have_empty_stashes() {
        let scanner = scanner(false);
        let mut adapter = ScriptedHost::yielding(5);
        let config = ContentConfig::default();
        let mut rng = StdRng::seed_from_u64(51);

        for _ in 0..50 {
            let spec = build_site(&scanner, Vec3::X, &config, &mut adapter, &mut rng);
            assert!(spec.stash.is_empty());
        }
    }

    #[test]
    fn improved_sensors_fill_stash_cores() {
        let scanner = scanner(true);
        let mut adapter = ScriptedHost::yielding(5);
        let config = ContentConfig::default();
        let mut rng = StdRng::seed_from_u64(52);

        let mut saw_loot = false;
        for _ in 0..50 {
            let spec = build_site(&scanner, Vec3::X, &config, &mut adapter, &mut rng);
            if spec.core == SiteCore::ItemStash {
                assert!(!spec.stash.is_empty());
                saw_loot = true;
            } else {
                assert!(spec.stash.is_empty());
            }
        }
        assert!(saw_loot, "stash cores occur two thirds of the time");
    }

    #[test]
    fn overflow_items_go_to_the_disposal_path() {
        let scanner = scanner(true);
        let mut adapter = ScriptedHost::yielding(10);
        let config = ContentConfig::default().with_stash_capacity(3);
        let mut rng = StdRng::seed_from_u64(53);

        let mut total_generated = 0usize;
        let mut total_stored = 0usize;
        for _ in 0..50 {
            let spec = build_site(&scanner, Vec3::X, &config, &mut adapter, &mut rng);
            if spec.core == SiteCore::ItemStash {
                total_generated += 10;
                total_stored += spec.stash.len();
                assert!(spec.stash.len() <= 3);
            }
        }
        // Nothing silently dropped: generated = stored + discarded, with the
        // occasional rare weapon also landing in the discard pile when full.
        assert!(adapter.discarded.len() >= total_generated - total_stored);
    }

    #[test]
    fn ambush_outcomes_always_have_guards() {
        let scanner = scanner(false);
        let mut adapter = ScriptedHost::yielding(0);
        let config = ContentConfig::default();
        let mut rng = StdRng::seed_from_u64(54);

        for _ in 0..200 {
            let spec = build_site(&scanner, Vec3::X, &config, &mut adapter, &mut rng);
            if spec.outcome == OutcomeKind::Ambush {
                assert!(spec.part.is_some());
                assert!(matches!(
                    spec.faction,
                    Some(Faction {
                        kind: FactionKind::OffworldHostile,
                        ..
                    })
                ));
            }
            if spec.outcome.forces_civil_faction() {
                assert!(matches!(
                    spec.faction,
                    Some(Faction {
                        kind: FactionKind::OffworldCivil,
                        ..
                    })
                ));
            }
        }
    }

    #[test]
    fn content_config_validation_catches_bad_ranges() {
        assert!(ContentConfig::default().validate().is_ok());
        assert!(ContentConfig::default()
            .with_chance_no_hostile_part(1.5)
            .validate()
            .is_err());
        assert!(ContentConfig::default()
            .with_timeout_days(60, 15)
            .validate()
            .is_err());
        assert!(ContentConfig::default()
            .with_stash_capacity(0)
            .validate()
            .is_err());
    }
}
