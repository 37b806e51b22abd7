//! Validated threshold tables for weighted outcome dispatch.
//!
//! An [`OutcomeTable`] is an ordered list of `(upper_bound, entry)` pairs
//! partitioning the integer roll domain `0..=100`. Selection takes the first
//! entry whose bound strictly exceeds the roll, so a roll equal to a bound
//! belongs to the following entry. Exhaustiveness and reachability are checked
//! once at construction; a malformed table is a configuration defect and never
//! reaches trigger time.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::random::roll_inclusive;

/// Largest value the roll domain can produce.
pub const ROLL_MAX: u32 = 100;

/// An exhaustive, non-overlapping threshold table over `0..=100`.
#[derive(Debug, Clone)]
pub struct OutcomeTable<T> {
    entries: Vec<(u32, T)>,
}

impl<T> OutcomeTable<T> {
    /// Build a table from `(upper_bound, entry)` pairs.
    ///
    /// Bounds must be strictly ascending (every entry reachable) and the final
    /// bound must exceed [`ROLL_MAX`] (no gap at the top of the domain).
    pub fn new(entries: Vec<(u32, T)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::MalformedTable("table has no entries".into()));
        }

        let mut previous: Option<u32> = None;
        for (bound, _) in &entries {
            if let Some(prev) = previous {
                if *bound <= prev {
                    return Err(Error::MalformedTable(format!(
                        "bound {bound} not above previous bound {prev}; entry unreachable"
                    )));
                }
            }
            previous = Some(*bound);
        }

        let last = entries.last().map(|(bound, _)| *bound).unwrap_or(0);
        if last <= ROLL_MAX {
            return Err(Error::MalformedTable(format!(
                "final bound {last} leaves rolls {last}..={ROLL_MAX} unassigned"
            )));
        }

        Ok(Self { entries })
    }

    /// Select the entry for a roll. Rolls beyond the domain clamp to the top.
    pub fn select(&self, roll: u32) -> &T {
        let roll = roll.min(ROLL_MAX);
        for (bound, entry) in &self.entries {
            if roll < *bound {
                return entry;
            }
        }
        // Unreachable after validation; the final bound exceeds ROLL_MAX.
        &self.entries[self.entries.len() - 1].1
    }

    /// Draw a uniform roll from `0..=100` and select its entry.
    pub fn roll(&self, rng: &mut dyn RngCore) -> &T {
        self.select(roll_inclusive(0, ROLL_MAX, rng))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries. Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
