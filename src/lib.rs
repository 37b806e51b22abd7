#![forbid(unsafe_code)]
//! anomaly_scan: long-range scanner simulation with Monte-Carlo coverage
//! estimation, MTB event scheduling, and weighted site generation.
//!
//! Modules:
//! - geom: unit-sphere cap sampling and visibility
//! - scanner: scanner records and the per-domain registry
//! - suppression, coverage: which competitors shadow a scanner, and how much
//! - schedule: mean-time-between-events trigger math
//! - placement: bounded-retry target search
//! - content: weighted outcome tables, site assembly, loot generation
//! - adapter, runner: host boundary and the per-tick driver
pub mod adapter;
pub mod content;
pub mod coverage;
pub mod error;
pub mod geom;
pub mod placement;
mod random;
pub mod runner;
pub mod scanner;
pub mod schedule;
pub mod suppression;

/// Convenient re-exports for common types. Import with `use anomaly_scan::prelude::*;`.
pub mod prelude {
    pub use crate::adapter::{SiteHandle, WorldAdapter};
    pub use crate::content::loot::{LootGenerator, LootSpec};
    pub use crate::content::outcome::OutcomeTable;
    pub use crate::content::site::{
        default_outcome_table, Faction, FactionKind, OutcomeKind, SiteCore, SitePart, TechLevel,
    };
    pub use crate::content::{ContentConfig, Item, SiteSpec, Stash};
    pub use crate::coverage::{estimate_coverage, refresh_coverage, COVERAGE_EPSILON};
    pub use crate::error::{Error, Result};
    pub use crate::geom::Cap;
    pub use crate::placement::find_target;
    pub use crate::runner::{ScanConfig, ScanRunner};
    pub use crate::scanner::{Scanner, ScannerId, ScannerRegistry, ScannerSpec};
    pub use crate::schedule::{effective_mtb_days, mtb_event_occurs};
    pub use crate::suppression::{is_suppressed_by, suppressor_caps};
}
