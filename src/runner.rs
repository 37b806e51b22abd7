//! Per-tick driver over a scanner registry.
//!
//! [`ScanRunner`] holds the configuration and the host adapter; each call to
//! [`ScanRunner::tick`] processes every scanner synchronously to completion:
//! refresh the coverage cache, roll the MTB trigger, search for a target, and
//! assemble the site. Every failure path degrades to "this cycle produced
//! nothing"; nothing propagates into the host tick loop.
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::adapter::{SiteHandle, WorldAdapter};
use crate::content::{build_site, ContentConfig};
use crate::coverage::refresh_coverage;
use crate::error::{Error, Result};
use crate::placement::{find_target, DEFAULT_MIN_TARGET_DEG, MAX_PLACEMENT_ATTEMPTS};
use crate::scanner::{ScannerId, ScannerRegistry};
use crate::schedule::{
    effective_mtb_days, mtb_event_occurs, DEFAULT_CHECK_INTERVAL_TICKS, TICKS_PER_DAY,
};

/// Configuration for running the scan subsystem.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Coarse check interval in host ticks.
    pub check_interval_ticks: f32,
    /// Host ticks per simulated day.
    pub ticks_per_day: f32,
    /// Minimum angular separation between scanner and target, in degrees.
    pub min_target_deg: f32,
    /// Bound on placement candidate attempts per trigger.
    pub max_placement_attempts: u32,
    /// Content pipeline tuning.
    pub content: ContentConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            check_interval_ticks: DEFAULT_CHECK_INTERVAL_TICKS,
            ticks_per_day: TICKS_PER_DAY,
            min_target_deg: DEFAULT_MIN_TARGET_DEG,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            content: ContentConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coarse check interval in ticks.
    pub fn with_check_interval_ticks(mut self, ticks: f32) -> Self {
        self.check_interval_ticks = ticks;
        self
    }

    /// Set the tick length of a simulated day.
    pub fn with_ticks_per_day(mut self, ticks: f32) -> Self {
        self.ticks_per_day = ticks;
        self
    }

    /// Set the minimum target separation in degrees.
    pub fn with_min_target_deg(mut self, degrees: f32) -> Self {
        self.min_target_deg = degrees;
        self
    }

    /// Set the placement attempt bound.
    pub fn with_max_placement_attempts(mut self, attempts: u32) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Replace the content pipeline tuning.
    pub fn with_content(mut self, content: ContentConfig) -> Self {
        self.content = content;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.check_interval_ticks <= 0.0 {
            return Err(Error::InvalidConfig(
                "check_interval_ticks must be > 0".into(),
            ));
        }
        if self.ticks_per_day <= 0.0 {
            return Err(Error::InvalidConfig("ticks_per_day must be > 0".into()));
        }
        if self.min_target_deg < 0.0 {
            return Err(Error::InvalidConfig("min_target_deg must be >= 0".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        self.content.validate()
    }
}

/// Drives all scanners of one domain against a host adapter.
pub struct ScanRunner<'a> {
    /// Configuration applied to this runner.
    pub config: ScanConfig,
    adapter: &'a mut dyn WorldAdapter,
}

impl<'a> ScanRunner<'a> {
    /// Create a runner after validating the configuration.
    pub fn try_new(config: ScanConfig, adapter: &'a mut dyn WorldAdapter) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, adapter })
    }

    /// Process one coarse tick for every scanner in the registry, returning
    /// the handles of sites created this cycle.
    pub fn tick(
        &mut self,
        registry: &mut ScannerRegistry,
        rng: &mut dyn RngCore,
    ) -> Vec<SiteHandle> {
        let mut created = Vec::new();
        for id in registry.ids() {
            if let Some(handle) = self.step_scanner(registry, id, rng) {
                created.push(handle);
            }
        }
        created
    }

    /// One scanner's coarse-tick step: refresh coverage, roll the trigger,
    /// and on success run the event pipeline exactly once.
    fn step_scanner(
        &mut self,
        registry: &mut ScannerRegistry,
        id: ScannerId,
        rng: &mut dyn RngCore,
    ) -> Option<SiteHandle> {
        let eligible = registry.get(id)?.eligible;
        if !eligible {
            return None;
        }

        let coverage = refresh_coverage(registry, id)?;
        let scanner = registry.get(id)?;
        let mtb_days = effective_mtb_days(scanner.mtb_days, coverage)?;

        if !mtb_event_occurs(
            mtb_days,
            self.config.ticks_per_day,
            self.config.check_interval_ticks,
            rng,
        ) {
            return None;
        }

        debug!(
            "Scanner {:?} triggered at coverage {:.3} (effective MTB {:.1} days).",
            id, coverage, mtb_days
        );
        self.fire(registry, id, rng)
    }

    /// Run the event pipeline for a scanner, skipping the MTB roll. Mirrors
    /// the host's debug "force event" action.
    pub fn force_trigger(
        &mut self,
        registry: &mut ScannerRegistry,
        id: ScannerId,
        rng: &mut dyn RngCore,
    ) -> Option<SiteHandle> {
        if !registry.get(id)?.eligible {
            return None;
        }
        self.fire(registry, id, rng)
    }

    fn fire(
        &mut self,
        registry: &mut ScannerRegistry,
        id: ScannerId,
        rng: &mut dyn RngCore,
    ) -> Option<SiteHandle> {
        let scanner = registry.get(id)?.clone();

        let target = match find_target(
            &scanner,
            &*self.adapter,
            self.config.min_target_deg,
            self.config.max_placement_attempts,
            rng,
        ) {
            Some(target) => target,
            None => {
                // Trigger opportunity is consumed; nothing is queued.
                warn!("Scanner {:?} found no free target; cycle abandoned.", id);
                return None;
            }
        };

        let site = build_site(&scanner, target, &self.config.content, self.adapter, rng);
        let outcome = site.outcome;
        let handle = self.adapter.create_site(site);
        self.adapter.notify(handle);
        info!("Scanner {:?} created site {:?} ({:?}).", id, handle, outcome);
        Some(handle)
    }
}
