//! Mean-time-between-events trigger math.
//!
//! A scanner's base MTB rate is scaled by its effective coverage fraction and
//! converted into a single Bernoulli check per coarse tick: over many checks
//! of the given interval, the expected time between successes equals the
//! effective MTB.
use rand::RngCore;

use crate::coverage::COVERAGE_EPSILON;
use crate::random::rand01;

/// Host ticks per simulated day.
pub const TICKS_PER_DAY: f32 = 60_000.0;

/// Default coarse check interval in host ticks.
pub const DEFAULT_CHECK_INTERVAL_TICKS: f32 = 250.0;

/// Effective mean time between events in days, or `None` when the coverage
/// fraction is too small to ever fire.
#[inline]
pub fn effective_mtb_days(base_mtb_days: f32, coverage: f32) -> Option<f32> {
    if coverage <= COVERAGE_EPSILON {
        return None;
    }
    Some(base_mtb_days / coverage)
}

/// Single stochastic trigger check.
///
/// `mtb` is expressed in some unit (e.g. days), `mtb_unit` converts that unit
/// into the time base of `check_interval` (e.g. ticks per day). The success
/// probability is `check_interval / (mtb * mtb_unit)`, clamped to [0, 1].
pub fn mtb_event_occurs(
    mtb: f32,
    mtb_unit: f32,
    check_interval: f32,
    rng: &mut dyn RngCore,
) -> bool {
    if mtb <= 0.0 || mtb_unit <= 0.0 || check_interval <= 0.0 {
        return false;
    }
    let p = (check_interval / (mtb * mtb_unit)).clamp(0.0, 1.0);
    rand01(rng) < p
}
