//! Monte-Carlo estimation of a scanner's uncontested coverage fraction.
//!
//! The estimator samples a fixed number of points uniformly within the
//! scanner's coverage cap and counts how many fall outside every suppressor's
//! cap. No closed-form cap intersection is attempted; the statistical estimate
//! is the design.
//!
//! Sampling is reproducible per scanner: a private [`StdRng`] is seeded from
//! the scanner's stable identity, so repeated recomputes of an unchanged
//! configuration return the same fraction and the caller's random stream is
//! never touched.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::geom::{sample_point_in_cap, Cap};
use crate::scanner::{Scanner, ScannerId, ScannerRegistry};
use crate::suppression::suppressor_caps;

/// Fixed sample count per coverage estimate.
pub const COVERAGE_SAMPLES: u32 = 400;

/// Fractions at or below this are treated as "no coverage" by the scheduler.
pub const COVERAGE_EPSILON: f32 = 0.001;

/// Estimate the fraction of `scanner`'s coverage cap not shadowed by any of
/// the given suppressor caps. Returns a value in [0, 1].
///
/// Short-circuits: an ineligible scanner has 0.0 coverage, and an empty
/// suppressor set yields exactly 1.0, both without sampling.
pub fn estimate_coverage(scanner: &Scanner, suppressors: &[Cap]) -> f32 {
    if !scanner.eligible {
        return 0.0;
    }
    if suppressors.is_empty() {
        return 1.0;
    }

    let mut rng = StdRng::seed_from_u64(scanner.id.0);
    let mut unblocked = 0u32;
    for _ in 0..COVERAGE_SAMPLES {
        let point = sample_point_in_cap(scanner.pos, scanner.radius_deg, &mut rng);
        let blocked = suppressors.iter().any(|cap| cap.contains(point));
        if !blocked {
            unblocked += 1;
        }
    }

    unblocked as f32 / COVERAGE_SAMPLES as f32
}

/// Recompute and cache the coverage fraction for one scanner if its cache is
/// stale, returning the current value. Returns `None` for an unknown id.
pub fn refresh_coverage(registry: &mut ScannerRegistry, id: ScannerId) -> Option<f32> {
    let scanner = registry.get(id)?;
    if !scanner.coverage_is_dirty() {
        return Some(scanner.coverage());
    }

    let caps = suppressor_caps(registry, scanner);
    let fraction = estimate_coverage(scanner, &caps);

    let scanner = registry.get_mut(id)?;
    scanner.set_coverage(fraction);
    Some(fraction)
}

/// Refresh every stale coverage cache in the registry.
pub fn refresh_all(registry: &mut ScannerRegistry) {
    for id in registry.ids() {
        let _ = refresh_coverage(registry, id);
    }
}
