//! Bounded-retry search for a valid event target within a scanner's cap.
//!
//! Candidates are sampled uniformly in the coverage cap and rejected when too
//! close to the scanner's own reference point or already occupied in the host
//! world. Exhausting the attempt bound abandons the trigger for this cycle;
//! nothing is queued or retried later.
use glam::Vec3;
use rand::RngCore;

use crate::adapter::WorldAdapter;
use crate::geom::{arc_degrees, sample_point_in_cap};
use crate::scanner::Scanner;

/// Default bound on candidate attempts per trigger.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Default minimum angular separation between a scanner and its target, in
/// degrees.
pub const DEFAULT_MIN_TARGET_DEG: f32 = 3.0;

/// Find an unoccupied target location within `scanner`'s coverage cap, at
/// least `min_target_deg` away from its reference point.
///
/// Each sampled candidate counts as one attempt, whether it fails the
/// distance rule or the occupancy check. Returns `None` once `max_attempts`
/// candidates have been rejected.
pub fn find_target(
    scanner: &Scanner,
    adapter: &dyn WorldAdapter,
    min_target_deg: f32,
    max_attempts: u32,
    rng: &mut dyn RngCore,
) -> Option<Vec3> {
    for _ in 0..max_attempts {
        let candidate = sample_point_in_cap(scanner.pos, scanner.radius_deg, rng);
        if arc_degrees(candidate, scanner.pos) < min_target_deg {
            continue;
        }
        if adapter.is_occupied(candidate.into()) {
            continue;
        }
        return Some(candidate);
    }
    None
}
