//! Interruption resolver: which competing scanner shadows which.
//!
//! Suppression is a strict total order over eligible scanners sharing a
//! domain, ranked by base MTB ascending, then identity ascending. The more
//! aggressive scanner (lower base MTB) wins overlapping territory; equal
//! rates fall back to the stable identity so two scanners can never suppress
//! each other mutually.
use crate::geom::Cap;
use crate::scanner::{Scanner, ScannerRegistry};

/// Whether `other` suppresses `scanner`'s coverage where their caps overlap.
///
/// Asymmetric: for any two distinct eligible scanners exactly one direction
/// holds.
pub fn is_suppressed_by(scanner: &Scanner, other: &Scanner) -> bool {
    if other.id == scanner.id || !other.eligible {
        return false;
    }
    if other.mtb_days != scanner.mtb_days {
        return other.mtb_days < scanner.mtb_days;
    }
    other.id < scanner.id
}

/// Build the ephemeral suppressor set for `scanner`: the coverage caps of
/// every other eligible scanner that outranks it. Rebuilt fully on each
/// coverage recompute, never persisted.
pub fn suppressor_caps(registry: &ScannerRegistry, scanner: &Scanner) -> Vec<Cap> {
    registry
        .iter()
        .filter(|other| is_suppressed_by(scanner, other))
        .map(|other| Cap::new(other.pos, other.radius_deg))
        .collect()
}
