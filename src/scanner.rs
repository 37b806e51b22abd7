//! Scanner records and the per-domain registry.
//!
//! A [`Scanner`] is the subsystem's view of one host entity: a position on the
//! unit sphere, an angular coverage radius, a base mean-time-between-events
//! rate, and host-derived eligibility. The [`ScannerRegistry`] owns every
//! scanner of one simulated domain and is passed into the subsystem explicitly,
//! so independent domains can coexist in tests.
//!
//! The effective-coverage fraction is derived state: it is cached on the record
//! behind an explicit dirty flag and recomputed on demand (see
//! [`crate::coverage`]), never trusted across a host reload.
use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable scanner identity, allocated monotonically by the registry.
///
/// Used for suppression tie-breaks and to seed reproducible coverage sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScannerId(pub u64);

/// Parameters for registering a scanner.
#[derive(Debug, Clone)]
pub struct ScannerSpec {
    /// Reference position on the unit sphere.
    pub pos: Vec3,
    /// Angular coverage radius in degrees.
    pub radius_deg: f32,
    /// Base mean time between events, in days, at 100% coverage.
    pub mtb_days: f32,
    /// Whether the host entity currently qualifies (powered, spawned, owned).
    pub eligible: bool,
    /// Research gate: whether triggered stash sites receive generated loot.
    pub improved_sensors: bool,
}

impl ScannerSpec {
    /// Create a spec with the required fields; eligibility defaults to true.
    pub fn new(pos: Vec3, radius_deg: f32, mtb_days: f32) -> Self {
        Self {
            pos,
            radius_deg,
            mtb_days,
            eligible: true,
            improved_sensors: false,
        }
    }

    /// Set initial eligibility.
    pub fn with_eligible(mut self, eligible: bool) -> Self {
        self.eligible = eligible;
        self
    }

    /// Set the improved-sensors research gate.
    pub fn with_improved_sensors(mut self, improved: bool) -> Self {
        self.improved_sensors = improved;
        self
    }
}

/// One scanner entity as tracked by the subsystem.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Stable identity.
    pub id: ScannerId,
    /// Reference position on the unit sphere.
    pub pos: Vec3,
    /// Angular coverage radius in degrees.
    pub radius_deg: f32,
    /// Base mean time between events, in days, at 100% coverage.
    pub mtb_days: f32,
    /// Whether the host entity currently qualifies.
    pub eligible: bool,
    /// Research gate for loot generation.
    pub improved_sensors: bool,
    coverage: f32,
    coverage_dirty: bool,
}

impl Scanner {
    fn new(id: ScannerId, spec: ScannerSpec) -> Self {
        Self {
            id,
            pos: spec.pos.normalize_or_zero(),
            radius_deg: spec.radius_deg,
            mtb_days: spec.mtb_days,
            eligible: spec.eligible,
            improved_sensors: spec.improved_sensors,
            coverage: 0.0,
            coverage_dirty: true,
        }
    }

    /// Cached effective-coverage fraction in [0, 1].
    ///
    /// Only meaningful when [`Scanner::coverage_is_dirty`] is false; refresh
    /// via [`crate::coverage::refresh_coverage`].
    #[inline]
    pub fn coverage(&self) -> f32 {
        self.coverage
    }

    /// Whether the cached coverage must be recomputed before use.
    #[inline]
    pub fn coverage_is_dirty(&self) -> bool {
        self.coverage_dirty
    }

    pub(crate) fn set_coverage(&mut self, coverage: f32) {
        self.coverage = coverage;
        self.coverage_dirty = false;
    }

    pub(crate) fn mark_coverage_dirty(&mut self) {
        self.coverage_dirty = true;
    }
}

/// Registry of all scanners sharing one spatial domain.
#[derive(Debug, Default)]
pub struct ScannerRegistry {
    scanners: Vec<Scanner>,
    next_id: u64,
}

impl ScannerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scanner, returning its allocated identity.
    ///
    /// Invalidates every cached coverage fraction: a new eligible scanner may
    /// suppress existing ones.
    pub fn register(&mut self, spec: ScannerSpec) -> ScannerId {
        let id = ScannerId(self.next_id);
        self.next_id += 1;
        self.scanners.push(Scanner::new(id, spec));
        self.invalidate_all();
        id
    }

    /// Remove a scanner when its host entity is destroyed.
    pub fn remove(&mut self, id: ScannerId) -> Option<Scanner> {
        let idx = self.scanners.iter().position(|s| s.id == id)?;
        let removed = self.scanners.remove(idx);
        self.invalidate_all();
        Some(removed)
    }

    /// Look up a scanner by id.
    pub fn get(&self, id: ScannerId) -> Option<&Scanner> {
        self.scanners.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ScannerId) -> Option<&mut Scanner> {
        self.scanners.iter_mut().find(|s| s.id == id)
    }

    /// Update a scanner's eligibility, dirtying every coverage cache when it
    /// changes (suppressor sets shift globally).
    pub fn set_eligible(&mut self, id: ScannerId, eligible: bool) {
        let changed = match self.get_mut(id) {
            Some(scanner) if scanner.eligible != eligible => {
                scanner.eligible = eligible;
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate_all();
        }
    }

    /// Update the improved-sensors gate. Does not affect coverage.
    pub fn set_improved_sensors(&mut self, id: ScannerId, improved: bool) {
        if let Some(scanner) = self.get_mut(id) {
            scanner.improved_sensors = improved;
        }
    }

    /// Mark every cached coverage fraction stale. Call after a host reload.
    pub fn invalidate_all(&mut self) {
        for scanner in &mut self.scanners {
            scanner.mark_coverage_dirty();
        }
    }

    /// Iterate over all scanners.
    pub fn iter(&self) -> impl Iterator<Item = &Scanner> {
        self.scanners.iter()
    }

    /// Snapshot of all ids, in registration order.
    pub fn ids(&self) -> Vec<ScannerId> {
        self.scanners.iter().map(|s| s.id).collect()
    }

    /// Number of registered scanners.
    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }
}
