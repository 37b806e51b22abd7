//! Host boundary: the services the subsystem requires from the simulation it
//! runs inside.
//!
//! Everything world-facing goes through [`WorldAdapter`]: occupancy queries
//! during placement, site registration, item generation, fallback disposal of
//! rejected items, and fire-and-forget notification. Vector types at this seam
//! use [`mint`] so hosts are not tied to this crate's internal math library.
//!
//! Deliberately absent: a global scanner lookup (the registry is injected,
//! see [`crate::scanner::ScannerRegistry`]) and push/pop random-state services
//! (RNGs are explicit parameters throughout).
use mint::Vector3;
use rand::RngCore;

use crate::content::loot::LootSpec;
use crate::content::{Item, SiteSpec};

/// Opaque handle to a site registered in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteHandle(pub u64);

/// Services supplied by the host simulation.
pub trait WorldAdapter {
    /// Whether `point` already hosts another world-level occurrence.
    fn is_occupied(&self, point: Vector3<f32>) -> bool;

    /// Register a generated site in the world.
    fn create_site(&mut self, site: SiteSpec) -> SiteHandle;

    /// Resolve an item-collection generator spec into concrete items.
    fn generate_items(&mut self, spec: &LootSpec, rng: &mut dyn RngCore) -> Vec<Item>;

    /// Fallback disposal for an item a container refused. Must not lose the
    /// item silently in the host world.
    fn discard_item(&mut self, item: Item);

    /// Fire-and-forget notification to the host's messaging layer.
    fn notify(&mut self, site: SiteHandle);
}
