//! Unit-sphere cap geometry: uniform sampling within a spherical cap and the
//! visibility predicate shared by coverage estimation and placement search.
//!
//! Scanner positions are unit vectors on the sphere; coverage regions are
//! spherical caps described by a center and an angular radius in degrees.
use std::f32::consts::TAU;

use glam::Vec3;
use rand::RngCore;

use crate::random::rand01;

/// A spherical cap: all points within `angle_deg` of `center` on the unit sphere.
#[derive(Debug, Clone, Copy)]
pub struct Cap {
    /// Cap center, a unit vector.
    pub center: Vec3,
    /// Angular radius in degrees.
    pub angle_deg: f32,
}

impl Cap {
    /// Create a new cap. The center is normalized.
    pub fn new(center: Vec3, angle_deg: f32) -> Self {
        Self {
            center: center.normalize_or_zero(),
            angle_deg,
        }
    }

    /// Whether `point` lies within this cap.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        within_cap(point, self.center, self.angle_deg)
    }
}

/// Whether `point` lies within `angle_deg` of `center` on the unit sphere.
#[inline]
pub fn within_cap(point: Vec3, center: Vec3, angle_deg: f32) -> bool {
    let cos_angle = angle_deg.to_radians().cos();
    point.normalize_or_zero().dot(center.normalize_or_zero()) >= cos_angle
}

/// Great-circle separation of two points on the unit sphere, in degrees.
#[inline]
pub fn arc_degrees(a: Vec3, b: Vec3) -> f32 {
    let cos = a
        .normalize_or_zero()
        .dot(b.normalize_or_zero())
        .clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Sample a point uniformly distributed within the spherical cap around
/// `center` with angular radius `angle_deg`.
///
/// Uniformity over the cap surface comes from sampling the polar cosine
/// uniformly in `[cos(angle), 1]` and the azimuth uniformly in `[0, 2pi)`,
/// then rotating the local frame onto `center`.
pub fn sample_point_in_cap(center: Vec3, angle_deg: f32, rng: &mut dyn RngCore) -> Vec3 {
    let center = center.normalize_or_zero();
    let cos_max = angle_deg.clamp(0.0, 180.0).to_radians().cos();

    let z = cos_max + rand01(rng) * (1.0 - cos_max);
    let phi = rand01(rng) * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();

    let (t1, t2) = tangent_frame(center);
    (t1 * (r * phi.cos()) + t2 * (r * phi.sin()) + center * z).normalize_or_zero()
}

/// Build an orthonormal tangent frame around a unit vector.
fn tangent_frame(normal: Vec3) -> (Vec3, Vec3) {
    let helper = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let t1 = normal.cross(helper).normalize_or_zero();
    let t2 = normal.cross(t1);
    (t1, t2)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn within_cap_accepts_center_and_rejects_antipode() {
        let center = Vec3::Z;
        assert!(within_cap(center, center, 10.0));
        assert!(!within_cap(-center, center, 10.0));
    }

    #[test]
    fn within_cap_boundary_is_inclusive() {
        let center = Vec3::Z;
        let boundary = Vec3::new(30f32.to_radians().sin(), 0.0, 30f32.to_radians().cos());
        assert!(within_cap(boundary, center, 30.0 + 1e-3));
        assert!(!within_cap(boundary, center, 29.0));
    }

    #[test]
    fn arc_degrees_matches_known_separations() {
        assert!(arc_degrees(Vec3::X, Vec3::X) < 1e-3);
        assert!((arc_degrees(Vec3::X, Vec3::Y) - 90.0).abs() < 1e-3);
        assert!((arc_degrees(Vec3::X, -Vec3::X) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn sampled_points_stay_inside_the_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Vec3::new(0.3, -0.5, 0.8).normalize();
        for _ in 0..500 {
            let p = sample_point_in_cap(center, 25.0, &mut rng);
            assert!((p.length() - 1.0).abs() < 1e-4);
            assert!(arc_degrees(p, center) <= 25.0 + 1e-2);
        }
    }

    #[test]
    fn sampled_points_spread_over_the_cap() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Vec3::Z;
        let mut beyond_half = 0;
        for _ in 0..400 {
            if arc_degrees(sample_point_in_cap(center, 40.0, &mut rng), center) > 20.0 {
                beyond_half += 1;
            }
        }
        // The outer band holds most of the cap's area; a clustered sampler
        // near the pole would fail this.
        assert!(beyond_half > 200, "outer band samples: {beyond_half}");
    }

    #[test]
    fn cap_constructor_normalizes_center() {
        let cap = Cap::new(Vec3::new(0.0, 0.0, 5.0), 15.0);
        assert!((cap.center.length() - 1.0).abs() < 1e-6);
        assert!(cap.contains(Vec3::Z));
    }
}
