//! Small random helpers shared by the sampling, scheduling, and content modules.
use rand::RngCore;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Bernoulli roll: true with probability `p` (clamped to [0, 1]).
#[inline]
pub(crate) fn chance(p: f32, rng: &mut dyn RngCore) -> bool {
    rand01(rng) < p.clamp(0.0, 1.0)
}

/// Uniform integer in the inclusive range `lo..=hi`.
pub(crate) fn roll_inclusive(lo: u32, hi: u32, rng: &mut dyn RngCore) -> u32 {
    debug_assert!(lo <= hi);
    let span = (hi - lo) as f32 + 1.0;
    let offset = (rand01(rng) * span) as u32;
    lo + offset.min(hi - lo)
}

/// Uniform float in the half-open range `[lo, hi)`.
#[inline]
pub(crate) fn range_f32(lo: f32, hi: f32, rng: &mut dyn RngCore) -> f32 {
    lo + rand01(rng) * (hi - lo)
}

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<'a, T>(items: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = ((rand01(rng) * items.len() as f32) as usize).min(items.len() - 1);
    Some(&items[idx])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_stays_in_unit_interval() {
        // Values near u32::MAX round up to 1.0 in f32; the helpers below all
        // clamp for that case.
        for value in [0, 1, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let mut rng = FixedRng { value };
            let result = rand01(&mut rng);
            assert!(
                (0.0..=1.0).contains(&result),
                "rand01 out of range: {result}"
            );
        }
    }

    #[test]
    fn chance_clamps_probability() {
        let mut rng = FixedRng { value: 0 };
        assert!(chance(2.0, &mut rng));
        assert!(!chance(-1.0, &mut rng));
    }

    #[test]
    fn roll_inclusive_covers_both_ends() {
        let mut low = FixedRng { value: 0 };
        assert_eq!(roll_inclusive(5, 9, &mut low), 5);

        let mut high = FixedRng { value: u32::MAX };
        assert_eq!(roll_inclusive(5, 9, &mut high), 9);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let v = roll_inclusive(15, 60, &mut rng);
            assert!((15..=60).contains(&v));
        }
    }

    #[test]
    fn pick_returns_none_for_empty_slice() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [u8; 0] = [];
        assert!(pick(&empty, &mut rng).is_none());
    }

    #[test]
    fn pick_never_indexes_out_of_bounds() {
        let items = [1, 2, 3];
        let mut high = FixedRng { value: u32::MAX };
        assert!(pick(&items, &mut high).is_some());
    }
}
