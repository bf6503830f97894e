//! Uniform sampling of parameter sets from a validated range

use rand::Rng;
use tracing::debug;

use super::{ParameterRange, ParameterSet};

/// Number of parameter sets produced per experiment
pub const BATCH_SIZE: usize = 4;

/// Highest temperature the provider accepts
pub const DEFAULT_MAX_TEMPERATURE: f64 = 1.5;

/// Draws [`BATCH_SIZE`] parameter sets from a range.
///
/// Temperature bounds are clamped to the provider ceiling before drawing,
/// top_p is drawn from the range as given and `max_tokens` is copied into
/// every set. Duplicate combinations are allowed.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSampler {
    max_temperature: f64,
}

impl ParameterSampler {
    pub fn new(max_temperature: f64) -> Self {
        Self { max_temperature }
    }

    pub fn max_temperature(&self) -> f64 {
        self.max_temperature
    }

    /// Sample a batch using the given random source
    pub fn sample<R: Rng + ?Sized>(
        &self,
        range: &ParameterRange,
        rng: &mut R,
    ) -> [ParameterSet; BATCH_SIZE] {
        let temperature_min = range.temperature_min.min(self.max_temperature);
        let temperature_max = range.temperature_max.min(self.max_temperature);

        let sets = std::array::from_fn(|_| {
            ParameterSet::new(
                draw(&mut *rng, temperature_min, temperature_max),
                draw(&mut *rng, range.top_p_min, range.top_p_max),
                range.max_tokens,
            )
        });

        debug!(combinations = ?sets, "Generated parameter combinations");
        sets
    }
}

impl Default for ParameterSampler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEMPERATURE)
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    // Degenerate (or capped-to-equal) bounds produce a constant.
    if max <= min {
        return min;
    }

    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_returns_four_sets_within_bounds() {
        let sampler = ParameterSampler::default();
        let range = ParameterRange::new((0.3, 1.0), (0.8, 1.0), 500);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let sets = sampler.sample(&range, &mut rng);
            assert_eq!(sets.len(), BATCH_SIZE);

            for set in sets {
                assert!((0.3..=1.0).contains(&set.temperature));
                assert!((0.8..=1.0).contains(&set.top_p));
                assert_eq!(set.max_tokens, 500);
            }
        }
    }

    #[test]
    fn test_temperature_is_capped() {
        let sampler = ParameterSampler::default();
        let range = ParameterRange::new((1.0, 2.0), (0.5, 0.6), 200);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            for set in sampler.sample(&range, &mut rng) {
                assert!(set.temperature >= 1.0);
                assert!(set.temperature <= DEFAULT_MAX_TEMPERATURE);
            }
        }
    }

    #[test]
    fn test_range_entirely_above_cap_is_constant() {
        let sampler = ParameterSampler::default();
        let range = ParameterRange::new((1.7, 2.0), (0.9, 0.9), 300);
        let mut rng = StdRng::seed_from_u64(1);

        for set in sampler.sample(&range, &mut rng) {
            assert_eq!(set.temperature, DEFAULT_MAX_TEMPERATURE);
            assert_eq!(set.top_p, 0.9);
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let sampler = ParameterSampler::default();
        let range = ParameterRange::new((0.7, 0.7), (1.0, 1.0), 1000);
        let mut rng = StdRng::seed_from_u64(99);

        let sets = sampler.sample(&range, &mut rng);
        assert!(sets.iter().all(|s| s.temperature == 0.7 && s.top_p == 1.0));
    }

    #[test]
    fn test_same_seed_same_sets() {
        let sampler = ParameterSampler::new(1.2);
        let range = ParameterRange::new((0.0, 2.0), (0.0, 1.0), 100);

        let first = sampler.sample(&range, &mut StdRng::seed_from_u64(2024));
        let second = sampler.sample(&range, &mut StdRng::seed_from_u64(2024));

        assert_eq!(first, second);
        assert!(first.iter().all(|s| s.temperature <= 1.2));
    }
}
