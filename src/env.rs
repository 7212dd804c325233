//! Gaussian bandit environment.
//!
//! Each arm has a hidden mean drawn once from a standard normal distribution;
//! a pull returns one independent draw from `N(mean, 1)`.
//!
//! Notes:
//! - The means never change after construction. Only the noise RNG advances,
//!   which is why [`Environment::pull`] takes `&mut self`.
//! - Construction is seedable; [`Environment::new`] uses seed 0.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{check_arm, BanditError, Result};
use crate::observer::{noop_observer, ObserverField, SharedObserver};

const SOURCE: &str = "environment";

/// Standard deviation of every arm's reward distribution.
pub const REWARD_STD_DEV: f64 = 1.0;

/// Stochastic reward source with fixed, unknown-to-strategies arm means.
#[derive(Clone)]
pub struct Environment {
    true_means: Vec<f64>,
    rng: StdRng,
    observer: SharedObserver,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("true_means", &self.true_means)
            .field("observer", &ObserverField)
            .finish_non_exhaustive()
    }
}

impl Environment {
    /// Create an environment with a deterministic fixed seed (0).
    pub fn new(arm_count: usize) -> Result<Self> {
        Self::with_seed(arm_count, 0)
    }

    /// Create an environment whose means and noise both derive from `seed`.
    ///
    /// Fails with [`BanditError::InvalidParameter`] if `arm_count == 0`.
    pub fn with_seed(arm_count: usize, seed: u64) -> Result<Self> {
        if arm_count == 0 {
            return Err(BanditError::invalid("arm_count", "must be >= 1, got 0"));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let true_means: Vec<f64> = (0..arm_count)
            .map(|_| StandardNormal.sample(&mut rng))
            .collect();
        Ok(Self {
            true_means,
            rng,
            observer: noop_observer(),
        })
    }

    /// Create an environment with caller-chosen means (noise still seeded).
    ///
    /// Fails if `true_means` is empty or contains a non-finite value.
    pub fn with_means(true_means: Vec<f64>, seed: u64) -> Result<Self> {
        if true_means.is_empty() {
            return Err(BanditError::invalid("true_means", "must not be empty"));
        }
        if let Some(i) = true_means.iter().position(|m| !m.is_finite()) {
            return Err(BanditError::invalid(
                "true_means",
                format!("mean of arm {i} is not finite"),
            ));
        }
        Ok(Self {
            true_means,
            rng: StdRng::seed_from_u64(seed),
            observer: noop_observer(),
        })
    }

    /// Attach an observer (errors are reported to `on_error`).
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn arm_count(&self) -> usize {
        self.true_means.len()
    }

    /// The hidden ground truth.
    pub fn true_means(&self) -> &[f64] {
        &self.true_means
    }

    /// Arm with the highest true mean (lowest index on ties).
    pub fn best_arm(&self) -> usize {
        crate::argmax_first(&self.true_means).unwrap_or(0)
    }

    /// Draw one reward from arm `arm`.
    ///
    /// Fails with [`BanditError::ArmOutOfRange`] if `arm >= arm_count`; the
    /// RNG is not advanced in that case.
    pub fn pull(&mut self, arm: usize) -> Result<f64> {
        if let Err(e) = check_arm(arm, self.arm_count()) {
            self.observer.on_error(SOURCE, &e);
            return Err(e);
        }
        let noise: f64 = StandardNormal.sample(&mut self.rng);
        Ok(self.true_means[arm] + REWARD_STD_DEV * noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_arms_is_invalid() {
        assert!(matches!(
            Environment::new(0),
            Err(BanditError::InvalidParameter { name: "arm_count", .. })
        ));
    }

    #[test]
    fn single_arm_is_accepted() {
        let env = Environment::new(1).unwrap();
        assert_eq!(env.arm_count(), 1);
    }

    #[test]
    fn same_seed_same_means() {
        let a = Environment::with_seed(5, 9).unwrap();
        let b = Environment::with_seed(5, 9).unwrap();
        let c = Environment::with_seed(5, 10).unwrap();
        assert_eq!(a.true_means(), b.true_means());
        assert_ne!(a.true_means(), c.true_means());
    }

    #[test]
    fn pull_out_of_range_fails_and_does_not_advance_rng() {
        let mut a = Environment::with_seed(3, 1).unwrap();
        let mut b = Environment::with_seed(3, 1).unwrap();
        assert!(matches!(
            a.pull(5),
            Err(BanditError::ArmOutOfRange { arm: 5, arm_count: 3 })
        ));
        assert_eq!(a.pull(0).unwrap(), b.pull(0).unwrap());
    }

    #[test]
    fn pulls_center_on_the_true_mean() {
        let mut env = Environment::with_means(vec![0.0, 10.0], 7).unwrap();
        let n = 5_000;
        let avg: f64 = (0..n).map(|_| env.pull(1).unwrap()).sum::<f64>() / n as f64;
        assert!((avg - 10.0).abs() < 0.1, "avg={avg}");
        assert_eq!(env.best_arm(), 1);
    }

    #[test]
    fn with_means_rejects_non_finite() {
        assert!(Environment::with_means(vec![0.0, f64::NAN], 0).is_err());
        assert!(Environment::with_means(vec![], 0).is_err());
    }

    #[test]
    fn out_of_range_pull_is_reported_to_observer() {
        use crate::observer::tests::Recorder;
        use std::sync::Arc;

        let rec = Arc::new(Recorder::default());
        let mut env = Environment::new(2).unwrap().with_observer(rec.clone());
        let _ = env.pull(2);
        let errors = rec.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("environment: "), "{}", errors[0]);
    }

    #[test]
    fn pull_noise_is_unit_variance_around_the_mean() {
        let mut env = Environment::with_means(vec![-2.0, 4.0], 21).unwrap();
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| env.pull(0).unwrap()).collect();
        let avg = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!((avg + 2.0).abs() < 0.05, "avg {avg}");
        assert!((var - REWARD_STD_DEV * REWARD_STD_DEV).abs() < 0.05, "var {var}");
    }
}
