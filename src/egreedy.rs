//! Epsilon-greedy strategy.
//!
//! With probability `exploration_rate` pick an arm uniformly at random;
//! otherwise pick the arm with the highest stabilized average reward (first
//! maximum on ties). The exploration probability is fixed and never decays.
//!
//! Notes:
//! - This policy is **seedable** so selection can be reproducible in tests.
//! - Default construction uses a fixed seed (deterministic by default).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::decision::{Decision, DecisionNote, DecisionPolicy};
use crate::error::{BanditError, Result};
use crate::observer::{noop_observer, ObserverField, SharedObserver, UpdateEvent};
use crate::policy::Strategy;
use crate::stats::ArmStats;
use crate::utils::argmax_first;

const SOURCE: &str = "epsilon_greedy";

/// Seedable epsilon-greedy bandit over `arm_count` indexed arms.
#[derive(Clone)]
pub struct EpsilonGreedy {
    stats: ArmStats,
    exploration_rate: f64,
    rng: StdRng,
    observer: SharedObserver,
}

impl std::fmt::Debug for EpsilonGreedy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpsilonGreedy")
            .field("stats", &self.stats)
            .field("exploration_rate", &self.exploration_rate)
            .field("observer", &ObserverField)
            .finish_non_exhaustive()
    }
}

/// Reject exploration rates outside `[0, 1]` (NaN included).
pub(crate) fn check_exploration_rate(rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(BanditError::invalid(
            "exploration_rate",
            format!("must be in [0, 1], got {rate}"),
        ))
    }
}

impl EpsilonGreedy {
    /// Create an epsilon-greedy bandit with a deterministic fixed seed (0).
    pub fn new(arm_count: usize, exploration_rate: f64) -> Result<Self> {
        Self::with_seed(arm_count, exploration_rate, 0)
    }

    /// Create an epsilon-greedy bandit with a fixed seed (reproducible).
    ///
    /// Fails with [`BanditError::InvalidParameter`] if `arm_count == 0` or
    /// `exploration_rate` is not in `[0, 1]`.
    pub fn with_seed(arm_count: usize, exploration_rate: f64, seed: u64) -> Result<Self> {
        if arm_count == 0 {
            return Err(BanditError::invalid("arm_count", "must be >= 1, got 0"));
        }
        check_exploration_rate(exploration_rate)?;
        Ok(Self {
            stats: ArmStats::new(arm_count),
            exploration_rate,
            rng: StdRng::seed_from_u64(seed),
            observer: noop_observer(),
        })
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Reset all learned state (the RNG keeps its position).
    pub fn reset(&mut self) {
        self.stats.reset();
    }
}

impl Strategy for EpsilonGreedy {
    fn policy(&self) -> DecisionPolicy {
        DecisionPolicy::EpsilonGreedy
    }

    fn decide(&mut self) -> Decision {
        let draw: f64 = self.rng.random();
        let d = if draw < self.exploration_rate {
            let arm = self.rng.random_range(0..self.stats.arm_count());
            Decision {
                policy: DecisionPolicy::EpsilonGreedy,
                arm,
                note: DecisionNote::Explore { draw },
            }
        } else {
            let averages = self.stats.averages();
            let arm = argmax_first(&averages).unwrap_or(0);
            Decision {
                policy: DecisionPolicy::EpsilonGreedy,
                arm,
                note: DecisionNote::Exploit {
                    draw,
                    average: averages[arm],
                },
            }
        };
        self.observer.on_select(&d);
        d
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        if let Err(e) = self.stats.record(arm, reward) {
            self.observer.on_error(SOURCE, &e);
            return Err(e);
        }
        self.observer.on_update(&UpdateEvent {
            source: SOURCE,
            arm,
            reward,
            total_reward: self.stats.total_reward()[arm],
            pulls: self.stats.pulls()[arm],
        });
        Ok(())
    }

    fn stats(&self) -> &ArmStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::strategy::Strategy as _;
    use crate::policy::Strategy;

    #[test]
    fn rejects_rates_outside_unit_interval() {
        for rate in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                EpsilonGreedy::new(3, rate),
                Err(BanditError::InvalidParameter { name: "exploration_rate", .. })
            ));
        }
        assert!(EpsilonGreedy::new(3, 0.0).is_ok());
        assert!(EpsilonGreedy::new(3, 1.0).is_ok());
    }

    #[test]
    fn single_arm_is_accepted() {
        let mut eg = EpsilonGreedy::new(1, 0.5).unwrap();
        for _ in 0..10 {
            assert_eq!(eg.select_arm(), 0);
        }
    }

    #[test]
    fn zero_arms_is_rejected() {
        assert!(EpsilonGreedy::new(0, 0.1).is_err());
    }

    #[test]
    fn zero_rate_always_exploits() {
        let mut eg = EpsilonGreedy::with_seed(4, 0.0, 3).unwrap();
        eg.update(0, 1.0).unwrap();
        eg.update(1, 5.0).unwrap();
        eg.update(2, -2.0).unwrap();
        for _ in 0..500 {
            let d = eg.decide();
            assert!(!d.is_exploration());
            assert_eq!(d.arm, 1);
        }
    }

    #[test]
    fn zero_rate_with_no_history_picks_arm_zero() {
        let mut eg = EpsilonGreedy::new(3, 0.0).unwrap();
        assert_eq!(eg.select_arm(), 0);
    }

    #[test]
    fn full_rate_is_uniform() {
        let k = 4;
        let n = 20_000;
        let mut eg = EpsilonGreedy::with_seed(k, 1.0, 11).unwrap();
        eg.update(2, 100.0).unwrap();
        let mut counts = vec![0usize; k];
        for _ in 0..n {
            let d = eg.decide();
            assert!(d.is_exploration());
            counts[d.arm] += 1;
        }
        let expected = n as f64 / k as f64;
        for c in counts {
            assert!(
                (c as f64 - expected).abs() < 0.05 * expected,
                "count {c} too far from {expected}"
            );
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let mut a = EpsilonGreedy::with_seed(5, 0.3, 42).unwrap();
        let mut b = EpsilonGreedy::with_seed(5, 0.3, 42).unwrap();
        for i in 0..100 {
            let (x, y) = (a.select_arm(), b.select_arm());
            assert_eq!(x, y);
            a.update(x, i as f64).unwrap();
            b.update(y, i as f64).unwrap();
        }
    }

    #[test]
    fn update_order_does_not_matter() {
        let mut a = EpsilonGreedy::new(2, 0.1).unwrap();
        let mut b = EpsilonGreedy::new(2, 0.1).unwrap();
        a.update(0, 3.0).unwrap();
        a.update(0, 2.0).unwrap();
        b.update(0, 2.0).unwrap();
        b.update(0, 3.0).unwrap();
        assert_eq!(a.stats().total_reward()[0], 5.0);
        assert_eq!(a.stats().pulls()[0], 2);
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn observer_sees_selects_and_updates() {
        use crate::observer::tests::Recorder;
        use std::sync::Arc;

        let rec = Arc::new(Recorder::default());
        let mut eg = EpsilonGreedy::new(2, 0.5).unwrap().with_observer(rec.clone());
        let a = eg.select_arm();
        eg.update(a, 1.0).unwrap();
        let _ = eg.update(9, 1.0);
        assert_eq!(rec.selects.lock().unwrap().len(), 1);
        assert_eq!(rec.updates.lock().unwrap().len(), 1);
        assert_eq!(rec.errors.lock().unwrap().len(), 1);
    }

    proptest! {
        #[test]
        fn selection_is_always_in_range(
            arm_count in 1usize..10,
            rate in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let mut eg = EpsilonGreedy::with_seed(arm_count, rate, seed).unwrap();
            for i in 0..50 {
                let a = eg.select_arm();
                prop_assert!(a < arm_count);
                eg.update(a, (i % 7) as f64).unwrap();
            }
        }
    }
}
