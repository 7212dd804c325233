//! Unified `Strategy` trait for action-selection policies.
//!
//! [`Ucb1`][crate::Ucb1] and [`EpsilonGreedy`][crate::EpsilonGreedy] share the
//! same two-method shape: `select_arm() -> index` and `update(index, reward)`.
//! This trait makes that explicit so the simulation loop can hold a homogeneous
//! `Vec<Box<dyn Strategy>>`, and a third policy is a pure extension.

use crate::decision::{Decision, DecisionPolicy};
use crate::error::Result;
use crate::stats::ArmStats;

/// Common interface for stateful bandit strategies over indexed arms.
///
/// # Example
///
/// ```rust
/// use banditsim::{EpsilonGreedy, Environment, Strategy, Ucb1};
///
/// fn play<S: Strategy + ?Sized>(s: &mut S, env: &mut Environment, rounds: usize) {
///     for _ in 0..rounds {
///         let arm = s.select_arm();
///         let reward = env.pull(arm).unwrap();
///         s.update(arm, reward).unwrap();
///     }
/// }
///
/// let mut env = Environment::with_seed(3, 1).unwrap();
/// let mut ucb = Ucb1::new(3).unwrap();
/// let mut eg = EpsilonGreedy::with_seed(3, 0.1, 7).unwrap();
/// play(&mut ucb, &mut env, 20);
/// play(&mut eg, &mut env, 20);
/// assert_eq!(ucb.stats().total_pulls(), 20);
/// ```
pub trait Strategy: Send {
    /// Which policy this is.
    fn policy(&self) -> DecisionPolicy;

    /// Choose the next arm, returning the full decision record.
    fn decide(&mut self) -> Decision;

    /// Record the reward obtained from `arm`.
    ///
    /// Fails with [`crate::BanditError::ArmOutOfRange`] and leaves state
    /// unchanged when `arm >= arm_count`.
    fn update(&mut self, arm: usize, reward: f64) -> Result<()>;

    /// Per-arm totals and pull counts.
    fn stats(&self) -> &ArmStats;

    /// Choose the next arm.
    fn select_arm(&mut self) -> usize {
        self.decide().arm
    }

    fn arm_count(&self) -> usize {
        self.stats().arm_count()
    }

    /// Mean over arms of the stabilized per-arm average reward.
    fn mean_average_reward(&self) -> f64 {
        self.stats().mean_average_reward()
    }

    /// Display name (column header in reports).
    fn name(&self) -> &'static str {
        self.policy().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpsilonGreedy, Ucb1};

    fn run_generic(s: &mut dyn Strategy) {
        for i in 0..10 {
            let arm = s.select_arm();
            assert!(arm < s.arm_count());
            s.update(arm, i as f64).unwrap();
        }
    }

    #[test]
    fn both_strategies_run_behind_a_trait_object() {
        let mut strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(Ucb1::new(3).unwrap()),
            Box::new(EpsilonGreedy::with_seed(3, 0.5, 1).unwrap()),
        ];
        for s in strategies.iter_mut() {
            run_generic(s.as_mut());
            assert_eq!(s.stats().total_pulls(), 10);
        }
        assert_eq!(strategies[0].name(), "UCB1");
        assert_eq!(strategies[1].name(), "Epsilon-Greedy");
    }
}
