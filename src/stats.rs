//! Per-arm reward accounting shared by every strategy.

use serde::{Deserialize, Serialize};

use crate::error::{check_arm, Result};
use crate::utils::{mean, stabilized_average};

/// Running totals for a fixed set of arms.
///
/// Both vectors are aligned to arm indices and have length `arm_count` for the
/// lifetime of the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmStats {
    total_reward: Vec<f64>,
    pulls: Vec<u64>,
}

impl ArmStats {
    /// Zeroed stats for `arm_count` arms.
    pub fn new(arm_count: usize) -> Self {
        Self {
            total_reward: vec![0.0; arm_count],
            pulls: vec![0; arm_count],
        }
    }

    pub fn arm_count(&self) -> usize {
        self.pulls.len()
    }

    /// Sum of rewards received per arm.
    pub fn total_reward(&self) -> &[f64] {
        &self.total_reward
    }

    /// Number of updates received per arm.
    pub fn pulls(&self) -> &[u64] {
        &self.pulls
    }

    /// Total number of updates across all arms.
    pub fn total_pulls(&self) -> u64 {
        self.pulls.iter().sum()
    }

    /// Stabilized average reward of one arm (see [`crate::PULL_STABILIZER`]).
    /// `None` if `arm` is out of range.
    pub fn average(&self, arm: usize) -> Option<f64> {
        let total = *self.total_reward.get(arm)?;
        let pulls = *self.pulls.get(arm)?;
        Some(stabilized_average(total, pulls))
    }

    /// Stabilized average reward of every arm, in arm order.
    pub fn averages(&self) -> Vec<f64> {
        self.total_reward
            .iter()
            .zip(&self.pulls)
            .map(|(&t, &n)| stabilized_average(t, n))
            .collect()
    }

    /// Mean over arms of the per-arm average reward.
    ///
    /// This is the per-round performance metric recorded by the simulation.
    pub fn mean_average_reward(&self) -> f64 {
        mean(&self.averages())
    }

    /// Record one reward for `arm`.
    ///
    /// Fails with [`crate::BanditError::ArmOutOfRange`] without touching any
    /// state when `arm >= arm_count`.
    pub fn record(&mut self, arm: usize, reward: f64) -> Result<()> {
        check_arm(arm, self.arm_count())?;
        self.total_reward[arm] += reward;
        self.pulls[arm] = self.pulls[arm].saturating_add(1);
        Ok(())
    }

    /// Zero all totals and counts.
    pub fn reset(&mut self) {
        self.total_reward.iter_mut().for_each(|t| *t = 0.0);
        self.pulls.iter_mut().for_each(|n| *n = 0);
    }
}
