//! UCB1 confidence-bound strategy.
//!
//! Each selection scores every arm as
//!
//! ```text
//!   score_i = avg_i + sqrt(2 * ln(t) / (n_i + 1e-6))
//! ```
//!
//! where `t` is the round counter (incremented before scoring) and `n_i` the
//! arm's pull count, and picks the first maximum.
//!
//! The bonus grows with elapsed rounds and shrinks with an arm's own pulls, so
//! every arm keeps being revisited while well-sampled arms are judged mostly on
//! their average.
//!
//! Notes:
//! - Round 1 has `ln(1) = 0`, so every score is 0 and arm 0 wins the tie.
//! - From round 2 on, an unpulled arm's denominator is `1e-6` (see
//!   [`crate::PULL_STABILIZER`]), which makes its bonus large but finite.
//! - Fully deterministic: no RNG.

use crate::decision::{Decision, DecisionNote, DecisionPolicy};
use crate::error::{BanditError, Result};
use crate::observer::{noop_observer, ObserverField, SharedObserver, UpdateEvent};
use crate::policy::Strategy;
use crate::stats::ArmStats;
use crate::utils::{argmax_first, PULL_STABILIZER};

const SOURCE: &str = "ucb1";

/// Smallest arm count UCB1 accepts.
pub const UCB1_MIN_ARMS: usize = 2;

/// UCB1 bandit over `arm_count` indexed arms.
#[derive(Clone)]
pub struct Ucb1 {
    stats: ArmStats,
    round: u64,
    observer: SharedObserver,
}

impl std::fmt::Debug for Ucb1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ucb1")
            .field("stats", &self.stats)
            .field("round", &self.round)
            .field("observer", &ObserverField)
            .finish()
    }
}

impl Ucb1 {
    /// Create a UCB1 strategy.
    ///
    /// Fails with [`BanditError::InvalidParameter`] if `arm_count < 2`.
    pub fn new(arm_count: usize) -> Result<Self> {
        if arm_count < UCB1_MIN_ARMS {
            return Err(BanditError::invalid(
                "arm_count",
                format!("UCB1 requires at least {UCB1_MIN_ARMS} arms, got {arm_count}"),
            ));
        }
        Ok(Self {
            stats: ArmStats::new(arm_count),
            round: 0,
            observer: noop_observer(),
        })
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Number of selections made so far.
    pub fn round_index(&self) -> u64 {
        self.round
    }

    /// Exploration bonus of every arm at round `round`.
    pub fn bonuses_at(&self, round: u64) -> Vec<f64> {
        let log_t = (round.max(1) as f64).ln();
        self.stats
            .pulls()
            .iter()
            .map(|&n| (2.0 * log_t / (n as f64 + PULL_STABILIZER)).sqrt())
            .collect()
    }

    /// `average + bonus` for every arm at round `round`.
    pub fn scores_at(&self, round: u64) -> Vec<f64> {
        self.stats
            .averages()
            .into_iter()
            .zip(self.bonuses_at(round))
            .map(|(avg, bonus)| avg + bonus)
            .collect()
    }

    /// Reset all learned state, including the round counter.
    pub fn reset(&mut self) {
        self.stats.reset();
        self.round = 0;
    }
}

impl Strategy for Ucb1 {
    fn policy(&self) -> DecisionPolicy {
        DecisionPolicy::Ucb1
    }

    fn decide(&mut self) -> Decision {
        self.round = self.round.saturating_add(1);
        let bonuses = self.bonuses_at(self.round);
        let scores = self.scores_at(self.round);
        // All-NaN scores only come from non-finite rewards; fall back to arm 0.
        let arm = argmax_first(&scores).unwrap_or(0);
        let d = Decision {
            policy: DecisionPolicy::Ucb1,
            arm,
            note: DecisionNote::ConfidenceBound {
                round: self.round,
                score: scores[arm],
                bonus: bonuses[arm],
            },
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
