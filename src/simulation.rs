//! Simulation loop: one environment, several strategies, one metric per strategy per round.
//!
//! ```text
//! for round in 1..=round_count:
//!     each strategy: select_arm -> env.pull -> update
//!     each strategy: metrics.push(mean_average_reward())
//! ```
//!
//! [`Simulation`] is an iterator over [`RoundRecord`]s, so callers can consume
//! a run lazily; [`Simulation::run`] drains it into a [`SimulationReport`].
//! A run cannot be restarted: a fresh one needs a fresh `Simulation`.
//!
//! Within a round all selections and pulls happen before any update, so an
//! error (a strategy returning an arm the environment rejects) never leaves a
//! round half-applied. After an error the iterator is exhausted.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::egreedy::{check_exploration_rate, EpsilonGreedy};
use crate::env::Environment;
use crate::error::{BanditError, Result};
use crate::observer::{noop_observer, SharedObserver};
use crate::policy::Strategy;
use crate::ucb::{Ucb1, UCB1_MIN_ARMS};

/// Seed offset for the epsilon-greedy RNG, so it never mirrors the environment's stream.
const EGREEDY_SEED_SALT: u64 = 0x4547_5244; // "EGRD"

/// Parameters of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of arms (>= 2).
    pub arm_count: usize,
    /// Number of rounds (>= 1).
    pub round_count: usize,
    /// Epsilon-greedy exploration rate in `[0, 1]`.
    pub exploration_rate: f64,
    /// Seed for the environment and every randomized strategy.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arm_count: 10,
            round_count: 1_000,
            exploration_rate: 0.1,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn new(arm_count: usize, round_count: usize, exploration_rate: f64) -> Self {
        Self {
            arm_count,
            round_count,
            exploration_rate,
            ..Self::default()
        }
    }

    pub fn arm_count(mut self, arm_count: usize) -> Self {
        self.arm_count = arm_count;
        self
    }

    pub fn round_count(mut self, round_count: usize) -> Self {
        self.round_count = round_count;
        self
    }

    pub fn exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every precondition up front, before anything is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.arm_count < UCB1_MIN_ARMS {
            return Err(BanditError::invalid(
                "arm_count",
                format!("must be >= {UCB1_MIN_ARMS}, got {}", self.arm_count),
            ));
        }
        if self.round_count < 1 {
            return Err(BanditError::invalid("round_count", "must be >= 1, got 0"));
        }
        check_exploration_rate(self.exploration_rate)
    }
}

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: usize,
    /// Arm chosen by each strategy (strategy order).
    pub arms: Vec<usize>,
    /// Reward received by each strategy.
    pub rewards: Vec<f64>,
    /// Each strategy's mean average-reward-per-arm after the update.
    pub metrics: Vec<f64>,
}

/// Metric history and final state of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTrace {
    pub name: String,
    /// One value per round.
    pub metrics: Vec<f64>,
    /// Final pull count per arm.
    pub pulls: Vec<u64>,
    /// Final total reward per arm.
    pub total_reward: Vec<f64>,
}

/// Output of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Parameters the run was built from; `None` when assembled with
    /// [`Simulation::from_parts`].
    pub config: Option<SimulationConfig>,
    pub round_count: usize,
    /// The environment's hidden means.
    pub true_means: Vec<f64>,
    /// Arm with the highest true mean.
    pub best_arm: usize,
    /// One trace per strategy, in strategy order.
    pub traces: Vec<StrategyTrace>,
    /// Wall-clock duration of the run.
    pub elapsed_ms: f64,
}

impl SimulationReport {
    /// Trace of the strategy with display name `name`.
    pub fn trace(&self, name: &str) -> Option<&StrategyTrace> {
        self.traces.iter().find(|t| t.name == name)
    }
}

/// A single, non-restartable simulation run.
pub struct Simulation {
    config: Option<SimulationConfig>,
    env: Environment,
    strategies: Vec<Box<dyn Strategy>>,
    metrics: Vec<Vec<f64>>,
    round_count: usize,
    round: usize,
    failed: bool,
    started: Option<Instant>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("env", &self.env)
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("round_count", &self.round_count)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Validate `cfg`, then build the environment, a [`Ucb1`] and an [`EpsilonGreedy`].
    pub fn new(cfg: SimulationConfig) -> Result<Self> {
        Self::with_observer(cfg, noop_observer())
    }

    /// Like [`Simulation::new`], with `observer` attached to every component.
    pub fn with_observer(cfg: SimulationConfig, observer: SharedObserver) -> Result<Self> {
        cfg.validate()?;
        let env = Environment::with_seed(cfg.arm_count, cfg.seed)?.with_observer(observer.clone());
        let ucb = Ucb1::new(cfg.arm_count)?.with_observer(observer.clone());
        let egreedy = EpsilonGreedy::with_seed(
            cfg.arm_count,
            cfg.exploration_rate,
            cfg.seed ^ EGREEDY_SEED_SALT,
        )?
        .with_observer(observer);
        tracing::info!(
            arm_count = cfg.arm_count,
            round_count = cfg.round_count,
            exploration_rate = cfg.exploration_rate,
            seed = cfg.seed,
            "simulation configured"
        );
        let mut sim =
            Self::from_parts(env, vec![Box::new(ucb), Box::new(egreedy)], cfg.round_count)?;
        sim.config = Some(cfg);
        Ok(sim)
    }

    /// Run arbitrary strategies against `env`.
    ///
    /// Fails if `strategies` is empty, `round_count == 0`, or any strategy's
    /// arm count differs from the environment's.
    pub fn from_parts(
        env: Environment,
        strategies: Vec<Box<dyn Strategy>>,
        round_count: usize,
    ) -> Result<Self> {
        if strategies.is_empty() {
            return Err(BanditError::invalid("strategies", "must not be empty"));
        }
        if round_count < 1 {
            return Err(BanditError::invalid("round_count", "must be >= 1, got 0"));
        }
        if let Some(s) = strategies
            .iter()
            .find(|s| s.arm_count() != env.arm_count())
        {
            return Err(BanditError::invalid(
                "strategies",
                format!(
                    "{} has {} arms, environment has {}",
                    s.name(),
                    s.arm_count(),
                    env.arm_count()
                ),
            ));
        }
        let metrics = strategies
            .iter()
            .map(|_| Vec::new())
            .collect();
        Ok(Self {
            config: None,
            env,
            strategies,
            metrics,
            round_count,
            round: 0,
            failed: false,
            started: None,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    /// Rounds completed so far.
    pub fn rounds_completed(&self) -> usize {
        self.round
    }

    /// Metric sequences recorded so far, one per strategy.
    pub fn metrics(&self) -> &[Vec<f64>] {
        &self.metrics
    }

    /// Play one round. Returns `Ok(None)` once all rounds are done or after an error.
    pub fn step(&mut self) -> Result<Option<RoundRecord>> {
        if self.failed || self.round >= self.round_count {
            return Ok(None);
        }
        let started = *self.started.get_or_insert_with(Instant::now);

        let arms: Vec<usize> = self.strategies.iter_mut().map(|s| s.select_arm()).collect();
        let mut rewards = Vec::with_capacity(arms.len());
        for &arm in &arms {
            match self.env.pull(arm) {
                Ok(r) => rewards.push(r),
                Err(e) => {
                    self.failed = true;
                    return Err(e);
                }
            }
        }
        for ((s, &arm), &reward) in self.strategies.iter_mut().zip(&arms).zip(&rewards) {
            if let Err(e) = s.update(arm, reward) {
                self.failed = true;
                return Err(e);
            }
        }

        let metrics: Vec<f64> = self
            .strategies
            .iter()
            .map(|s| s.mean_average_reward())
            .collect();
        for (history, &m) in self.metrics.iter_mut().zip(&metrics) {
            history.push(m);
        }
        self.round += 1;

        tracing::trace!(
            round = self.round,
            elapsed_s = started.elapsed().as_secs_f64(),
            "round complete"
        );

        Ok(Some(RoundRecord {
            round: self.round,
            arms,
            rewards,
            metrics,
        }))
    }

    /// Play every remaining round and summarize.
    pub fn run(mut self) -> Result<SimulationReport> {
        let t0 = Instant::now();
        while self.step()?.is_some() {}
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

        let traces: Vec<StrategyTrace> = self
            .strategies
            .iter()
            .zip(self.metrics)
            .map(|(s, metrics)| StrategyTrace {
                name: s.name().to_string(),
                metrics,
                pulls: s.stats().pulls().to_vec(),
                total_reward: s.stats().total_reward().to_vec(),
            })
            .collect();

        for t in &traces {
            tracing::info!(
                strategy = %t.name,
                final_metric = t.metrics.last().copied().unwrap_or(0.0),
                "strategy finished"
            );
        }
        tracing::info!(rounds = self.round, elapsed_ms, "simulation finished");

        Ok(SimulationReport {
            config: self.config,
            round_count: self.round_count,
            true_means: self.env.true_means().to_vec(),
            best_arm: self.env.best_arm(),
            traces,
            elapsed_ms,
        })
    }
}

impl Iterator for Simulation {
    type Item = Result<RoundRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

/// Validate, build, and play a full two-strategy run.
///
/// # Example
///
/// ```rust
/// use banditsim::{run, SimulationConfig};
///
/// let report = run(SimulationConfig::new(5, 100, 0.1).seed(3)).unwrap();
/// assert_eq!(report.traces.len(), 2);
/// assert!(report.traces.iter().all(|t| t.metrics.len() == 100));
/// ```
pub fn run(cfg: SimulationConfig) -> Result<SimulationReport> {
    Simulation::new(cfg)?.run()
}
