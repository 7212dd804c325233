//! `banditsim`: seedable simulation of the stochastic multi-armed bandit problem.
//!
//! An [`Environment`] holds several arms with fixed, hidden expected rewards
//! (each drawn from a standard normal at construction); pulling an arm returns
//! a noisy sample `N(mean, 1)`. Strategies must balance trying under-sampled
//! arms (exploration) against pulling the best-looking one (exploitation).
//!
//! **Strategies** (all behind the [`Strategy`] trait):
//! - [`Ucb1`]: confidence-bound selection, `avg_i + sqrt(2 ln t / (n_i + 1e-6))`.
//! - [`EpsilonGreedy`]: uniform random arm with fixed probability `epsilon`,
//!   otherwise the best average. Seedable.
//!
//! **Simulation**: [`Simulation`] plays every strategy against one shared
//! environment for a fixed number of rounds and records, per strategy and per
//! round, the mean over arms of the per-arm average reward. It is an iterator
//! over [`RoundRecord`]s; [`run`] drains it into a [`SimulationReport`].
//!
//! **Goals:**
//! - **Deterministic by default**: same config + seed → same metric sequences.
//! - **No global state**: logging goes through an injected [`Observer`]
//!   ([`NoopObserver`] by default, [`TracingObserver`] for `tracing` output).
//! - **Fail early**: bad parameters and out-of-range arms return
//!   [`BanditError`] before any state changes.
//!
//! **Boundary helpers** (used by the `banditsim` binary):
//! - [`SimulationInput`] / [`InputGenerator`]: the three-line input file format.
//! - [`Settings`]: TOML + environment configuration.
//!
//! **Non-goals:**
//! - Plotting, persistence formats, parallel or distributed runs.
//!
//! # Example
//!
//! ```rust
//! use banditsim::{Simulation, SimulationConfig};
//!
//! let cfg = SimulationConfig::new(4, 200, 0.1).seed(7);
//! let report = Simulation::new(cfg).unwrap().run().unwrap();
//!
//! let ucb = report.trace("UCB1").unwrap();
//! assert_eq!(ucb.metrics.len(), 200);
//! assert_eq!(ucb.pulls.iter().sum::<u64>(), 200);
//! ```
//!
//! # The stabilizer
//!
//! Every per-arm division adds [`PULL_STABILIZER`] (`1e-6`) to the pull count
//! instead of branching on zero. Unpulled arms therefore average to exactly 0
//! and, in UCB1, get a very large finite bonus once `t >= 2`. On round 1,
//! `ln(1) = 0` makes every UCB1 score 0 and the first-maximum tie-break
//! ([`argmax_first`]) picks arm 0.

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod utils;
pub use utils::*;

mod stats;
pub use stats::*;

mod decision;
pub use decision::*;

mod observer;
pub use observer::*;

mod env;
pub use env::*;

mod policy;
pub use policy::Strategy;

mod ucb;
pub use ucb::*;

mod egreedy;
pub use egreedy::*;

mod simulation;
pub use simulation::*;

mod input;
pub use input::*;

mod config;
pub use config::*;
