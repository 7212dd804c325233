//! Injected observation hooks.
//!
//! The simulator keeps no global logger. Anything that wants to watch a
//! strategy or an environment passes an [`Observer`] at construction; the
//! default is [`NoopObserver`]. [`TracingObserver`] forwards events to
//! `tracing`, which is how the binary gets per-selection logs.

use std::fmt;
use std::sync::Arc;

use crate::decision::{Decision, DecisionNote};
use crate::error::BanditError;

/// An accepted reward update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateEvent {
    /// Name of the component that applied the update.
    pub source: &'static str,
    pub arm: usize,
    pub reward: f64,
    /// Arm total after the update.
    pub total_reward: f64,
    /// Arm pull count after the update.
    pub pulls: u64,
}

/// Capability set `{on_select, on_update, on_error}`; every hook defaults to a no-op.
pub trait Observer: Send + Sync {
    fn on_select(&self, _decision: &Decision) {}

    fn on_update(&self, _event: &UpdateEvent) {}

    /// Called with the error before it is returned to the caller.
    fn on_error(&self, _source: &'static str, _error: &BanditError) {}
}

/// Shared observer handle, cheap to clone into several components.
pub type SharedObserver = Arc<dyn Observer>;

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Default handle used by every constructor.
pub fn noop_observer() -> SharedObserver {
    Arc::new(NoopObserver)
}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_select(&self, decision: &Decision) {
        match &decision.note {
            DecisionNote::ConfidenceBound {
                round,
                score,
                bonus,
            } => tracing::debug!(
                policy = %decision.policy,
                arm = decision.arm,
                round,
                score,
                bonus,
                "selected arm by confidence bound"
            ),
            DecisionNote::Explore { draw } => tracing::debug!(
                policy = %decision.policy,
                arm = decision.arm,
                draw,
                "exploring: selected arm uniformly at random"
            ),
            DecisionNote::Exploit { draw, average } => tracing::debug!(
                policy = %decision.policy,
                arm = decision.arm,
                draw,
                average,
                "exploiting: selected arm with highest average reward"
            ),
        }
    }

    fn on_update(&self, event: &UpdateEvent) {
        tracing::trace!(
            source = event.source,
            arm = event.arm,
            reward = event.reward,
            total_reward = event.total_reward,
            pulls = event.pulls,
            "updated arm"
        );
    }

    fn on_error(&self, source: &'static str, error: &BanditError) {
        tracing::warn!(source, error = %error, "rejected operation");
    }
}

/// `Debug` stand-in for fields holding a [`SharedObserver`].
pub(crate) struct ObserverField;

impl fmt::Debug for ObserverField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<observer>")
    }
}
