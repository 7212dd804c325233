//! Decision envelope for strategy outputs.
//!
//! A [`Decision`] is the audit-friendly record of one `select_arm` call: which
//! policy chose, which arm, and a typed [`DecisionNote`] saying why. Observers
//! receive it on every selection; callers that only want the index use
//! [`crate::Strategy::select_arm`].

use serde::{Deserialize, Serialize};

/// Which policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionPolicy {
    Ucb1,
    EpsilonGreedy,
}

impl DecisionPolicy {
    /// Stable display name, used for metric column headers.
    pub fn name(self) -> &'static str {
        match self {
            DecisionPolicy::Ucb1 => "UCB1",
            DecisionPolicy::EpsilonGreedy => "Epsilon-Greedy",
        }
    }
}

impl std::fmt::Display for DecisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a decision happened.
///
/// Prefer adding new variants over changing existing semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecisionNote {
    /// Highest `average + bonus` score, first maximum on ties.
    ConfidenceBound {
        /// Round counter after the increment for this selection.
        round: u64,
        /// Winning score.
        score: f64,
        /// Exploration bonus of the winning arm.
        bonus: f64,
    },

    /// Uniformly random arm (exploration branch).
    Explore {
        /// The uniform draw that fell below the exploration rate.
        draw: f64,
    },

    /// Highest stabilized average reward, first maximum on ties.
    Exploit {
        /// The uniform draw that was at or above the exploration rate.
        draw: f64,
        /// Average reward of the chosen arm.
        average: f64,
    },
}

/// A single strategy decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// The policy that produced this decision.
    pub policy: DecisionPolicy,
    /// The selected arm index.
    pub arm: usize,
    /// Why this arm was chosen.
    pub note: DecisionNote,
}

impl Decision {
    /// True if the arm came from a uniform random draw.
    pub fn is_exploration(&self) -> bool {
        matches!(self.note, DecisionNote::Explore { .. })
    }
}
