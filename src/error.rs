//! Error types.
//!
//! Two kinds come out of the simulation core, and both are caller mistakes
//! rather than transient conditions:
//!
//! - [`BanditError::InvalidParameter`]: a constructor or [`crate::SimulationConfig`]
//!   precondition was violated (arm count, round count, exploration rate).
//! - [`BanditError::ArmOutOfRange`]: an arm index outside `[0, arm_count)` was
//!   passed to a pull or an update.
//!
//! The remaining variants belong to the boundary layer (input files, settings).
//! Nothing is retried or clamped: the failing operation returns immediately and
//! leaves its state untouched.

use thiserror::Error;

/// Errors produced by the simulator and its input/config boundary.
#[derive(Error, Debug)]
pub enum BanditError {
    /// A construction parameter is outside its allowed domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the public API.
        name: &'static str,
        /// Human-readable description of the violated precondition.
        reason: String,
    },

    /// An arm index is not in `[0, arm_count)`.
    #[error("arm index {arm} out of range (arm_count = {arm_count})")]
    ArmOutOfRange {
        /// The rejected index.
        arm: usize,
        /// Number of arms of the object that rejected it.
        arm_count: usize,
    },

    /// An input file did not have the expected three-line structure.
    #[error("input format error: {0}")]
    InputFormat(String),

    /// A settings file could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BanditError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        BanditError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for the two error kinds raised by the simulation core.
    pub fn is_core(&self) -> bool {
        matches!(
            self,
            BanditError::InvalidParameter { .. } | BanditError::ArmOutOfRange { .. }
        )
    }
}

impl From<toml::de::Error> for BanditError {
    fn from(err: toml::de::Error) -> Self {
        BanditError::Config(err.to_string())
    }
}

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Reject arm indices outside `[0, arm_count)`.
pub(crate) fn check_arm(arm: usize, arm_count: usize) -> Result<()> {
    if arm < arm_count {
        Ok(())
    } else {
        Err(BanditError::ArmOutOfRange { arm, arm_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_arm_accepts_last_index_and_rejects_one_past() {
        assert!(check_arm(2, 3).is_ok());
        match check_arm(3, 3) {
            Err(BanditError::ArmOutOfRange { arm, arm_count }) => {
                assert_eq!((arm, arm_count), (3, 3));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn display_names_the_parameter() {
        let e = BanditError::invalid("arm_count", "must be >= 2, got 1");
        assert_eq!(e.to_string(), "invalid parameter `arm_count`: must be >= 2, got 1");
        assert!(e.is_core());
        assert!(!BanditError::InputFormat("x".into()).is_core());
    }
}
