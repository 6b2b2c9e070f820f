// Error kinds raised by the arithmetic, simulation, and search layers.

use thiserror::Error;

use crate::scenario::Toss;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// An overs value whose ball digit is not in `0..6`, or that is negative
    /// or non-finite.
    #[error("invalid overs value: {value}")]
    InvalidOvers { value: String },

    /// A malformed `"runs/overs"` string.
    #[error("invalid runs/overs string `{value}`: {reason}")]
    InvalidFormat { value: String, reason: String },

    #[error("team not found in the base standings: {team}")]
    TeamNotFound { team: String },

    /// The sweep finished without a single outcome landing on the requested
    /// position. This is a user-facing "not achievable" answer.
    #[error("no {toss} outcome places the team at position {desired_position}")]
    NoSolution { toss: Toss, desired_position: usize },

    /// A row located before mutation could not be found afterwards.
    #[error("unexpected error refreshing standings for {team}")]
    RefreshFailed { team: String },
}

impl ScenarioError {
    /// True for the "valid request, unreachable position" outcome, which
    /// transports report differently from malformed input.
    pub fn is_no_solution(&self) -> bool {
        matches!(self, ScenarioError::NoSolution { .. })
    }
}
