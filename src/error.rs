//! Error types for the boundary layers.
//!
//! The search itself is infallible: timeouts, infeasible inputs and empty
//! inputs are reported through [`SolverOutput`](crate::bnb::SolverOutput).
//! These errors cover configuration, model construction and request
//! validation, which happen before a search starts.

use thiserror::Error;

use crate::model::StatId;

/// Invalid [`BnbConfig`](crate::bnb::BnbConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("top_n must be at least 1")]
    ZeroTopN,

    #[error("time_limit must be positive")]
    ZeroTimeLimit,

    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

/// Malformed model input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A comparison operator string outside `<=, >=, ==, <, >`.
    #[error("unknown comparison operator: {0:?}")]
    UnknownOperator(String),
}

/// Rejected solve request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("stat {0} is not defined for this profile")]
    UnknownStat(StatId),

    #[error("constraint on stat {stat}: {source}")]
    InvalidOperator {
        stat: StatId,
        #[source]
        source: ModelError,
    },

    #[error("at least one priority must have a non-zero weight")]
    NoEffectivePriority,

    #[error("top_n must be within 1..={max}, got {got}")]
    TopNOutOfRange { got: usize, max: usize },

    #[error("non-finite value for stat {0}")]
    NonFinite(StatId),

    #[error("preset name must not be empty")]
    EmptyPresetName,

    #[error("preset name is {len} characters long, the limit is {max}")]
    PresetNameTooLong { len: usize, max: usize },

    #[error("at least one priority is required")]
    MissingPriority,
}
