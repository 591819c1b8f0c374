//! Error types for equation generation.
//!
//! Configuration errors fail fast and are never retried. Degenerate
//! candidates are rejected internally and recovered by the retry
//! controller; only retry exhaustion and internal consistency defects
//! reach the caller.

use thiserror::Error;

/// The caller supplied parameters outside supported bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The allowed operator set is empty.
    #[error("operator set must not be empty")]
    EmptyOperations,

    /// The unknown count is outside what the mode supports.
    #[error("{mode} supports {min} to {max} unknowns, got {requested}")]
    UnsupportedUnknownCount {
        /// Mode name.
        mode: &'static str,
        /// Requested unknown count.
        requested: usize,
        /// Minimum supported count.
        min: usize,
        /// Maximum supported count.
        max: usize,
    },

    /// The value bound is too small for the mode to sample from.
    #[error("max_value must be at least {min} for {mode}, got {got}")]
    RangeTooSmall {
        /// Mode name.
        mode: &'static str,
        /// Minimum usable bound.
        min: i64,
        /// Supplied bound.
        got: i64,
    },

    /// The value bound exceeds what the samplers support.
    #[error("max_value must be at most {max} for {mode}, got {got}")]
    RangeTooLarge {
        /// Mode name.
        mode: &'static str,
        /// Maximum usable bound.
        max: i64,
        /// Supplied bound.
        got: i64,
    },

    /// The basic-math element count is outside the supported range.
    #[error("element count must be between 1 and {max}, got {got}")]
    InvalidElementCount {
        /// Maximum supported element count.
        max: u32,
        /// Supplied element count.
        got: u32,
    },

    /// An empty pattern list was supplied.
    #[error("pattern override requires at least one pattern")]
    EmptyPatterns,

    /// A pattern template failed to parse or left the linear fragment.
    #[error("invalid pattern template {template:?}: {reason}")]
    InvalidPattern {
        /// The offending template.
        template: String,
        /// What went wrong.
        reason: String,
    },
}

/// Failure surface of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Invalid configuration; never retried.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The retry ceiling was exhausted without producing a uniquely
    /// solvable system. The configuration may simply be too constrained.
    #[error("no uniquely solvable system for mode {mode} after {attempts} attempts")]
    RetriesExhausted {
        /// Mode name of the failing configuration.
        mode: &'static str,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// A built equation failed to reproduce the pre-assigned solution, or
    /// a builder produced a nonlinear expression. Impossible under correct
    /// construction; surfaced distinctly so it reads as a bug signal
    /// rather than being masked by the retry loop.
    #[error("internal consistency defect: {0}")]
    Internal(String),
}
