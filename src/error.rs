//! Error types for the engine.

use thiserror::Error;

/// Errors raised during system construction or evaluation.
///
/// Construction errors (`InvertedDomain` through `EmptyRule`) are fatal to
/// setup; evaluation errors (`NoRuleFired`, `Convergence`) are per-call and
/// a batch driver may skip the offending record.
#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("domain bounds are inverted: [{low}, {high}]")]
    InvertedDomain { low: f64, high: f64 },

    #[error("trapezoid breakpoints of '{name}' must be non-decreasing: {points:?}")]
    NonMonotonicBreakpoints { name: String, points: [f64; 4] },

    #[error("shoulder level {level} of '{name}' is outside [0, 1]")]
    LevelOutOfRange { name: String, level: f64 },

    #[error("lower envelope of '{name}' exceeds the upper envelope at x = {x}")]
    EnvelopeCrossing { name: String, x: f64 },

    #[error("clause '{clause}' references a variable that is not registered")]
    UnregisteredVariable { clause: String },

    #[error("rule with consequent '{consequent}' has no antecedents")]
    EmptyRule { consequent: String },

    #[error("no rule fired for output '{output}'")]
    NoRuleFired { output: String },

    #[error("type reduction did not converge within {iterations} iterations")]
    Convergence { iterations: usize },

    #[error("discretized samples must be strictly increasing (index {index})")]
    NonMonotonicSamples { index: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("record on line {line} is malformed: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
