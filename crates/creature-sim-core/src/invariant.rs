use std::{error::Error, fmt};

use crate::stats::Stat;

/// A broken structural invariant. Never produced by correct use of the engine;
/// callers should surface it instead of recovering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    GenePoolSize { expected: usize, actual: usize },
    StatOutOfRange { stat: Stat, value: u32, ceiling: u32 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::GenePoolSize { expected, actual } => {
                write!(f, "gene pool holds {actual} genes, expected {expected}")
            }
            InvariantViolation::StatOutOfRange {
                stat,
                value,
                ceiling,
            } => write!(f, "{stat} value {value} outside [0, {ceiling}]"),
        }
    }
}

impl Error for InvariantViolation {}
