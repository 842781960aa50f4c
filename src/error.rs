use crate::common::{BinaryOperator, Int};
use crate::parse::ParseError;
use crate::types::Type;
use thiserror::Error;

pub type DResult<T> = Result<T, DistError>;

/// Failures of the evaluation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistError {
    #[error("{what} must be {expected}, found {found}")]
    InvalidDomain {
        what: &'static str,
        expected: &'static str,
        found: Int,
    },
    #[error("dimension {dimension} is {first} in one vector and {second} in another")]
    TypeConflict {
        dimension: String,
        first: Type,
        second: Type,
    },
    #[error("{0}")]
    InvalidType(String),
    #[error("{0} needs at least one input")]
    EmptyInput(&'static str),
    #[error("cannot divide {dividend} by zero")]
    ZeroDivision { dividend: Int },
    #[error("{left} {op} {right} overflows")]
    Overflow {
        op: BinaryOperator,
        left: Int,
        right: Int,
    },
    #[error("internal error: operator '{op}' dispatched on {left} and {right}")]
    InternalInvariant {
        op: BinaryOperator,
        left: Type,
        right: Type,
    },
}

impl DistError {
    pub(crate) fn domain(what: &'static str, expected: &'static str, found: Int) -> Self {
        Self::InvalidDomain {
            what,
            expected,
            found,
        }
    }

    pub(crate) fn overflow(op: BinaryOperator, left: Int, right: Int) -> Self {
        Self::Overflow { op, left, right }
    }

    pub(crate) fn no_operator(op: BinaryOperator, left: &Type, right: &Type) -> Self {
        Self::InvalidType(format!(
            "operator '{}' is not defined for {} and {}",
            op, left, right
        ))
    }

    pub(crate) fn no_conversion(from: &Type, to: &Type) -> Self {
        Self::InvalidType(format!("cannot convert {} to {}", from, to))
    }
}

/// Failures of the front end: parsing, name resolution and limits, plus
/// anything the engine reports.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Dist(#[from] DistError),
    #[error("${0} is not defined")]
    UndefinedName(String),
    #[error("dimension {0} appears twice in a vector literal")]
    DuplicateDimension(String),
    #[error("{what} of {found} exceeds the limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        found: u128,
        limit: u128,
    },
}
