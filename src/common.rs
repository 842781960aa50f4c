use std::fmt;
use std::str::FromStr;

pub type Int = i64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Binding strength of a [BinaryOperator]; larger binds tighter.
pub type Rank = u8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    And,
    Or,
}

impl BinaryOperator {
    pub const ARITHMETIC: &'static [Self] = &[Self::Add, Self::Sub, Self::Mul, Self::Div];

    pub const CONDITIONAL: &'static [Self] = &[Self::Lt, Self::Gt, Self::Eq, Self::And, Self::Or];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "=",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// multiplicative > additive > comparison > equality > boolean
    pub const fn rank(&self) -> Rank {
        match self {
            Self::Mul | Self::Div => 4,
            Self::Add | Self::Sub => 3,
            Self::Lt | Self::Gt => 2,
            Self::Eq => 1,
            Self::And | Self::Or => 0,
        }
    }

    pub const fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown operator {0:?}")]
pub struct UnknownOperator(pub String);

impl FromStr for BinaryOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "=" => Self::Eq,
            "and" => Self::And,
            "or" => Self::Or,
            _ => return Err(UnknownOperator(s.to_owned())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip() {
        for op in BinaryOperator::ARITHMETIC.iter().chain(BinaryOperator::CONDITIONAL) {
            assert_eq!(op.as_str().parse::<BinaryOperator>(), Ok(*op));
        }
        assert_eq!(
            "%".parse::<BinaryOperator>(),
            Err(UnknownOperator("%".to_owned()))
        );
    }

    #[test]
    fn test_operator_ranks() {
        use BinaryOperator::*;
        assert!(Mul.rank() > Add.rank());
        assert!(Add.rank() > Lt.rank());
        assert!(Lt.rank() > Eq.rank());
        assert!(Eq.rank() > And.rank());
        assert_eq!(And.rank(), Or.rank());
        assert_eq!(Mul.rank(), Div.rank());
    }
}
