//! Untyped syntax trees as read from source.

use crate::common::*;
use crate::dice::DicePool;
use crate::rotate::{self, BinaryFamily};
use crate::types::Symbol;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Condition),
    /// `$name := expr`
    Definition(String, Condition),
}

/// A literal allowed as a vector component.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Literal {
    Integer(Int),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Integer(Int),
    Boolean(bool),
    Symbol(Symbol),
    Dice(DicePool),
    Vector(NonEmpty<(Symbol, Literal)>),
    Name(String),
    Group(Box<Condition>),
}

/// Arithmetic operator chains.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(Atom),
    Binary(Box<Term>, BinaryOperator, Box<Term>),
}

/// Comparison and boolean operator chains over terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Term(Term),
    Binary(Box<Condition>, BinaryOperator, Box<Condition>),
}

impl Term {
    /// Restores left associativity and precedence in a right-nested chain.
    pub fn normalize(self) -> Self {
        rotate::normalize(self, &|op: BinaryOperator| op.rank())
    }
}

impl Condition {
    /// Like [Term::normalize]. Terms inside are left untouched.
    pub fn normalize(self) -> Self {
        rotate::normalize(self, &|op: BinaryOperator| op.rank())
    }
}

impl BinaryFamily for Term {
    type Op = BinaryOperator;

    fn as_binary(&self) -> Option<(&Self, BinaryOperator, &Self)> {
        match self {
            Self::Binary(l, op, r) => Some((l, *op, r)),
            Self::Atom(_) => None,
        }
    }

    fn into_binary(self) -> Result<(Self, BinaryOperator, Self), Self> {
        match self {
            Self::Binary(l, op, r) => Ok((*l, op, *r)),
            atom => Err(atom),
        }
    }

    fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::Binary(Box::new(left), op, Box::new(right))
    }
}

impl BinaryFamily for Condition {
    type Op = BinaryOperator;

    fn as_binary(&self) -> Option<(&Self, BinaryOperator, &Self)> {
        match self {
            Self::Binary(l, op, r) => Some((l, *op, r)),
            Self::Term(_) => None,
        }
    }

    fn into_binary(self) -> Result<(Self, BinaryOperator, Self), Self> {
        match self {
            Self::Binary(l, op, r) => Ok((*l, op, *r)),
            term => Err(term),
        }
    }

    fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::Binary(Box::new(left), op, Box::new(right))
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<Term> for Condition {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(x) => write!(f, "{}", x),
            Self::Boolean(x) => write!(f, "{}", x),
        }
    }
}

// Binary nodes print fully parenthesized and groups in brackets, so the
// tree shape is visible.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(x) => write!(f, "{}", x),
            Self::Boolean(x) => write!(f, "{}", x),
            Self::Symbol(x) => write!(f, "{}", x),
            Self::Dice(x) => write!(f, "{}", x),
            Self::Vector(items) => {
                f.write_str("{")?;
                for (i, (symbol, value)) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", symbol, value)?;
                }
                f.write_str("}")
            }
            Self::Name(x) => write!(f, "${}", x),
            Self::Group(x) => write!(f, "[{}]", x),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(x) => write!(f, "{}", x),
            Self::Binary(l, op, r) => write!(f, "({} {} {})", l, op, r),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(x) => write!(f, "{}", x),
            Self::Binary(l, op, r) => write!(f, "({} {} {})", l, op, r),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(x) => write!(f, "{}", x),
            Self::Definition(name, x) => write!(f, "${} := {}", name, x),
        }
    }
}
