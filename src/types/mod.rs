//! The static types of the dice language and the values that inhabit them.

mod convert;
mod vector;

pub use convert::{convert, find_common_type, promote, Converter};
pub use vector::{unify, Vector, VectorType};

use crate::common::Int;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// How a symbol was written: `'heads` or `:heads`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mark {
    Tick,
    Colon,
}

impl Mark {
    pub const fn as_char(&self) -> char {
        match self {
            Self::Tick => '\'',
            Self::Colon => ':',
        }
    }
}

/// A named outcome category.
///
/// Identity is the name alone: `'heads` and `:heads` are the same symbol and
/// only print differently.
#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    mark: Mark,
}

impl Symbol {
    pub fn new(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
        }
    }

    pub fn tick(name: impl Into<String>) -> Self {
        Self::new(name, Mark::Tick)
    }

    pub fn colon(name: impl Into<String>) -> Self {
        Self::new(name, Mark::Colon)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mark.as_char(), self.name)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TypeTag {
    Integer,
    Boolean,
    Symbol,
    Vector,
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Type {
    Integer,
    Boolean,
    /// Every symbol is a type of its own with exactly one inhabitant.
    Symbol(Symbol),
    Vector(VectorType),
}

impl Type {
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Integer => TypeTag::Integer,
            Self::Boolean => TypeTag::Boolean,
            Self::Symbol(_) => TypeTag::Symbol,
            Self::Vector(_) => TypeTag::Vector,
        }
    }

    /// The additive identity, used for vector dimensions that are not set.
    pub fn zero(&self) -> Value {
        match self {
            Self::Integer => Value::Int(0),
            Self::Boolean => Value::Bool(false),
            Self::Symbol(s) => Value::Symbol(s.clone()),
            Self::Vector(v) => Value::Vector(Vector::zero(v.clone())),
        }
    }

    pub fn as_vector(&self) -> Option<&VectorType> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("int"),
            Self::Boolean => f.write_str("bool"),
            Self::Symbol(s) => fmt::Display::fmt(s, f),
            Self::Vector(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// A runtime value. Within a single distribution every value has the same type.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Value {
    Int(Int),
    Bool(bool),
    Symbol(Symbol),
    Vector(Vector),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Self::Int(_) => Type::Integer,
            Self::Bool(_) => Type::Boolean,
            Self::Symbol(s) => Type::Symbol(s.clone()),
            Self::Vector(v) => Type::Vector(v.ty().clone()),
        }
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Int(_) => TypeTag::Integer,
            Self::Bool(_) => TypeTag::Boolean,
            Self::Symbol(_) => TypeTag::Symbol,
            Self::Vector(_) => TypeTag::Vector,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(x) => *x == 0,
            Self::Bool(x) => !*x,
            Self::Symbol(_) => true,
            Self::Vector(v) => v.is_zero(),
        }
    }
}

impl From<Int> for Value {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Self::Bool(x)
    }
}

impl From<Symbol> for Value {
    fn from(x: Symbol) -> Self {
        Self::Symbol(x)
    }
}

impl From<Vector> for Value {
    fn from(x: Vector) -> Self {
        Self::Vector(x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Bool(x) => fmt::Display::fmt(x, f),
            Self::Symbol(x) => fmt::Display::fmt(x, f),
            Self::Vector(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// A literal paired with its type.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Constant {
    value: Value,
    ty: Type,
}

impl Constant {
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.ty();
        Self { value, ty }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
