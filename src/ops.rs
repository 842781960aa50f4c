//! Operator resolution: which binary operators exist for which operand types.

use crate::common::{BinaryOperator, Rank};
use crate::error::{DResult, DistError};
use crate::types::{find_common_type, Type, TypeTag, Value};
use std::fmt;

/// Every (operator, operand kind) pair the language defines. Operands are
/// first converted to their common type; the tag here is that common type's.
const REGISTRY: &[(BinaryOperator, TypeTag)] = {
    use BinaryOperator::*;
    &[
        (Add, TypeTag::Integer),
        (Sub, TypeTag::Integer),
        (Mul, TypeTag::Integer),
        (Div, TypeTag::Integer),
        (Add, TypeTag::Vector),
        (Sub, TypeTag::Vector),
        (Lt, TypeTag::Integer),
        (Gt, TypeTag::Integer),
        (Eq, TypeTag::Integer),
        (Eq, TypeTag::Boolean),
        (Eq, TypeTag::Symbol),
        (Eq, TypeTag::Vector),
        (And, TypeTag::Boolean),
        (Or, TypeTag::Boolean),
    ]
};

fn is_registered(op: BinaryOperator, tag: TypeTag) -> bool {
    REGISTRY.contains(&(op, tag))
}

/// Vector arithmetic recurses into the components, so every component type
/// has to support the operator too.
fn supports(op: BinaryOperator, ty: &Type) -> bool {
    is_registered(op, ty.tag())
        && match ty {
            Type::Vector(v) if op.is_arithmetic() => v.dims().values().all(|t| supports(op, t)),
            _ => true,
        }
}

/// A binary operator resolved against concrete operand types.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Operator {
    op: BinaryOperator,
    operand: Type,
    result: Type,
}

impl Operator {
    pub fn op(&self) -> BinaryOperator {
        self.op
    }

    pub fn symbol(&self) -> &'static str {
        self.op.as_str()
    }

    pub fn rank(&self) -> Rank {
        self.op.rank()
    }

    /// The type both operands are converted to before evaluation.
    pub fn operand_type(&self) -> &Type {
        &self.operand
    }

    pub fn result_type(&self) -> &Type {
        &self.result
    }

    pub fn evaluate(&self, left: &Value, right: &Value) -> DResult<Value> {
        apply(self.op, left, right)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) {} ({}) -> {}",
            self.operand, self.op, self.operand, self.result
        )
    }
}

/// Resolves `op` for operands of type `left` and `right`.
pub fn lookup(op: BinaryOperator, left: &Type, right: &Type) -> Option<Operator> {
    let operand = find_common_type(left, right)?;
    if !supports(op, &operand) {
        return None;
    }
    let result = if op.is_arithmetic() {
        operand.clone()
    } else {
        Type::Boolean
    };
    Some(Operator {
        op,
        operand,
        result,
    })
}

fn apply(op: BinaryOperator, left: &Value, right: &Value) -> DResult<Value> {
    use BinaryOperator::*;

    Ok(match (op, left, right) {
        (Div, Value::Int(x), Value::Int(0)) => {
            return Err(DistError::ZeroDivision { dividend: *x })
        }
        (Add | Sub | Mul | Div, Value::Int(x), Value::Int(y)) => {
            let ret = match op {
                Add => x.checked_add(*y),
                Sub => x.checked_sub(*y),
                Mul => x.checked_mul(*y),
                _ => x.checked_div(*y),
            };
            Value::Int(ret.ok_or_else(|| DistError::overflow(op, *x, *y))?)
        }
        (Add | Sub, Value::Vector(x), Value::Vector(y)) if x.ty() == y.ty() => {
            Value::Vector(x.zip_with(y, |l, r| apply(op, l, r))?)
        }
        (Lt, Value::Int(x), Value::Int(y)) => Value::Bool(x < y),
        (Gt, Value::Int(x), Value::Int(y)) => Value::Bool(x > y),
        (Eq, x, y) if x.ty() == y.ty() => Value::Bool(x == y),
        (And, Value::Bool(x), Value::Bool(y)) => Value::Bool(*x && *y),
        (Or, Value::Bool(x), Value::Bool(y)) => Value::Bool(*x || *y),
        _ => {
            return Err(DistError::InternalInvariant {
                op,
                left: left.ty(),
                right: right.ty(),
            })
        }
    })
}
