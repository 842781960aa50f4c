use super::visit::{Accept, ExprVisitor};
use crate::common::{BinaryOperator, Int};
use crate::dice::{homogeneous_pool, keep_highest, keep_lowest};
use crate::dist::{try_combine, Distribution};
use crate::error::{DResult, DistError};
use crate::ops::{lookup, Operator};
use crate::types::{Constant, Converter, Type, Value};

#[enum_dispatch::enum_dispatch]
pub trait Evaluate {
    /// The static type of every outcome this node can produce.
    fn output_type(&self) -> Type;

    fn evaluate(&self) -> DResult<Distribution<Value>>;
}

/// A typed expression tree.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Evaluate, Accept)]
pub enum Expression {
    Constant(Constant),
    Pool(HomogeneousDicePool),
    High(HighDice),
    Low(LowDice),
    Binary(BinaryOp),
    Bracketed(Bracketed),
    Mapped(MappedExpression),
}

impl Evaluate for Constant {
    fn output_type(&self) -> Type {
        Constant::ty(self).clone()
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        Ok(Distribution::certain(self.value().clone()))
    }
}

/// `count` dice with `sides` faces, summed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HomogeneousDicePool {
    pub count: Int,
    pub sides: Int,
}

impl HomogeneousDicePool {
    pub const fn new(count: Int, sides: Int) -> Self {
        Self { count, sides }
    }
}

impl Evaluate for HomogeneousDicePool {
    fn output_type(&self) -> Type {
        Type::Integer
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        Ok(homogeneous_pool(self.count, self.sides)?.map(|x| Value::Int(*x)))
    }
}

/// The sum of the `keep` highest dice of a pool.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HighDice {
    pub pool: HomogeneousDicePool,
    pub keep: Int,
}

impl Evaluate for HighDice {
    fn output_type(&self) -> Type {
        Type::Integer
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        let dist = keep_highest(self.pool.count, self.pool.sides, self.keep)?;
        Ok(dist.map(|x| Value::Int(*x)))
    }
}

/// The sum of the `keep` lowest dice of a pool.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LowDice {
    pub pool: HomogeneousDicePool,
    pub keep: Int,
}

impl Evaluate for LowDice {
    fn output_type(&self) -> Type {
        Type::Integer
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        let dist = keep_lowest(self.pool.count, self.pool.sides, self.keep)?;
        Ok(dist.map(|x| Value::Int(*x)))
    }
}

/// A resolved binary operation. Both operands already have the operator's
/// operand type.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub(crate) left: Box<Expression>,
    pub(crate) operator: Operator,
    pub(crate) right: Box<Expression>,
}

impl BinaryOp {
    /// Resolves `op` for the operand types and wraps each operand in a
    /// conversion to the common type where it needs one.
    pub fn new(left: Expression, op: BinaryOperator, right: Expression) -> DResult<Self> {
        let (left_ty, right_ty) = (left.output_type(), right.output_type());
        let operator = lookup(op, &left_ty, &right_ty)
            .ok_or_else(|| DistError::no_operator(op, &left_ty, &right_ty))?;
        let left = MappedExpression::coerce(left, operator.operand_type())?;
        let right = MappedExpression::coerce(right, operator.operand_type())?;
        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }
}

impl Evaluate for BinaryOp {
    fn output_type(&self) -> Type {
        self.operator.result_type().clone()
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        let left = self.left.evaluate()?;
        let right = self.right.evaluate()?;
        tracing::trace!(
            op = %self.operator.op(),
            left = left.len(),
            right = right.len(),
            "combining operands"
        );
        try_combine(&left, &right, |l, r| self.operator.evaluate(l, r))
    }
}

/// An explicitly parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Bracketed(pub Box<Expression>);

impl Bracketed {
    pub fn new(inner: Expression) -> Self {
        Self(Box::new(inner))
    }
}

impl Evaluate for Bracketed {
    fn output_type(&self) -> Type {
        self.0.output_type()
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        self.0.evaluate()
    }
}

/// Converts every outcome of `source` to another type.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedExpression {
    pub(crate) source: Box<Expression>,
    pub(crate) converter: Converter,
}

impl MappedExpression {
    pub fn new(source: Expression, target: Type) -> DResult<Self> {
        let converter = Converter::new(&source.output_type(), target)?;
        Ok(Self {
            source: Box::new(source),
            converter,
        })
    }

    /// `expr` itself if it already has type `target`, otherwise `expr`
    /// wrapped in a conversion.
    pub fn coerce(expr: Expression, target: &Type) -> DResult<Expression> {
        if expr.output_type() == *target {
            Ok(expr)
        } else {
            Self::new(expr, target.clone()).map(Expression::from)
        }
    }

    pub fn source(&self) -> &Expression {
        &self.source
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }
}

impl Evaluate for MappedExpression {
    fn output_type(&self) -> Type {
        self.converter.target().clone()
    }

    fn evaluate(&self) -> DResult<Distribution<Value>> {
        self.source
            .evaluate()?
            .try_map(|v| self.converter.convert(v))
    }
}

impl Accept for Constant {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_constant(self)
    }
}

impl Accept for HomogeneousDicePool {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_pool(self)
    }
}

impl Accept for HighDice {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_high(self)
    }
}

impl Accept for LowDice {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_low(self)
    }
}

impl Accept for BinaryOp {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_binary(self)
    }
}

impl Accept for Bracketed {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_bracketed(self)
    }
}

impl Accept for MappedExpression {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_mapped(self)
    }
}
