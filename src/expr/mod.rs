//! Typed expression trees and their evaluation to distributions.

mod stringify;
mod tree;
mod visit;

pub use stringify::{ExplainStringifier, SimpleStringifier, Stringify};
pub use tree::{
    BinaryOp, Bracketed, Evaluate, Expression, HighDice, HomogeneousDicePool, LowDice,
    MappedExpression,
};
pub use visit::{Accept, ExprVisitor};

use crate::dist::Distribution;
use crate::error::DResult;
use crate::types::Value;
use std::fmt;

/// Computes the exact distribution of `expr`.
#[tracing::instrument(skip_all, fields(expr = %expr))]
pub fn evaluate(expr: &Expression) -> DResult<Distribution<Value>> {
    let dist = expr.evaluate()?;
    tracing::debug!(outcomes = dist.len(), "evaluated");
    Ok(dist)
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier::new().stringify(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BinaryOperator::{self, *};
    use crate::dist::Probability;
    use crate::error::DistError;
    use crate::types::{Constant, Symbol, Type, Vector, VectorType};

    fn int(x: i64) -> Expression {
        Constant::new(x).into()
    }

    fn pool(count: i64, sides: i64) -> Expression {
        HomogeneousDicePool::new(count, sides).into()
    }

    fn sym(name: &str) -> Expression {
        Constant::new(Symbol::tick(name)).into()
    }

    fn bin(l: Expression, op: BinaryOperator, r: Expression) -> Expression {
        BinaryOp::new(l, op, r).unwrap().into()
    }

    fn check(expr: &Expression, expected: &[(Value, u64, u64)]) {
        let dist = evaluate(expr).unwrap();
        assert_eq!(dist.len(), expected.len(), "{}", expr);
        for (value, numer, denom) in expected {
            assert_eq!(
                dist.probability_of(value),
                Probability::ratio(*numer, *denom),
                "P({}) in {}",
                value,
                expr
            );
        }
    }

    #[test]
    fn test_constant() {
        check(&int(7), &[(Value::Int(7), 1, 1)]);
        assert_eq!(int(7).output_type(), Type::Integer);
    }

    #[test]
    fn test_die_below_four() {
        let expr = bin(pool(1, 6), Lt, int(4));
        assert_eq!(expr.output_type(), Type::Boolean);
        check(&expr, &[(Value::Bool(true), 1, 2), (Value::Bool(false), 1, 2)]);
    }

    #[test]
    fn test_two_dice_plus_one_above_six() {
        let expr = bin(bin(pool(2, 6), Add, int(1)), Gt, int(6));
        check(&expr, &[(Value::Bool(true), 26, 36), (Value::Bool(false), 10, 36)]);
        assert_eq!(expr.to_string(), "2d6 + 1 > 6");
    }

    #[test]
    fn test_division_error_propagates() {
        let expr = bin(int(6), Div, bin(pool(1, 2), Sub, int(1)));
        assert_eq!(evaluate(&expr), Err(DistError::ZeroDivision { dividend: 6 }));
    }

    #[test]
    fn test_keep_dice() {
        let high: Expression = HighDice {
            pool: HomogeneousDicePool::new(2, 4),
            keep: 1,
        }
        .into();
        check(
            &high,
            &[
                (Value::Int(1), 1, 16),
                (Value::Int(2), 3, 16),
                (Value::Int(3), 5, 16),
                (Value::Int(4), 7, 16),
            ],
        );
        let low: Expression = LowDice {
            pool: HomogeneousDicePool::new(2, 4),
            keep: 1,
        }
        .into();
        assert_eq!(low.to_string(), "2d4L1");
        check(
            &low,
            &[
                (Value::Int(1), 7, 16),
                (Value::Int(2), 5, 16),
                (Value::Int(3), 3, 16),
                (Value::Int(4), 1, 16),
            ],
        );
    }

    #[test]
    fn test_bracketed_is_transparent() {
        let inner = bin(pool(1, 4), Mul, int(2));
        let bracketed: Expression = Bracketed::new(inner.clone()).into();
        assert_eq!(evaluate(&bracketed), evaluate(&inner));
        assert_eq!(bracketed.to_string(), "(1d4 * 2)");
    }

    #[test]
    fn test_symbol_sum_is_vector() {
        let expr = bin(sym("a"), Add, sym("b"));
        let ab = VectorType::new(vec![(Symbol::tick("a"), Type::Integer), (Symbol::tick("b"), Type::Integer)]).unwrap();
        assert_eq!(expr.output_type(), Type::Vector(ab.clone()));
        let expected = Vector::new(
            ab,
            vec![(Symbol::tick("a"), Value::Int(1)), (Symbol::tick("b"), Value::Int(1))],
        )
        .unwrap();
        check(&expr, &[(Value::Vector(expected), 1, 1)]);
        assert_eq!(expr.to_string(), "'a + 'b");
        assert_eq!(
            ExplainStringifier::new().stringify(&expr),
            "('a as {'a: int, 'b: int}) + ('b as {'a: int, 'b: int})"
        );
    }

    #[test]
    fn test_undefined_operator() {
        let err = BinaryOp::new(int(1), Add, Constant::new(true).into()).unwrap_err();
        assert_eq!(err, DistError::no_operator(Add, &Type::Integer, &Type::Boolean));
        assert!(BinaryOp::new(sym("a"), Lt, sym("b")).is_err());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let expr = bin(bin(pool(3, 4), Sub, pool(1, 6)), Eq, int(2));
        assert_eq!(evaluate(&expr), evaluate(&expr));
        assert_eq!(evaluate(&expr).unwrap().total_probability(), Probability::one());
    }

    #[test]
    fn test_invalid_pool_surfaces_on_evaluate() {
        assert_eq!(
            evaluate(&pool(2, 0)),
            Err(DistError::domain("die sides", "at least 1", 0))
        );
    }
}
