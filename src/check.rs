//! Turns parsed syntax into typed expressions.

use crate::config::Limits;
use crate::dice::{DicePool, Keep};
use crate::error::Error;
use crate::expr::{BinaryOp, Bracketed, Expression, HighDice, HomogeneousDicePool, LowDice};
use crate::parse::ast::{Atom, Condition, Literal, Term};
use crate::scope::Scope;
use crate::types::{Constant, Symbol, Value, Vector, VectorType};
use std::collections::BTreeSet;

type CResult<T = Expression> = Result<T, Error>;

pub struct Checker<'s> {
    scope: &'s Scope,
    limits: Limits,
}

impl<'s> Checker<'s> {
    pub fn new(scope: &'s Scope, limits: Limits) -> Self {
        Self { scope, limits }
    }

    pub fn check_condition(&self, condition: &Condition) -> CResult {
        match condition {
            Condition::Term(term) => self.check_term(term),
            Condition::Binary(l, op, r) => {
                let l = self.check_condition(l)?;
                let r = self.check_condition(r)?;
                Ok(BinaryOp::new(l, *op, r)?.into())
            }
        }
    }

    pub fn check_term(&self, term: &Term) -> CResult {
        match term {
            Term::Atom(atom) => self.check_atom(atom),
            Term::Binary(l, op, r) => {
                let l = self.check_term(l)?;
                let r = self.check_term(r)?;
                Ok(BinaryOp::new(l, *op, r)?.into())
            }
        }
    }

    fn check_atom(&self, atom: &Atom) -> CResult {
        Ok(match atom {
            Atom::Integer(x) => Constant::new(*x).into(),
            Atom::Boolean(x) => Constant::new(*x).into(),
            Atom::Symbol(x) => Constant::new(x.clone()).into(),
            Atom::Dice(dice) => self.check_dice(dice)?,
            Atom::Vector(items) => self.check_vector(items)?,
            Atom::Name(name) => match self.scope.lookup(name) {
                Some(expr @ Expression::Binary(_)) => Bracketed::new(expr.clone()).into(),
                Some(expr) => expr.clone(),
                None => return Err(Error::UndefinedName(name.clone())),
            },
            Atom::Group(inner) => Bracketed::new(self.check_condition(inner)?).into(),
        })
    }

    fn check_dice(&self, dice: &DicePool) -> CResult {
        let pool = HomogeneousDicePool::new(dice.count, dice.sides);
        Ok(match dice.keep {
            None => {
                self.limits.check_pool(dice.count, dice.sides)?;
                pool.into()
            }
            Some((Keep::Highest, keep)) => {
                self.limits.check_keep(dice.count, dice.sides)?;
                HighDice { pool, keep }.into()
            }
            Some((Keep::Lowest, keep)) => {
                self.limits.check_keep(dice.count, dice.sides)?;
                LowDice { pool, keep }.into()
            }
        })
    }

    fn check_vector(&self, items: &[(Symbol, Literal)]) -> CResult {
        let mut seen = BTreeSet::new();
        for (symbol, _) in items {
            if !seen.insert(symbol) {
                return Err(Error::DuplicateDimension(symbol.to_string()));
            }
        }

        let literal = |value: &Literal| match value {
            Literal::Integer(x) => Value::Int(*x),
            Literal::Boolean(x) => Value::Bool(*x),
        };
        let ty = VectorType::new(
            items
                .iter()
                .map(|(symbol, value)| (symbol.clone(), literal(value).ty())),
        )?;
        let vector = Vector::new(
            ty,
            items
                .iter()
                .map(|(symbol, value)| (symbol.clone(), literal(value))),
        )?;
        Ok(Constant::new(vector).into())
    }
}
