//! Exact probability distributions for dice expressions.

pub mod check;
pub mod common;
pub mod config;
pub mod dice;
pub mod dist;
pub mod error;
pub mod expr;
pub mod histogram;
pub mod ops;
pub mod parse;
pub mod rotate;
pub mod scope;
pub mod types;

pub use config::Limits;
pub use dist::{Distribution, Event, Probability};
pub use error::{DistError, Error};
pub use expr::{evaluate, Expression};
pub use scope::Scope;
pub use types::{Type, Value};

use check::Checker;
use expr::Evaluate;
use parse::ast::Statement;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The distribution of a single expression, checked against default limits.
pub fn distribution(s: &str) -> Result<Distribution<Value>> {
    match Session::default().run(s)? {
        Outcome::Evaluated { dist, .. } => Ok(dist),
        Outcome::Defined { expr, .. } => Ok(evaluate(&expr)?),
    }
}

/// What running one statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Evaluated {
        expr: Expression,
        dist: Distribution<Value>,
    },
    /// Definitions are checked but not evaluated.
    Defined { name: String, expr: Expression },
}

/// Statements run one after another, sharing their definitions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    scope: Scope,
    limits: Limits,
}

impl Session {
    pub fn new(limits: Limits) -> Self {
        Self {
            scope: Scope::new(),
            limits,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Runs one statement. A failed statement leaves the session unchanged.
    pub fn run(&mut self, s: &str) -> Result<Outcome> {
        let statement = parse::parse(s)?;
        let checker = Checker::new(&self.scope, self.limits);
        match statement {
            Statement::Expression(condition) => {
                let expr = checker.check_condition(&condition)?;
                let dist = evaluate(&expr)?;
                Ok(Outcome::Evaluated { expr, dist })
            }
            Statement::Definition(name, condition) => {
                let expr = checker.check_condition(&condition)?;
                tracing::debug!(%name, ty = %expr.output_type(), "defined");
                self.scope = self.scope.define(name.clone(), expr.clone());
                Ok(Outcome::Defined { name, expr })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Symbol, Vector, VectorType};

    fn check(s: &str, expected: &[(Value, u64, u64)]) {
        let dist = distribution(s).unwrap();
        assert_eq!(dist.len(), expected.len(), "{}", s);
        for (value, numer, denom) in expected {
            assert_eq!(
                dist.probability_of(value),
                Probability::ratio(*numer, *denom),
                "P({}) in {}",
                value,
                s
            );
        }
    }

    #[test]
    fn test_end_to_end() {
        check("d6 < 4", &[(Value::Bool(true), 1, 2), (Value::Bool(false), 1, 2)]);
        check(
            "2d6 + 1 > 6",
            &[(Value::Bool(true), 26, 36), (Value::Bool(false), 10, 36)],
        );
        check("3 - 1 - 1", &[(Value::Int(1), 1, 1)]);
        check("2 + 3 * 4", &[(Value::Int(14), 1, 1)]);
        check("(2 + 3) * 4", &[(Value::Int(20), 1, 1)]);
        check("7 / 2", &[(Value::Int(3), 1, 1)]);
        check("d4 = d4", &[(Value::Bool(true), 1, 4), (Value::Bool(false), 3, 4)]);
    }

    #[test]
    fn test_vector_outcomes() {
        let ab = VectorType::new(vec![
            (Symbol::tick("heads"), Type::Integer),
            (Symbol::tick("tails"), Type::Integer),
        ])
        .unwrap();
        let v = |h: i64, t: i64| {
            Value::Vector(
                Vector::new(
                    ab.clone(),
                    vec![
                        (Symbol::tick("heads"), Value::Int(h)),
                        (Symbol::tick("tails"), Value::Int(t)),
                    ],
                )
                .unwrap(),
            )
        };
        check("'heads + 'tails", &[(v(1, 1), 1, 1)]);
        check("{'heads: 2} - 'tails", &[(v(2, -1), 1, 1)]);
    }

    #[test]
    fn test_session_definitions() {
        let mut session = Session::default();
        let defined = session.run("$atk := d20 + 5").unwrap();
        assert!(matches!(defined, Outcome::Defined { ref name, .. } if name == "atk"));

        let hit = session.run("$atk > 15").unwrap();
        match hit {
            Outcome::Evaluated { expr, dist } => {
                assert_eq!(expr.to_string(), "(1d20 + 5) > 15");
                assert_eq!(
                    dist.probability_of(&Value::Bool(true)),
                    Probability::ratio(1, 2)
                );
            }
            other => panic!("expected a distribution, got {:?}", other),
        }

        assert!(session.run("$atk + true").is_err());
        assert!(session.scope().lookup("atk").is_some());
    }

    #[test]
    fn test_redefinition_shadows() {
        let mut session = Session::default();
        session.run("$x := 1").unwrap();
        session.run("$x := $x + 1").unwrap();
        check_session(&mut session, "$x", Value::Int(2));
    }

    fn check_session(session: &mut Session, s: &str, expected: Value) {
        match session.run(s).unwrap() {
            Outcome::Evaluated { dist, .. } => assert_eq!(dist, Distribution::certain(expected)),
            other => panic!("expected a distribution, got {:?}", other),
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(distribution("1 +"), Err(Error::Parse(_))));
        assert!(matches!(distribution("$y"), Err(Error::UndefinedName(_))));
        assert!(matches!(
            distribution("1 / (d2 - 1)"),
            Err(Error::Dist(DistError::ZeroDivision { dividend: 1 }))
        ));
        assert!(matches!(
            distribution("1000d6"),
            Err(Error::LimitExceeded { .. })
        ));
        assert!(matches!(
            distribution("2d6H2"),
            Err(Error::Dist(DistError::InvalidDomain { .. }))
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(
            distribution("9223372036854775807 + 1"),
            Err(Error::Dist(DistError::Overflow {
                op: common::BinaryOperator::Add,
                left: i64::MAX,
                right: 1,
            }))
        );
        assert_eq!(
            distribution("(0 - 9223372036854775807 - 1) / (0 - 1)"),
            Err(Error::Dist(DistError::Overflow {
                op: common::BinaryOperator::Div,
                left: i64::MIN,
                right: -1,
            }))
        );
        assert!(matches!(
            Session::new(Limits::new_unbounded()).run("2d9223372036854775807"),
            Err(Error::Dist(DistError::Overflow { .. }))
        ));
    }

    #[test]
    fn test_spaced_names() {
        let mut session = Session::default();
        session.run("$x := 2").unwrap();
        check_session(&mut session, "$x * 3", Value::Int(6));
        check_session(&mut session, "$x + 1 - $x", Value::Int(1));
        check_session(&mut session, "{'a:true} = {'a: true}", Value::Bool(true));
    }
}
