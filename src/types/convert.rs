use super::{Type, Value, Vector, VectorType};
use crate::error::{DResult, DistError};
use std::fmt;

/// Lifts a symbol to its unit vector type; vectors are returned as they are.
pub fn promote(ty: &Type) -> Option<VectorType> {
    match ty {
        Type::Symbol(s) => Some(VectorType::unit(s.clone())),
        Type::Vector(v) => Some(v.clone()),
        Type::Integer | Type::Boolean => None,
    }
}

/// The type both operands of a binary operator are converted to, if any.
pub fn find_common_type(a: &Type, b: &Type) -> Option<Type> {
    match (a, b) {
        (Type::Integer, Type::Integer) => Some(Type::Integer),
        (Type::Boolean, Type::Boolean) => Some(Type::Boolean),
        (Type::Symbol(_) | Type::Vector(_), Type::Symbol(_) | Type::Vector(_)) => {
            let (a, b) = (promote(a)?, promote(b)?);
            match a.unify_with(&b) {
                Ok(unified) => Some(Type::Vector(unified)),
                Err(e) => {
                    tracing::debug!(error = %e, "no common vector type");
                    None
                }
            }
        }
        _ => None,
    }
}

fn is_convertible(from: &Type, to: &Type) -> bool {
    match (from, to) {
        (Type::Integer, Type::Integer) | (Type::Boolean, Type::Boolean) => true,
        (Type::Symbol(a), Type::Symbol(b)) => a == b,
        (Type::Symbol(s), Type::Vector(v)) => v.get(s) == Some(&Type::Integer),
        (Type::Vector(a), Type::Vector(b)) => b.contains(a),
        _ => false,
    }
}

/// Converts `value` to `target`.
///
/// A symbol becomes the vector with that dimension set to one; a vector is
/// re-expressed under a wider vector type; integers, booleans and symbols
/// convert to their own type unchanged.
pub fn convert(value: &Value, target: &Type) -> DResult<Value> {
    match (value, target) {
        (Value::Int(_), Type::Integer) | (Value::Bool(_), Type::Boolean) => Ok(value.clone()),
        (Value::Symbol(a), Type::Symbol(b)) if a == b => Ok(value.clone()),
        (Value::Symbol(s), Type::Vector(v)) if is_convertible(&value.ty(), target) => {
            Vector::unit(s.clone()).widen(v).map(Value::Vector)
        }
        (Value::Vector(x), Type::Vector(v)) => x.widen(v).map(Value::Vector),
        _ => Err(DistError::no_conversion(&value.ty(), target)),
    }
}

/// A conversion to a fixed target type, checked when it is built.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Converter {
    target: Type,
}

impl Converter {
    pub fn new(from: &Type, target: Type) -> DResult<Self> {
        if is_convertible(from, &target) {
            Ok(Self { target })
        } else {
            Err(DistError::no_conversion(from, &target))
        }
    }

    pub fn target(&self) -> &Type {
        &self.target
    }

    pub fn convert(&self, value: &Value) -> DResult<Value> {
        convert(value, &self.target)
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "as {}", self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    fn sym(name: &str) -> Symbol {
        Symbol::tick(name)
    }

    fn unit(name: &str) -> Type {
        Type::Vector(VectorType::unit(sym(name)))
    }

    fn ab() -> VectorType {
        VectorType::new(vec![(sym("a"), Type::Integer), (sym("b"), Type::Integer)]).unwrap()
    }

    #[test]
    fn test_common_scalars() {
        assert_eq!(find_common_type(&Type::Integer, &Type::Integer), Some(Type::Integer));
        assert_eq!(find_common_type(&Type::Boolean, &Type::Boolean), Some(Type::Boolean));
        assert_eq!(find_common_type(&Type::Integer, &Type::Boolean), None);
        assert_eq!(find_common_type(&Type::Integer, &unit("a")), None);
        assert_eq!(
            find_common_type(&Type::Symbol(sym("a")), &Type::Boolean),
            None
        );
    }

    #[test]
    fn test_common_symbols_and_vectors() {
        let a = Type::Symbol(sym("a"));
        let b = Type::Symbol(sym("b"));
        assert_eq!(find_common_type(&a, &b), Some(Type::Vector(ab())));
        assert_eq!(find_common_type(&a, &a), Some(unit("a")));
        assert_eq!(find_common_type(&unit("b"), &a), Some(Type::Vector(ab())));
        assert_eq!(find_common_type(&a, &unit("b")), Some(Type::Vector(ab())));
        assert_eq!(find_common_type(&unit("a"), &unit("b")), Some(Type::Vector(ab())));

        let a_bool = Type::Vector(VectorType::new(vec![(sym("a"), Type::Boolean)]).unwrap());
        assert_eq!(find_common_type(&a_bool, &a), None);
    }

    #[test]
    fn test_convert_symbol_to_vector() {
        let v = convert(&Value::Symbol(sym("a")), &Type::Vector(ab())).unwrap();
        let expected = Vector::new(ab(), vec![(sym("a"), Value::Int(1))]).unwrap();
        assert_eq!(v, Value::Vector(expected));
    }

    #[test]
    fn test_convert_identities() {
        assert_eq!(convert(&Value::Int(4), &Type::Integer), Ok(Value::Int(4)));
        assert_eq!(convert(&Value::Bool(true), &Type::Boolean), Ok(Value::Bool(true)));
        let s = Value::Symbol(sym("a"));
        assert_eq!(convert(&s, &Type::Symbol(sym("a"))), Ok(s.clone()));
        assert!(convert(&s, &Type::Symbol(sym("b"))).is_err());
    }

    #[test]
    fn test_convert_rejects() {
        assert_eq!(
            convert(&Value::Int(1), &Type::Boolean),
            Err(DistError::no_conversion(&Type::Integer, &Type::Boolean))
        );
        assert!(convert(&Value::Symbol(sym("c")), &Type::Vector(ab())).is_err());
        let wide = Value::Vector(Vector::zero(ab()));
        assert!(convert(&wide, &unit("a")).is_err());
        assert!(convert(&Value::Int(1), &unit("a")).is_err());
    }

    #[test]
    fn test_converter_checks_eagerly() {
        assert!(Converter::new(&Type::Symbol(sym("a")), Type::Vector(ab())).is_ok());
        assert!(Converter::new(&Type::Integer, Type::Vector(ab())).is_err());
        let widen = Converter::new(&unit("b"), Type::Vector(ab())).unwrap();
        let converted = widen
            .convert(&Value::Vector(Vector::unit(sym("b"))))
            .unwrap();
        assert_eq!(converted.ty(), Type::Vector(ab()));
    }
}
