use super::{Symbol, Type, Value};
use crate::error::{DResult, DistError};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A set of named, orthogonal dimensions, each with a component type.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VectorType {
    dims: BTreeMap<Symbol, Type>,
}

impl VectorType {
    /// Fails if the same dimension is listed twice with different types.
    pub fn new(dims: impl IntoIterator<Item = (Symbol, Type)>) -> DResult<Self> {
        let mut ret = Self::default();
        for (symbol, ty) in dims {
            ret.insert(symbol, ty)?;
        }
        Ok(ret)
    }

    /// The one-dimensional integer vector type `{symbol: int}`.
    pub fn unit(symbol: Symbol) -> Self {
        let mut dims = BTreeMap::new();
        dims.insert(symbol, Type::Integer);
        Self { dims }
    }

    pub fn dims(&self) -> &BTreeMap<Symbol, Type> {
        &self.dims
    }

    pub fn get(&self, dimension: &Symbol) -> Option<&Type> {
        self.dims.get(dimension)
    }

    pub fn len(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Whether every dimension of `other` exists here with the same type.
    pub fn contains(&self, other: &VectorType) -> bool {
        other
            .dims
            .iter()
            .all(|(symbol, ty)| self.dims.get(symbol) == Some(ty))
    }

    pub fn unify_with(&self, other: &VectorType) -> DResult<VectorType> {
        let mut ret = self.clone();
        for (symbol, ty) in &other.dims {
            ret.insert(symbol.clone(), ty.clone())?;
        }
        Ok(ret)
    }

    fn insert(&mut self, symbol: Symbol, ty: Type) -> DResult<()> {
        match self.dims.get(&symbol) {
            Some(existing) if *existing != ty => Err(DistError::TypeConflict {
                dimension: symbol.to_string(),
                first: existing.clone(),
                second: ty,
            }),
            Some(_) => Ok(()),
            None => {
                self.dims.insert(symbol, ty);
                Ok(())
            }
        }
    }
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (symbol, ty)) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", symbol, ty)?;
        }
        f.write_str("}")
    }
}

/// The smallest vector type whose dimensions are the union of `types`.
///
/// Commutative and associative; fails when one dimension carries two
/// different component types, or when `types` is empty.
pub fn unify<'a>(types: impl IntoIterator<Item = &'a VectorType>) -> DResult<VectorType> {
    let mut types = types.into_iter();
    let first = types.next().ok_or(DistError::EmptyInput("unify"))?;
    types.try_fold(first.clone(), |acc, next| acc.unify_with(next))
}

/// A value of a [VectorType].
///
/// Only non-zero components are stored; every other dimension of the type
/// reads as that dimension's zero.
#[derive(Debug, Clone)]
pub struct Vector {
    ty: VectorType,
    components: BTreeMap<Symbol, Value>,
}

impl Vector {
    pub fn new(
        ty: VectorType,
        components: impl IntoIterator<Item = (Symbol, Value)>,
    ) -> DResult<Self> {
        let mut ret = Self::zero(ty);
        for (symbol, value) in components {
            let dim_ty = ret.ty.get(&symbol).ok_or_else(|| {
                DistError::InvalidType(format!("{} is not a dimension of {}", symbol, ret.ty))
            })?;
            let value_ty = value.ty();
            if *dim_ty != value_ty {
                return Err(DistError::TypeConflict {
                    dimension: symbol.to_string(),
                    first: dim_ty.clone(),
                    second: value_ty,
                });
            }
            if value.is_zero() {
                ret.components.remove(&symbol);
            } else {
                ret.components.insert(symbol, value);
            }
        }
        Ok(ret)
    }

    pub fn zero(ty: VectorType) -> Self {
        Self {
            ty,
            components: BTreeMap::new(),
        }
    }

    /// `{symbol: 1}` under the unit type of `symbol`.
    pub fn unit(symbol: Symbol) -> Self {
        let ty = VectorType::unit(symbol.clone());
        let mut components = BTreeMap::new();
        components.insert(symbol, Value::Int(1));
        Self { ty, components }
    }

    pub fn ty(&self) -> &VectorType {
        &self.ty
    }

    /// `None` if `dimension` is not part of this vector's type.
    pub fn component(&self, dimension: &Symbol) -> Option<Value> {
        let ty = self.ty.get(dimension)?;
        Some(
            self.components
                .get(dimension)
                .cloned()
                .unwrap_or_else(|| ty.zero()),
        )
    }

    /// Every declared dimension in order, zeros included.
    pub fn components(&self) -> impl Iterator<Item = (&Symbol, Value)> + '_ {
        self.ty.dims.iter().map(move |(symbol, ty)| {
            let value = self
                .components
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| ty.zero());
            (symbol, value)
        })
    }

    pub fn is_zero(&self) -> bool {
        self.components.is_empty()
    }

    /// Re-expresses this vector under `target`, which must contain every
    /// dimension of this vector's type.
    pub fn widen(&self, target: &VectorType) -> DResult<Self> {
        if !target.contains(&self.ty) {
            return Err(DistError::no_conversion(
                &Type::Vector(self.ty.clone()),
                &Type::Vector(target.clone()),
            ));
        }
        Ok(Self {
            ty: target.clone(),
            components: self.components.clone(),
        })
    }

    /// Applies `f` dimension by dimension. Both vectors must share a type.
    pub fn zip_with(
        &self,
        other: &Vector,
        mut f: impl FnMut(&Value, &Value) -> DResult<Value>,
    ) -> DResult<Self> {
        debug_assert_eq!(self.ty, other.ty);
        let components = self
            .components()
            .zip(other.components())
            .map(|((symbol, l), (_, r))| f(&l, &r).map(|v| (symbol.clone(), v)))
            .collect::<DResult<Vec<_>>>()?;
        Self::new(self.ty.clone(), components)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Vector {}

impl PartialOrd for Vector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vector {
    /// Lexicographic over the declared dimension order.
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(
            self.ty, other.ty,
            "vectors of different types are not comparable"
        );
        self.ty.cmp(&other.ty).then_with(|| {
            self.components()
                .zip(other.components())
                .map(|((_, l), (_, r))| l.cmp(&r))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.components.hash(state);
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (symbol, value)) in self.components().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", symbol, value)?;
        }
        f.write_str("}")
    }
}
