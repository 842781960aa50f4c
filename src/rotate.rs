//! Precedence normalization for right-nested binary operator trees.
//!
//! The parser reads every operator chain right-recursively, so `1 - 2 + 3`
//! first comes out as `1 - (2 + 3)`. Rotating left wherever the outer operator
//! binds at least as tightly as the inner one restores left associativity and
//! relative precedence.

use crate::common::Rank;

/// A tree family whose nodes may be binary operator applications.
pub trait BinaryFamily: Sized {
    type Op: Copy;

    fn as_binary(&self) -> Option<(&Self, Self::Op, &Self)>;

    fn into_binary(self) -> Result<(Self, Self::Op, Self), Self>;

    fn binary(left: Self, op: Self::Op, right: Self) -> Self;
}

/// One rotation step: `(L op1 (M op2 R))` becomes `((L op1 M) op2 R)` when
/// `rank(op1) >= rank(op2)`. Returns `None` when the node is not of that shape
/// or the ranks do not allow it.
pub fn rotate<T, F>(node: &T, rank: F) -> Option<T>
where
    T: BinaryFamily + Clone,
    F: Fn(T::Op) -> Rank,
{
    let (left, op1, right) = node.as_binary()?;
    let (middle, op2, right) = right.as_binary()?;
    if rank(op1) < rank(op2) {
        return None;
    }
    Some(T::binary(
        T::binary(left.clone(), op1, middle.clone()),
        op2,
        right.clone(),
    ))
}

/// Applies [rotate] bottom-up until no node of the tree rotates any more.
///
/// Children are normalized first; after each successful rotation the new
/// left child is normalized again, since it may now expose another rotation.
/// Every rotation moves an operator strictly leftward, so this terminates.
pub fn normalize<T, F>(node: T, rank: &F) -> T
where
    T: BinaryFamily + Clone,
    F: Fn(T::Op) -> Rank,
{
    let (left, op, right) = match node.into_binary() {
        Ok(parts) => parts,
        Err(leaf) => return leaf,
    };
    let mut node = T::binary(normalize(left, rank), op, normalize(right, rank));
    while let Some(rotated) = rotate(&node, rank) {
        node = match rotated.into_binary() {
            Ok((left, op, right)) => T::binary(normalize(left, rank), op, right),
            Err(leaf) => leaf,
        };
    }
    node
}
