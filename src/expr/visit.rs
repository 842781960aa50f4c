use super::tree::*;
use crate::types::Constant;

pub trait ExprVisitor {
    type Output;

    fn visit<A: Accept>(&mut self, a: &A) -> Self::Output {
        a.accept(self)
    }

    fn visit_constant(&mut self, x: &Constant) -> Self::Output;

    fn visit_pool(&mut self, x: &HomogeneousDicePool) -> Self::Output;

    fn visit_high(&mut self, x: &HighDice) -> Self::Output;

    fn visit_low(&mut self, x: &LowDice) -> Self::Output;

    fn visit_binary(&mut self, x: &BinaryOp) -> Self::Output;

    fn visit_bracketed(&mut self, x: &Bracketed) -> Self::Output;

    fn visit_mapped(&mut self, x: &MappedExpression) -> Self::Output;
}

#[enum_dispatch::enum_dispatch]
pub trait Accept: Sized + Evaluate {
    fn accept<V: ExprVisitor + ?Sized>(&self, v: &mut V) -> V::Output;
}
