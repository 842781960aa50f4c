use super::tree::*;
use super::visit::{Accept, ExprVisitor};
use crate::types::Constant;

/// Renders an expression back to source notation.
pub trait Stringify {
    fn stringify<A: Accept>(&mut self, a: &A) -> String {
        a.accept(self)
    }

    fn str_constant(&mut self, x: &Constant) -> String {
        x.to_string()
    }

    fn str_pool(&mut self, x: &HomogeneousDicePool) -> String {
        format!("{}d{}", x.count, x.sides)
    }

    fn str_high(&mut self, x: &HighDice) -> String {
        let pool = self.str_pool(&x.pool);
        format!("{}H{}", pool, x.keep)
    }

    fn str_low(&mut self, x: &LowDice) -> String {
        let pool = self.str_pool(&x.pool);
        format!("{}L{}", pool, x.keep)
    }

    fn str_binary(&mut self, x: &BinaryOp) -> String {
        let l = self.stringify(x.left());
        let r = self.stringify(x.right());
        format!("{} {} {}", l, x.operator().symbol(), r)
    }

    fn str_bracketed(&mut self, x: &Bracketed) -> String {
        let inner = self.stringify(&*x.0);
        format!("({})", inner)
    }

    /// Conversions are implicit in source notation.
    fn str_mapped(&mut self, x: &MappedExpression) -> String {
        self.stringify(x.source())
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: Accept>(&mut self, a: &A) -> String {
        Stringify::stringify(self, a)
    }
}

impl Stringify for SimpleStringifier {}

/// Spells out every implicit conversion, e.g. `('a as {'a: int, 'b: int})`.
#[derive(Default)]
pub struct ExplainStringifier;

impl ExplainStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: Accept>(&mut self, a: &A) -> String {
        Stringify::stringify(self, a)
    }
}

impl Stringify for ExplainStringifier {
    fn str_mapped(&mut self, x: &MappedExpression) -> String {
        let source = self.stringify(x.source());
        format!("({} {})", source, x.converter())
    }
}

impl<S: ?Sized> ExprVisitor for S
where
    S: Stringify,
{
    type Output = String;

    fn visit_constant(&mut self, x: &Constant) -> Self::Output {
        self.str_constant(x)
    }

    fn visit_pool(&mut self, x: &HomogeneousDicePool) -> Self::Output {
        self.str_pool(x)
    }

    fn visit_high(&mut self, x: &HighDice) -> Self::Output {
        self.str_high(x)
    }

    fn visit_low(&mut self, x: &LowDice) -> Self::Output {
        self.str_low(x)
    }

    fn visit_binary(&mut self, x: &BinaryOp) -> Self::Output {
        self.str_binary(x)
    }

    fn visit_bracketed(&mut self, x: &Bracketed) -> Self::Output {
        self.str_bracketed(x)
    }

    fn visit_mapped(&mut self, x: &MappedExpression) -> Self::Output {
        self.str_mapped(x)
    }
}
