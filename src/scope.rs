use crate::expr::Expression;
use std::rc::Rc;

/// Named expressions visible to a statement.
///
/// A scope is never modified: [Scope::define] returns a new scope sharing
/// every older binding with this one, and a newer binding of a name shadows
/// the older ones.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    head: Option<Rc<Binding>>,
}

#[derive(Debug)]
struct Binding {
    name: String,
    expr: Expression,
    next: Option<Rc<Binding>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn define(&self, name: impl Into<String>, expr: Expression) -> Self {
        Self {
            head: Some(Rc::new(Binding {
                name: name.into(),
                expr,
                next: self.head.clone(),
            })),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Expression> {
        self.bindings()
            .find(|binding| binding.name == name)
            .map(|binding| &binding.expr)
    }

    /// Every bound name, newest first, without shadowed duplicates.
    pub fn names(&self) -> Vec<&str> {
        let mut ret: Vec<&str> = Vec::new();
        for binding in self.bindings() {
            if !ret.contains(&binding.name.as_str()) {
                ret.push(&binding.name);
            }
        }
        ret
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> + '_ {
        std::iter::successors(self.head.as_deref(), |binding| binding.next.as_deref())
    }
}
