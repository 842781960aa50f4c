//! Exact discrete distributions and the algebra for combining independent ones.

mod prob;

pub use prob::Probability;

use crate::common::Int;
use crate::error::{DResult, DistError};
use std::collections::BTreeMap;
use std::fmt;

/// One outcome of a [Distribution] together with its probability.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event<T> {
    pub value: T,
    pub probability: Probability,
}

impl<T> Event<T> {
    pub fn new(value: T, probability: Probability) -> Self {
        Self { value, probability }
    }
}

impl<T: fmt::Display> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.value, self.probability)
    }
}

/// A finite mapping from outcome to probability.
///
/// Events are kept sorted by value and no two events share a value; anything
/// that produces a distribution merges equal outcomes by summing their
/// probabilities first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Distribution<T> {
    events: Vec<Event<T>>,
}

impl<T> Distribution<T> {
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event<T>> {
        self.events
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.events.iter().map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<T: Ord> Distribution<T> {
    /// The distribution that always yields `value`.
    pub fn certain(value: T) -> Self {
        Self {
            events: vec![Event::new(value, Probability::one())],
        }
    }

    /// Builds a distribution from raw pairs, merging duplicate values.
    pub fn from_events(events: impl IntoIterator<Item = (T, Probability)>) -> Self {
        let mut merged: BTreeMap<T, Probability> = BTreeMap::new();
        for (value, probability) in events {
            *merged.entry(value).or_default() += probability;
        }
        Self {
            events: merged
                .into_iter()
                .map(|(value, probability)| Event::new(value, probability))
                .collect(),
        }
    }

    pub fn probability_of(&self, value: &T) -> Probability {
        self.events
            .binary_search_by(|e| e.value.cmp(value))
            .map_or_else(|_| Probability::zero(), |i| self.events[i].probability.clone())
    }

    pub fn total_probability(&self) -> Probability {
        self.events.iter().map(|e| &e.probability).sum()
    }

    /// The most likely probability of any single outcome.
    pub fn max_probability(&self) -> Probability {
        self.events
            .iter()
            .map(|e| &e.probability)
            .max()
            .cloned()
            .unwrap_or_else(Probability::zero)
    }

    /// Maps every outcome through `f`, merging outcomes that collide.
    pub fn map<U: Ord>(&self, mut f: impl FnMut(&T) -> U) -> Distribution<U> {
        Distribution::from_events(
            self.events
                .iter()
                .map(|e| (f(&e.value), e.probability.clone())),
        )
    }

    pub fn try_map<U: Ord, E>(
        &self,
        mut f: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<Distribution<U>, E> {
        let events = self
            .events
            .iter()
            .map(|e| f(&e.value).map(|v| (v, e.probability.clone())))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Distribution::from_events(events))
    }
}

impl Distribution<Int> {
    pub fn mean(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.value as f64 * e.probability.to_f64())
            .sum()
    }
}

/// Combines two independent distributions: every pair of outcomes is fed
/// through `f` and weighted by the product of their probabilities.
pub fn combine<A, B, C: Ord>(
    left: &Distribution<A>,
    right: &Distribution<B>,
    mut f: impl FnMut(&A, &B) -> C,
) -> Distribution<C> {
    let pairs = left.events.iter().flat_map(|l| {
        right
            .events
            .iter()
            .map(move |r| (l, r))
    });
    Distribution::from_events(
        pairs
            .map(|(l, r)| (f(&l.value, &r.value), &l.probability * &r.probability))
            .collect::<Vec<_>>(),
    )
}

/// Like [combine], but stops at the first outcome pair `f` rejects.
pub fn try_combine<A, B, C: Ord, E>(
    left: &Distribution<A>,
    right: &Distribution<B>,
    mut f: impl FnMut(&A, &B) -> Result<C, E>,
) -> Result<Distribution<C>, E> {
    let mut events = Vec::with_capacity(left.len() * right.len());
    for l in &left.events {
        for r in &right.events {
            events.push((f(&l.value, &r.value)?, &l.probability * &r.probability));
        }
    }
    Ok(Distribution::from_events(events))
}

/// Left fold of [combine] over a non-empty sequence.
pub fn combine_all<T: Ord>(
    seq: impl IntoIterator<Item = Distribution<T>>,
    mut f: impl FnMut(&T, &T) -> T,
) -> DResult<Distribution<T>> {
    let mut seq = seq.into_iter();
    let first = seq.next().ok_or(DistError::EmptyInput("combine_all"))?;
    Ok(seq.fold(first, |acc, next| combine(&acc, &next, &mut f)))
}

/// A fair die numbered `1..=sides`.
pub fn single_uniform_die(sides: Int) -> DResult<Distribution<Int>> {
    if sides < 1 {
        return Err(DistError::domain("die sides", "at least 1", sides));
    }
    let p = Probability::ratio(1, sides as u64);
    Ok(Distribution {
        events: (1..=sides).map(|x| Event::new(x, p.clone())).collect(),
    })
}
