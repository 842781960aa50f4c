//! Distributions of dice pools: plain sums and keep-highest/keep-lowest.

use crate::common::{BinaryOperator, Int};
use crate::dist::{combine_all, single_uniform_die, Distribution};
use crate::error::{DResult, DistError};
use std::fmt;

/// Which end of a sorted roll a pool keeps.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Keep {
    Highest,
    Lowest,
}

impl Keep {
    pub const fn as_char(&self) -> char {
        match self {
            Self::Highest => 'H',
            Self::Lowest => 'L',
        }
    }
}

/// A dice literal as written: `3d6`, `d20`, `4d6H3`, `2d20L1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DicePool {
    pub count: Int,
    pub sides: Int,
    pub keep: Option<(Keep, Int)>,
}

impl DicePool {
    pub const fn new(count: Int, sides: Int) -> Self {
        Self {
            count,
            sides,
            keep: None,
        }
    }

    pub const fn keeping(self, keep: Keep, n: Int) -> Self {
        Self {
            keep: Some((keep, n)),
            ..self
        }
    }

    pub fn distribution(&self) -> DResult<Distribution<Int>> {
        match self.keep {
            None => homogeneous_pool(self.count, self.sides),
            Some((Keep::Highest, n)) => keep_highest(self.count, self.sides, n),
            Some((Keep::Lowest, n)) => keep_lowest(self.count, self.sides, n),
        }
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some((keep, n)) = self.keep {
            write!(f, "{}{}", keep.as_char(), n)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DicePool {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, rest) = s.split_once('d').ok_or(ParseDiceError::NoDelimiter)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse().map_err(ParseDiceError::InvalidCount)?
        };

        let (sides, keep) = match rest.find(['H', 'L']) {
            Some(i) => {
                let keep = if rest[i..].starts_with('H') {
                    Keep::Highest
                } else {
                    Keep::Lowest
                };
                let n = rest[i + 1..].parse().map_err(ParseDiceError::InvalidKeep)?;
                (&rest[..i], Some((keep, n)))
            }
            None => (rest, None),
        };
        let sides = sides.parse().map_err(ParseDiceError::InvalidSides)?;

        Ok(Self { count, sides, keep })
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without 'd' delimiter")]
    NoDelimiter,
    #[error("invalid dice count: {0}")]
    InvalidCount(std::num::ParseIntError),
    #[error("invalid dice sides: {0}")]
    InvalidSides(std::num::ParseIntError),
    #[error("invalid keep count: {0}")]
    InvalidKeep(std::num::ParseIntError),
}

/// The sum of `count` dice with `sides` faces each.
pub fn homogeneous_pool(count: Int, sides: Int) -> DResult<Distribution<Int>> {
    check_pool(count, sides)?;
    if count == 0 {
        return Ok(Distribution::certain(0));
    }
    let die = single_uniform_die(sides)?;
    tracing::trace!(count, sides, "summing dice pool");
    combine_all(std::iter::repeat(die).take(count as usize), |a, b| a + b)
}

/// The sum of the `keep` highest of `count` dice.
pub fn keep_highest(count: Int, sides: Int, keep: Int) -> DResult<Distribution<Int>> {
    keep_pool(count, sides, keep, Keep::Highest)
}

/// The sum of the `keep` lowest of `count` dice.
pub fn keep_lowest(count: Int, sides: Int, keep: Int) -> DResult<Distribution<Int>> {
    keep_pool(count, sides, keep, Keep::Lowest)
}

/// Every distinct sorted roll is carried until the last die, so the number of
/// intermediate outcomes grows as [keep_states].
fn keep_pool(count: Int, sides: Int, keep: Int, which: Keep) -> DResult<Distribution<Int>> {
    check_pool(count, sides)?;
    if keep < 1 || keep >= count {
        return Err(DistError::domain(
            "kept dice",
            "at least 1 and fewer than the dice count",
            keep,
        ));
    }
    let die = single_uniform_die(sides)?.map(|x| vec![*x]);

    let rolls = combine_all(std::iter::repeat(die).take(count as usize), |a, b| {
        merge_sorted(a, b)
    })?;
    tracing::debug!(
        count,
        sides,
        keep,
        states = rolls.len(),
        "enumerated sorted rolls"
    );

    let keep = keep as usize;
    Ok(rolls.map(|roll| match which {
        Keep::Highest => roll[roll.len() - keep..].iter().sum(),
        Keep::Lowest => roll[..keep].iter().sum(),
    }))
}

// Every partial sum of a pool lies in `count..=count * sides`, so one checked
// product covers all of them.
fn check_pool(count: Int, sides: Int) -> DResult<()> {
    if count < 0 {
        return Err(DistError::domain("dice count", "non-negative", count));
    }
    if sides < 1 {
        return Err(DistError::domain("die sides", "at least 1", sides));
    }
    match count.checked_mul(sides) {
        Some(_) => Ok(()),
        None => Err(DistError::overflow(BinaryOperator::Mul, count, sides)),
    }
}

fn merge_sorted(a: &[Int], b: &[Int]) -> Vec<Int> {
    let mut ret = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] <= b[j] {
            ret.push(a[i]);
            i += 1;
        } else {
            ret.push(b[j]);
            j += 1;
        }
    }
    ret.extend_from_slice(&a[i..]);
    ret.extend_from_slice(&b[j..]);
    ret
}

/// The number of distinct sorted rolls of `count` dice with `sides` faces,
/// saturating at `u128::MAX`.
pub fn keep_states(count: Int, sides: Int) -> u128 {
    if count <= 0 || sides <= 0 {
        return 1;
    }
    // C(count + sides - 1, count), built up one factor at a time so every
    // intermediate value is itself a binomial coefficient.
    let (a, b) = ((sides - 1) as u128, count as u128);
    let (n, k) = (a.max(b), a.min(b));
    let mut ret: u128 = 1;
    for i in 1..=k {
        ret = match ret.checked_mul(n + i) {
            Some(x) => x / i,
            None => return u128::MAX,
        };
    }
    ret
}
