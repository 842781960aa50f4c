use crate::common::Int;
use crate::dice::keep_states;
use crate::error::Error;

/// Bounds on how large a dice pool may be before it is evaluated.
///
/// Evaluation itself never refuses work; these are enforced while checking an
/// expression, so an oversized pool fails before any enumeration starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Limits {
    pub max_pool_dice: Option<u64>,
    pub max_faces: Option<u64>,
    /// Bound on the number of distinct sorted rolls a keep pool enumerates.
    pub max_keep_states: Option<u128>,
}

impl Limits {
    pub const DEFAULT_POOL_DICE: u64 = 40;
    pub const DEFAULT_FACES: u64 = 120;
    pub const DEFAULT_KEEP_STATES: u128 = 250_000;

    pub const fn new(
        max_pool_dice: Option<u64>,
        max_faces: Option<u64>,
        max_keep_states: Option<u128>,
    ) -> Self {
        Self {
            max_pool_dice,
            max_faces,
            max_keep_states,
        }
    }

    pub const fn new_bounded(max_pool_dice: u64, max_faces: u64, max_keep_states: u128) -> Self {
        Self::new(Some(max_pool_dice), Some(max_faces), Some(max_keep_states))
    }

    pub const fn new_unbounded() -> Self {
        Self::new(None, None, None)
    }

    pub fn check_pool(&self, count: Int, sides: Int) -> Result<(), Error> {
        exceeds("dice count", count, self.max_pool_dice)?;
        exceeds("die sides", sides, self.max_faces)
    }

    pub fn check_keep(&self, count: Int, sides: Int) -> Result<(), Error> {
        self.check_pool(count, sides)?;
        match self.max_keep_states {
            Some(limit) => {
                let found = keep_states(count, sides);
                if found > limit {
                    Err(Error::LimitExceeded {
                        what: "sorted rolls",
                        found,
                        limit,
                    })
                } else {
                    Ok(())
                }
            }
            None => Ok(()),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new_bounded(
            Self::DEFAULT_POOL_DICE,
            Self::DEFAULT_FACES,
            Self::DEFAULT_KEEP_STATES,
        )
    }
}

// Negative values are left for the evaluator to reject as out of domain.
fn exceeds(what: &'static str, found: Int, limit: Option<u64>) -> Result<(), Error> {
    match (u64::try_from(found), limit) {
        (Ok(found), Some(limit)) if found > limit => Err(Error::LimitExceeded {
            what,
            found: found.into(),
            limit: limit.into(),
        }),
        _ => Ok(()),
    }
}
