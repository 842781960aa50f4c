use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// An exact probability. Products and sums never round, so repeated
/// combination of dice stays exact however deep the expression goes.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Probability(BigRational);

impl Probability {
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// `numer / denom`. The denominator must be non-zero.
    pub fn ratio(numer: u64, denom: u64) -> Self {
        debug_assert_ne!(denom, 0);
        Self(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigRational> for Probability {
    fn from(x: BigRational) -> Self {
        Self(x)
    }
}

impl Mul for &Probability {
    type Output = Probability;

    fn mul(self, rhs: Self) -> Self::Output {
        Probability(&self.0 * &rhs.0)
    }
}

impl Add for &Probability {
    type Output = Probability;

    fn add(self, rhs: Self) -> Self::Output {
        Probability(&self.0 + &rhs.0)
    }
}

impl AddAssign<Probability> for Probability {
    fn add_assign(&mut self, rhs: Probability) {
        self.0 += rhs.0;
    }
}

impl<'a> Sum<&'a Probability> for Probability {
    fn sum<I: Iterator<Item = &'a Probability>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| &a + b)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_arithmetic() {
        let sixth = Probability::ratio(1, 6);
        let total: Probability = std::iter::repeat(&sixth).take(6).sum();
        assert_eq!(total, Probability::one());
        assert_eq!(&sixth * &sixth, Probability::ratio(1, 36));
        assert_eq!(&sixth + &sixth, Probability::ratio(1, 3));
    }

    #[test]
    fn test_display_and_float() {
        assert_eq!(Probability::ratio(2, 4).to_string(), "1/2");
        assert!((Probability::ratio(1, 3).to_f64() - 1.0 / 3.0).abs() < 1e-12);
        assert!(Probability::zero().is_zero());
    }
}
