use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::Rate;

/// Minor units (tiyin) in one so'm.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer tiyin** (1/100 so'm).
///
/// Use this type for **all** monetary values in the engine (salaries, prices,
/// derived totals) so category sums stay exact. Serialized as the bare number
/// of minor units.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34 so'm");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates a new amount from whole so'm.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns the value in so'm as a float, for display scaling only.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked multiplication by a count (returns `None` on overflow).
    #[must_use]
    pub fn checked_times(self, count: u64) -> Option<Money> {
        i64::try_from(count)
            .ok()
            .and_then(|count| self.0.checked_mul(count))
            .map(Money)
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Multiplies by a count. Callers validate magnitudes beforehand.
    #[must_use]
    pub fn times(self, count: u64) -> Money {
        Money(self.0 * count as i64)
    }

    /// Applies a rate, rounding to the nearest minor unit (half away from zero).
    #[must_use]
    pub fn apply_rate(self, rate: Rate) -> Money {
        self.mul_div(i128::from(rate.basis_points()), i128::from(Rate::SCALE))
    }

    /// Divides into `parts` equal shares, rounding to the nearest minor unit.
    ///
    /// Dividing by zero yields zero.
    #[must_use]
    pub fn share(self, parts: u64) -> Money {
        self.mul_div(1, i128::from(parts))
    }

    /// Computes `self * numerator / denominator` without intermediate overflow.
    ///
    /// A zero denominator yields zero.
    #[must_use]
    pub fn proportion(self, numerator: u64, denominator: u64) -> Money {
        self.mul_div(i128::from(numerator), i128::from(denominator))
    }

    fn mul_div(self, numerator: i128, denominator: i128) -> Money {
        if denominator == 0 {
            return Money::ZERO;
        }
        let product = i128::from(self.0) * numerator;
        let quotient = product / denominator;
        let remainder = product % denominator;
        let rounded = if 2 * remainder.abs() >= denominator.abs() {
            quotient + product.signum() * denominator.signum()
        } else {
            quotient
        };
        Money(rounded as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let minor = abs % MINOR_PER_MAJOR as u64;
        write!(f, "{sign}{major}.{minor:02} so'm")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
