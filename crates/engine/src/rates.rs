//! Rate constants applied by the aggregation.
//!
//! Rates are configuration, not literals: the application loads them from its
//! settings and passes a [`Rates`] value down to [`FinancialModel::build`].
//!
//!  [`FinancialModel::build`]: crate::FinancialModel::build
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A non-negative fraction stored as integer basis points (1/10000).
///
/// Deserializes from a plain fraction (`0.12`) so settings files stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rate(u32);

impl Rate {
    /// Basis points in 1.0.
    pub const SCALE: u32 = 10_000;

    /// Builds a rate from a fraction in `0.0..=1.0`.
    pub fn from_fraction(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(EngineError::InvalidRate(format!(
                "rate must be between 0 and 1, got {value}"
            )));
        }
        Ok(Self((value * f64::from(Self::SCALE)).round() as u32))
    }

    #[must_use]
    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    /// The rate as a percentage, e.g. `12` for `0.12`.
    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<f64> for Rate {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_fraction(value)
    }
}

impl From<Rate> for f64 {
    fn from(value: Rate) -> Self {
        value.fraction()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// The fixed rates of the cost model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    /// Social tax on the salary fund.
    pub social_tax: Rate,
    /// Tax on positive operating profit.
    pub profit_tax: Rate,
    /// Yearly amortization of purchased inventory.
    pub amortization: Rate,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            social_tax: Rate::from_basis_points(1_200),
            profit_tax: Rate::from_basis_points(1_200),
            amortization: Rate::from_basis_points(2_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_round_trips_through_basis_points() {
        let rate = Rate::from_fraction(0.12).unwrap();
        assert_eq!(rate.basis_points(), 1_200);
        assert_eq!(rate.percent(), 12.0);
        assert_eq!(rate.to_string(), "12%");
        assert_eq!(Rate::from_fraction(0.125).unwrap().to_string(), "12.5%");
    }

    #[test]
    fn out_of_range_rates_are_rejected() {
        assert!(Rate::from_fraction(-0.01).is_err());
        assert!(Rate::from_fraction(1.5).is_err());
        assert!(Rate::from_fraction(f64::NAN).is_err());
    }

    #[test]
    fn rates_deserialize_from_fractions_with_defaults() {
        let rates: Rates = serde_json::from_str(r#"{ "social_tax": 0.15 }"#).unwrap();
        assert_eq!(rates.social_tax.basis_points(), 1_500);
        assert_eq!(rates.profit_tax, Rates::default().profit_tax);
        assert_eq!(rates.amortization.basis_points(), 2_000);
    }
}
